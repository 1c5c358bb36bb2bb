use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, IntoDeserializer},
};

///Enumerated string field: the form code, the backend's wire value, and a human label per variant.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal, $wire:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            ///`(code, label)` in display order
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($code, $label)),+];

            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
pub(crate) use choice;

///Backend values we don't recognise (or `null`) read as absent rather than failing the whole page.
pub fn lenient<'de, D, C>(deserializer: D) -> Result<Option<C>, D::Error>
where
    D: Deserializer<'de>,
    C: DeserializeOwned,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed: Result<C, serde::de::value::Error> = C::deserialize(raw.as_str().into_deserializer());
    if parsed.is_err() {
        debug!(?raw, "Ignoring unknown enumerated value from backend");
    }
    Ok(parsed.ok())
}

choice! {
    Gender {
        Male => "M", "L", "Male";
        Female => "F", "P", "Female";
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}

choice! {
    Religion {
        Islam => "Islam", "Islam", "Islam";
        Protestant => "Protestant", "Kristen", "Protestant";
        Catholic => "Catholic", "Katolik", "Catholic";
        Hindu => "Hindu", "Hindu", "Hindu";
        Buddhist => "Buddhist", "Buddha", "Buddhist";
        Confucian => "Confucian", "Konghucu", "Confucian";
    }
}

impl Default for Religion {
    fn default() -> Self {
        Self::Islam
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_wire_values_differ() {
        assert_eq!(Gender::Female.code(), "F");
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"P\"");
        let parsed: Religion = serde_json::from_str("\"Konghucu\"").unwrap();
        assert_eq!(parsed, Religion::Confucian);
    }

    #[test]
    fn from_code_rejects_unknown_and_wire_values() {
        assert_eq!(Gender::from_code("M"), Some(Gender::Male));
        assert_eq!(Gender::from_code("L"), None);
        assert_eq!(Religion::from_code("Pastafarian"), None);
    }

    #[test]
    fn options_follow_declaration_order() {
        assert_eq!(Gender::OPTIONS, &[("M", "Male"), ("F", "Female")]);
        assert_eq!(Religion::OPTIONS.len(), 6);
        assert_eq!(Religion::default().code(), "Islam");
    }
}
