use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::{
    fmt::{self, Debug, Display},
    hash::Hash,
};

pub mod choices;
pub mod student;
pub mod teacher;

///Backend-assigned identifier. Never minted locally; the backend sends either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    ///The id percent-encoded as a single URL path segment, so `/`, `?` and `#` stay inside it.
    ///`None` for ids that no path can hold (empty, `.` and `..`).
    pub fn path_segment(&self) -> Option<String> {
        if matches!(self.0.as_str(), "" | "." | "..") {
            return None;
        }

        let mut url = Url::parse("http://record.invalid/").ok()?;
        url.path_segments_mut().ok()?.clear().push(&self.0);
        Some(url.path().trim_start_matches('/').to_string())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: RecordId },
}

impl FormMode {
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Email,
    Secret,
    Choice(&'static [(&'static str, &'static str)]),
    Toggle {
        on: &'static str,
        off: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<F: 'static> {
    pub field: F,
    pub label: &'static str,
    pub kind: FieldKind,
    pub create_only: bool,
}

impl<F> FieldSpec<F> {
    pub const fn new(field: F, label: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            label,
            kind,
            create_only: false,
        }
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Flag(bool),
}

impl FieldValue<'_> {
    pub fn is_blank(self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Flag(_) => false,
        }
    }
}

impl<'a> FieldValue<'a> {
    pub const fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

pub trait FieldId: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    ///the identifier used by form inputs
    fn id(self) -> &'static str;

    fn lookup(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.id() == id)
    }
}

pub trait Draft: Default + Clone + Debug + PartialEq + Serialize + Send + Sync + 'static {
    type Field: FieldId;

    const LAYOUT: &'static [FieldSpec<Self::Field>];
    const REQUIRED: &'static [Self::Field];
    ///fields only required when creating, with their message
    const CREATE_ONLY: &'static [(Self::Field, &'static str)] = &[];
    const EMAIL: &'static [(Self::Field, &'static str)] = &[];
    const DIGITS_ONLY: &'static [(Self::Field, &'static str)] = &[];
    ///`(source, target)`: while creating, `set_text` on the source also fills the target
    const MIRRORED: &'static [(Self::Field, Self::Field)] = &[];

    fn value(&self, field: Self::Field) -> FieldValue<'_>;

    fn set_text(&mut self, field: Self::Field, value: String, mode: &FormMode);
    ///unknown codes leave the field absent
    fn set_choice(&mut self, field: Self::Field, raw: &str);
    fn set_flag(&mut self, field: Self::Field, on: bool);

    fn spec(field: Self::Field) -> Option<&'static FieldSpec<Self::Field>> {
        Self::LAYOUT.iter().find(|spec| spec.field == field)
    }
}

pub trait Entity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    type Draft: Draft;

    ///lower-case singular noun, for messages
    const NOUN: &'static str;
    ///path segment on the backend
    const ENDPOINT: &'static str;

    fn id(&self) -> &RecordId;
    fn display_name(&self) -> &str;
    fn to_draft(&self) -> Self::Draft;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    #[serde(rename = "limit")]
    pub page_size: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "E: DeserializeOwned")]
pub struct ListPage<E> {
    #[serde(rename = "data")]
    pub records: Vec<E>,
    pub meta: PageMeta,
}

///Shared by the record types: absent and blank both mean "nothing to show".
pub fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("---")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_accept_numbers_and_strings() {
        let from_number: RecordId = serde_json::from_str("42").unwrap();
        let from_text: RecordId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(from_number.as_str(), "42");
        assert_eq!(from_text.to_string(), "a1b2");
    }

    #[test]
    fn path_segments_keep_separators_inside_the_id() {
        assert_eq!(RecordId::new("g-12").path_segment().as_deref(), Some("g-12"));
        assert_eq!(
            RecordId::new("../guru/5").path_segment().as_deref(),
            Some("..%2Fguru%2F5")
        );
        assert_eq!(
            RecordId::new("a?b#c d").path_segment().as_deref(),
            Some("a%3Fb%23c%20d")
        );
        assert_eq!(RecordId::new("..").path_segment(), None);
        assert_eq!(RecordId::new("").path_segment(), None);
    }

    #[test]
    fn blank_values() {
        assert!(FieldValue::Absent.is_blank());
        assert!(FieldValue::Text(" \t").is_blank());
        assert!(!FieldValue::Text("x").is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
    }

    #[test]
    fn page_meta_reads_backend_names() {
        let meta: PageMeta =
            serde_json::from_str(r#"{"page":2,"limit":10,"total":31,"totalPages":4}"#).unwrap();
        assert_eq!(
            meta,
            PageMeta {
                page: 2,
                page_size: 10,
                total: 31,
                total_pages: 4
            }
        );
    }

    #[test]
    fn placeholder_for_blank() {
        assert_eq!(or_placeholder(None), "---");
        assert_eq!(or_placeholder(Some(" ")), "---");
        assert_eq!(or_placeholder(Some("Jl. Merdeka")), "Jl. Merdeka");
    }
}
