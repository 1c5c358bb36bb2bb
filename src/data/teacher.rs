use crate::{
    config::date_display::calendar_date,
    data::{
        Draft, Entity, FieldId, FieldKind, FieldSpec, FieldValue, FormMode, RecordId,
        choices::{Gender, Religion, choice, lenient},
    },
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

choice! {
    EmploymentStatus {
        Civil => "PNS", "PNS", "Civil Servant (PNS)";
        Honorary => "Honorer", "Honorer", "Honorary (Honorer)";
        Foundation => "GTY", "GTY", "Permanent Foundation Teacher (GTY)";
        Contract => "GTT", "GTT", "Non-Permanent Teacher (GTT)";
    }
}

impl Default for EmploymentStatus {
    fn default() -> Self {
        Self::Civil
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Homeroom {
    #[serde(rename = "namaKelas")]
    pub class_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Teacher {
    pub id: RecordId,
    #[serde(default)]
    pub nip: Option<String>,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "jenisKelamin", default, deserialize_with = "lenient")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "agama", default, deserialize_with = "lenient")]
    pub religion: Option<Religion>,
    #[serde(rename = "tempatLahir", default)]
    pub birth_place: Option<String>,
    #[serde(rename = "tanggalLahir", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "noTelp", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub nik: Option<String>,
    #[serde(default)]
    pub nuptk: Option<String>,
    #[serde(rename = "statusKepegawaian", default, deserialize_with = "lenient")]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(rename = "alamat", default)]
    pub address: Option<String>,
    #[serde(rename = "isAktif", default = "active_by_default")]
    pub is_active: bool,
    #[serde(rename = "waliKelas", default)]
    pub homeroom: Option<Homeroom>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

const fn active_by_default() -> bool {
    true
}

impl Teacher {
    pub fn homeroom_class(&self) -> Option<&str> {
        self.homeroom.as_ref().map(|h| h.class_name.as_str())
    }
}

///The password a new teacher's login account starts with. Only ever sent on create.
#[derive(Debug, Clone)]
pub struct InitialPassword(SecretString);

impl InitialPassword {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for InitialPassword {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

impl PartialEq for InitialPassword {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for InitialPassword {}

impl Serialize for InitialPassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeacherField {
    Name,
    Gender,
    Religion,
    BirthPlace,
    BirthDate,
    Phone,
    Email,
    Nik,
    Nuptk,
    Nip,
    EmploymentStatus,
    Address,
    IsActive,
    Username,
    DefaultPassword,
}

impl FieldId for TeacherField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Gender,
        Self::Religion,
        Self::BirthPlace,
        Self::BirthDate,
        Self::Phone,
        Self::Email,
        Self::Nik,
        Self::Nuptk,
        Self::Nip,
        Self::EmploymentStatus,
        Self::Address,
        Self::IsActive,
        Self::Username,
        Self::DefaultPassword,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Religion => "religion",
            Self::BirthPlace => "birth_place",
            Self::BirthDate => "birth_date",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Nik => "nik",
            Self::Nuptk => "nuptk",
            Self::Nip => "nip",
            Self::EmploymentStatus => "employment_status",
            Self::Address => "address",
            Self::IsActive => "is_active",
            Self::Username => "username",
            Self::DefaultPassword => "default_password",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherDraft {
    #[serde(rename = "nama", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "jenisKelamin", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "agama", skip_serializing_if = "Option::is_none")]
    pub religion: Option<Religion>,
    #[serde(rename = "tempatLahir", skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(rename = "tanggalLahir", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "noTelp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuptk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    #[serde(rename = "statusKepegawaian", skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "isAktif", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "passwordDefault", skip_serializing_if = "Option::is_none")]
    pub default_password: Option<InitialPassword>,
}

impl Default for TeacherDraft {
    fn default() -> Self {
        Self {
            name: None,
            gender: Some(Gender::default()),
            religion: Some(Religion::default()),
            birth_place: None,
            birth_date: None,
            phone: None,
            email: None,
            nik: None,
            nuptk: None,
            nip: None,
            employment_status: Some(EmploymentStatus::default()),
            address: None,
            is_active: Some(true),
            username: None,
            default_password: None,
        }
    }
}

impl TeacherDraft {
    fn text_slot(&mut self, field: TeacherField) -> Option<&mut Option<String>> {
        Some(match field {
            TeacherField::Name => &mut self.name,
            TeacherField::BirthPlace => &mut self.birth_place,
            TeacherField::BirthDate => &mut self.birth_date,
            TeacherField::Phone => &mut self.phone,
            TeacherField::Email => &mut self.email,
            TeacherField::Nik => &mut self.nik,
            TeacherField::Nuptk => &mut self.nuptk,
            TeacherField::Nip => &mut self.nip,
            TeacherField::Address => &mut self.address,
            TeacherField::Username => &mut self.username,
            TeacherField::Gender
            | TeacherField::Religion
            | TeacherField::EmploymentStatus
            | TeacherField::IsActive
            | TeacherField::DefaultPassword => return None,
        })
    }
}

impl Draft for TeacherDraft {
    type Field = TeacherField;

    const LAYOUT: &'static [FieldSpec<TeacherField>] = &[
        FieldSpec::new(TeacherField::Name, "Full Name (with titles)", FieldKind::Text),
        FieldSpec::new(TeacherField::Gender, "Sex", FieldKind::Choice(Gender::OPTIONS)),
        FieldSpec::new(
            TeacherField::Religion,
            "Religion",
            FieldKind::Choice(Religion::OPTIONS),
        ),
        FieldSpec::new(TeacherField::BirthPlace, "Place of Birth", FieldKind::Text),
        FieldSpec::new(TeacherField::BirthDate, "Date of Birth", FieldKind::Date),
        FieldSpec::new(TeacherField::Phone, "Phone Number", FieldKind::Text),
        FieldSpec::new(TeacherField::Email, "Email", FieldKind::Email),
        FieldSpec::new(TeacherField::Nik, "NIK", FieldKind::Text),
        FieldSpec::new(TeacherField::Nuptk, "NUPTK", FieldKind::Text),
        FieldSpec::new(TeacherField::Nip, "NIP", FieldKind::Text),
        FieldSpec::new(
            TeacherField::EmploymentStatus,
            "Employment Status",
            FieldKind::Choice(EmploymentStatus::OPTIONS),
        ),
        FieldSpec::new(TeacherField::Address, "Address", FieldKind::LongText),
        FieldSpec::new(
            TeacherField::IsActive,
            "Status",
            FieldKind::Toggle {
                on: "Active",
                off: "Inactive",
            },
        ),
        FieldSpec::new(TeacherField::Username, "Login Username", FieldKind::Text).create_only(),
        FieldSpec::new(
            TeacherField::DefaultPassword,
            "Default Password",
            FieldKind::Secret,
        )
        .create_only(),
    ];

    const REQUIRED: &'static [TeacherField] = &[
        TeacherField::Name,
        TeacherField::Gender,
        TeacherField::Religion,
        TeacherField::BirthPlace,
        TeacherField::BirthDate,
        TeacherField::Phone,
        TeacherField::Email,
        TeacherField::Nik,
        TeacherField::Nuptk,
        TeacherField::Nip,
        TeacherField::EmploymentStatus,
        TeacherField::Address,
    ];

    const CREATE_ONLY: &'static [(TeacherField, &'static str)] = &[
        (TeacherField::Username, "Username is required."),
        (TeacherField::DefaultPassword, "Default password is required."),
    ];

    const EMAIL: &'static [(TeacherField, &'static str)] =
        &[(TeacherField::Email, "Email address is not valid.")];

    const DIGITS_ONLY: &'static [(TeacherField, &'static str)] = &[
        (TeacherField::Nip, "NIP may only contain digits."),
        (TeacherField::Nik, "NIK may only contain digits."),
    ];

    const MIRRORED: &'static [(TeacherField, TeacherField)] =
        &[(TeacherField::Nip, TeacherField::Username)];

    fn value(&self, field: TeacherField) -> FieldValue<'_> {
        match field {
            TeacherField::Gender => self.gender.map(Gender::code).into(),
            TeacherField::Religion => self.religion.map(Religion::code).into(),
            TeacherField::EmploymentStatus => {
                self.employment_status.map(EmploymentStatus::code).into()
            }
            TeacherField::IsActive => self.is_active.map_or(FieldValue::Absent, FieldValue::Flag),
            TeacherField::DefaultPassword => self
                .default_password
                .as_ref()
                .map(InitialPassword::expose)
                .into(),
            TeacherField::Name => self.name.as_deref().into(),
            TeacherField::BirthPlace => self.birth_place.as_deref().into(),
            TeacherField::BirthDate => self.birth_date.as_deref().into(),
            TeacherField::Phone => self.phone.as_deref().into(),
            TeacherField::Email => self.email.as_deref().into(),
            TeacherField::Nik => self.nik.as_deref().into(),
            TeacherField::Nuptk => self.nuptk.as_deref().into(),
            TeacherField::Nip => self.nip.as_deref().into(),
            TeacherField::Address => self.address.as_deref().into(),
            TeacherField::Username => self.username.as_deref().into(),
        }
    }

    fn set_text(&mut self, field: TeacherField, value: String, mode: &FormMode) {
        match field {
            TeacherField::DefaultPassword => {
                self.default_password = Some(InitialPassword::from(value));
            }
            TeacherField::IsActive => self.set_flag(field, matches!(value.as_str(), "true" | "on")),
            TeacherField::Nip if mode.is_create() => {
                //new accounts log in with their NIP unless told otherwise
                self.username = Some(value.clone());
                self.nip = Some(value);
            }
            other => match self.text_slot(other) {
                Some(slot) => *slot = Some(value),
                None => self.set_choice(other, &value),
            },
        }
    }

    fn set_choice(&mut self, field: TeacherField, raw: &str) {
        match field {
            TeacherField::Gender => self.gender = Gender::from_code(raw),
            TeacherField::Religion => self.religion = Religion::from_code(raw),
            TeacherField::EmploymentStatus => {
                self.employment_status = EmploymentStatus::from_code(raw);
            }
            other => {
                if let Some(slot) = self.text_slot(other) {
                    *slot = Some(raw.to_string());
                }
            }
        }
    }

    fn set_flag(&mut self, field: TeacherField, on: bool) {
        if field == TeacherField::IsActive {
            self.is_active = Some(on);
        } else {
            warn!(?field, "Tried to toggle a field which isn't a toggle");
        }
    }
}

impl Entity for Teacher {
    type Draft = TeacherDraft;

    const NOUN: &'static str = "teacher";
    const ENDPOINT: &'static str = "guru";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> TeacherDraft {
        TeacherDraft {
            name: Some(self.name.clone()),
            gender: self.gender,
            religion: self.religion,
            birth_place: self.birth_place.clone(),
            birth_date: Some(self.birth_date.as_deref().map(calendar_date).unwrap_or_default()),
            phone: self.phone.clone(),
            email: self.email.clone(),
            nik: self.nik.clone(),
            nuptk: self.nuptk.clone(),
            nip: self.nip.clone(),
            employment_status: self.employment_status,
            address: self.address.clone(),
            is_active: Some(self.is_active),
            username: self.username.clone(),
            default_password: None,
        }
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn teacher_json() -> serde_json::Value {
        serde_json::json!({
            "id": "g-12",
            "nip": "198703152010011002",
            "nama": "Drs. Bambang Sutrisno, M.Pd.",
            "email": "bambang@sekolah.sch.id",
            "jenisKelamin": "L",
            "username": "198703152010011002",
            "agama": "Hindu",
            "tempatLahir": "Denpasar",
            "tanggalLahir": "1987-03-15T00:00:00.000Z",
            "noTelp": "081234567890",
            "nik": "5171031503870002",
            "nuptk": "1234567890123456",
            "statusKepegawaian": "GTY",
            "alamat": "Jl. Gatot Subroto 1",
            "isAktif": false,
            "waliKelas": { "namaKelas": "XI IPA 2" },
            "createdAt": "2024-01-10T02:30:00Z",
            "updatedAt": "2024-03-05T10:00:00Z"
        })
    }

    pub fn teacher() -> Teacher {
        serde_json::from_value(teacher_json()).expect("fixture is valid")
    }

    pub fn complete_create_draft() -> TeacherDraft {
        TeacherDraft {
            default_password: Some(InitialPassword::from("rahasia1".to_string())),
            ..teacher().to_draft()
        }
    }
}
