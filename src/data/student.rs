use crate::{
    config::date_display::calendar_date,
    data::{
        Draft, Entity, FieldId, FieldKind, FieldSpec, FieldValue, FormMode, RecordId,
        choices::{Gender, Religion, choice, lenient},
    },
};
use serde::{Deserialize, Serialize};

const ADDRESS_PREVIEW_CHARS: usize = 50;

choice! {
    StudentStatus {
        Active => "Active", "Aktif", "Active";
        Inactive => "Inactive", "Non Aktif", "Inactive";
        Graduated => "Graduated", "Lulus", "Graduated";
        Withdrawn => "Withdrawn", "Keluar", "Withdrawn";
        Transferred => "Transferred", "Pindah", "Transferred";
    }
}

impl Default for StudentStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Student {
    pub id: RecordId,
    #[serde(default)]
    pub nis: Option<String>,
    #[serde(default)]
    pub nisn: Option<String>,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "jenisKelamin", default, deserialize_with = "lenient")]
    pub gender: Option<Gender>,
    #[serde(rename = "agama", default, deserialize_with = "lenient")]
    pub religion: Option<Religion>,
    #[serde(rename = "tempatLahir", default)]
    pub birth_place: Option<String>,
    #[serde(rename = "tanggalLahir", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "pendidikanSebelumnya", default)]
    pub previous_school: Option<String>,
    #[serde(rename = "alamat", default)]
    pub address: Option<String>,
    #[serde(rename = "namaAyah", default)]
    pub father_name: Option<String>,
    #[serde(rename = "pekerjaanAyah", default)]
    pub father_occupation: Option<String>,
    #[serde(rename = "namaIbu", default)]
    pub mother_name: Option<String>,
    #[serde(rename = "pekerjaanIbu", default)]
    pub mother_occupation: Option<String>,
    #[serde(rename = "alamatOrtu", default)]
    pub parents_address: Option<String>,
    #[serde(rename = "namaWali", default)]
    pub guardian_name: Option<String>,
    #[serde(rename = "pekerjaanWali", default)]
    pub guardian_occupation: Option<String>,
    #[serde(rename = "alamatWali", default)]
    pub guardian_address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<StudentStatus>,
    #[serde(default)]
    pub nik: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

impl Student {
    pub fn short_address(&self) -> Option<String> {
        let address = self.address.as_deref().filter(|a| !a.trim().is_empty())?;
        let mut preview: String = address.chars().take(ADDRESS_PREVIEW_CHARS).collect();
        if address.chars().count() > ADDRESS_PREVIEW_CHARS {
            preview.push_str("...");
        }
        Some(preview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    Nik,
    Nisn,
    Name,
    Gender,
    Religion,
    BirthPlace,
    BirthDate,
    PreviousSchool,
    Address,
    FatherName,
    FatherOccupation,
    MotherName,
    MotherOccupation,
    ParentsAddress,
    GuardianName,
    GuardianOccupation,
    GuardianAddress,
    Status,
}

impl FieldId for StudentField {
    const ALL: &'static [Self] = &[
        Self::Nik,
        Self::Nisn,
        Self::Name,
        Self::Gender,
        Self::Religion,
        Self::BirthPlace,
        Self::BirthDate,
        Self::PreviousSchool,
        Self::Address,
        Self::FatherName,
        Self::FatherOccupation,
        Self::MotherName,
        Self::MotherOccupation,
        Self::ParentsAddress,
        Self::GuardianName,
        Self::GuardianOccupation,
        Self::GuardianAddress,
        Self::Status,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Nik => "nik",
            Self::Nisn => "nisn",
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Religion => "religion",
            Self::BirthPlace => "birth_place",
            Self::BirthDate => "birth_date",
            Self::PreviousSchool => "previous_school",
            Self::Address => "address",
            Self::FatherName => "father_name",
            Self::FatherOccupation => "father_occupation",
            Self::MotherName => "mother_name",
            Self::MotherOccupation => "mother_occupation",
            Self::ParentsAddress => "parents_address",
            Self::GuardianName => "guardian_name",
            Self::GuardianOccupation => "guardian_occupation",
            Self::GuardianAddress => "guardian_address",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nisn: Option<String>,
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
    #[serde(rename = "pendidikanSebelumnya", skip_serializing_if = "Option::is_none")]
    pub previous_school: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "namaAyah", skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(rename = "pekerjaanAyah", skip_serializing_if = "Option::is_none")]
    pub father_occupation: Option<String>,
    #[serde(rename = "namaIbu", skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(rename = "pekerjaanIbu", skip_serializing_if = "Option::is_none")]
    pub mother_occupation: Option<String>,
    #[serde(rename = "alamatOrtu", skip_serializing_if = "Option::is_none")]
    pub parents_address: Option<String>,
    #[serde(rename = "namaWali", skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(rename = "pekerjaanWali", skip_serializing_if = "Option::is_none")]
    pub guardian_occupation: Option<String>,
    #[serde(rename = "alamatWali", skip_serializing_if = "Option::is_none")]
    pub guardian_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            nik: None,
            nisn: None,
            name: None,
            gender: Some(Gender::default()),
            religion: Some(Religion::default()),
            birth_place: None,
            birth_date: None,
            previous_school: None,
            address: None,
            father_name: None,
            father_occupation: None,
            mother_name: None,
            mother_occupation: None,
            parents_address: None,
            guardian_name: None,
            guardian_occupation: None,
            guardian_address: None,
            status: Some(StudentStatus::default()),
        }
    }
}

impl StudentDraft {
    fn text_slot(&mut self, field: StudentField) -> Option<&mut Option<String>> {
        Some(match field {
            StudentField::Nik => &mut self.nik,
            StudentField::Nisn => &mut self.nisn,
            StudentField::Name => &mut self.name,
            StudentField::BirthPlace => &mut self.birth_place,
            StudentField::BirthDate => &mut self.birth_date,
            StudentField::PreviousSchool => &mut self.previous_school,
            StudentField::Address => &mut self.address,
            StudentField::FatherName => &mut self.father_name,
            StudentField::FatherOccupation => &mut self.father_occupation,
            StudentField::MotherName => &mut self.mother_name,
            StudentField::MotherOccupation => &mut self.mother_occupation,
            StudentField::ParentsAddress => &mut self.parents_address,
            StudentField::GuardianName => &mut self.guardian_name,
            StudentField::GuardianOccupation => &mut self.guardian_occupation,
            StudentField::GuardianAddress => &mut self.guardian_address,
            StudentField::Gender | StudentField::Religion | StudentField::Status => return None,
        })
    }
}

impl Draft for StudentDraft {
    type Field = StudentField;

    const LAYOUT: &'static [FieldSpec<StudentField>] = &[
        FieldSpec::new(StudentField::Nik, "Student NIK", FieldKind::Text),
        FieldSpec::new(StudentField::Nisn, "Student NISN", FieldKind::Text),
        FieldSpec::new(StudentField::Name, "Student Name", FieldKind::Text),
        FieldSpec::new(StudentField::Gender, "Sex", FieldKind::Choice(Gender::OPTIONS)),
        FieldSpec::new(
            StudentField::Religion,
            "Religion",
            FieldKind::Choice(Religion::OPTIONS),
        ),
        FieldSpec::new(StudentField::BirthPlace, "Place of Birth", FieldKind::Text),
        FieldSpec::new(StudentField::BirthDate, "Date of Birth", FieldKind::Date),
        FieldSpec::new(
            StudentField::PreviousSchool,
            "Previous School",
            FieldKind::Text,
        ),
        FieldSpec::new(StudentField::Address, "Student Address", FieldKind::LongText),
        FieldSpec::new(StudentField::FatherName, "Father's Name", FieldKind::Text),
        FieldSpec::new(
            StudentField::FatherOccupation,
            "Father's Occupation",
            FieldKind::Text,
        ),
        FieldSpec::new(StudentField::MotherName, "Mother's Name", FieldKind::Text),
        FieldSpec::new(
            StudentField::MotherOccupation,
            "Mother's Occupation",
            FieldKind::Text,
        ),
        FieldSpec::new(
            StudentField::ParentsAddress,
            "Parents' Address",
            FieldKind::LongText,
        ),
        FieldSpec::new(StudentField::GuardianName, "Guardian's Name", FieldKind::Text),
        FieldSpec::new(
            StudentField::GuardianOccupation,
            "Guardian's Occupation",
            FieldKind::Text,
        ),
        FieldSpec::new(
            StudentField::GuardianAddress,
            "Guardian's Address",
            FieldKind::LongText,
        ),
        FieldSpec::new(
            StudentField::Status,
            "Status",
            FieldKind::Choice(StudentStatus::OPTIONS),
        ),
    ];

    //every field on the form is mandatory
    const REQUIRED: &'static [StudentField] = StudentField::ALL;

    const DIGITS_ONLY: &'static [(StudentField, &'static str)] = &[
        (StudentField::Nik, "NIK may only contain digits."),
        (StudentField::Nisn, "NISN may only contain digits."),
    ];

    fn value(&self, field: StudentField) -> FieldValue<'_> {
        match field {
            StudentField::Gender => self.gender.map(Gender::code).into(),
            StudentField::Religion => self.religion.map(Religion::code).into(),
            StudentField::Status => self.status.map(StudentStatus::code).into(),
            StudentField::Nik => self.nik.as_deref().into(),
            StudentField::Nisn => self.nisn.as_deref().into(),
            StudentField::Name => self.name.as_deref().into(),
            StudentField::BirthPlace => self.birth_place.as_deref().into(),
            StudentField::BirthDate => self.birth_date.as_deref().into(),
            StudentField::PreviousSchool => self.previous_school.as_deref().into(),
            StudentField::Address => self.address.as_deref().into(),
            StudentField::FatherName => self.father_name.as_deref().into(),
            StudentField::FatherOccupation => self.father_occupation.as_deref().into(),
            StudentField::MotherName => self.mother_name.as_deref().into(),
            StudentField::MotherOccupation => self.mother_occupation.as_deref().into(),
            StudentField::ParentsAddress => self.parents_address.as_deref().into(),
            StudentField::GuardianName => self.guardian_name.as_deref().into(),
            StudentField::GuardianOccupation => self.guardian_occupation.as_deref().into(),
            StudentField::GuardianAddress => self.guardian_address.as_deref().into(),
        }
    }

    fn set_text(&mut self, field: StudentField, value: String, _mode: &FormMode) {
        match self.text_slot(field) {
            Some(slot) => *slot = Some(value),
            None => self.set_choice(field, &value),
        }
    }

    fn set_choice(&mut self, field: StudentField, raw: &str) {
        match field {
            StudentField::Gender => self.gender = Gender::from_code(raw),
            StudentField::Religion => self.religion = Religion::from_code(raw),
            StudentField::Status => self.status = StudentStatus::from_code(raw),
            other => {
                if let Some(slot) = self.text_slot(other) {
                    *slot = Some(raw.to_string());
                }
            }
        }
    }

    fn set_flag(&mut self, field: StudentField, _on: bool) {
        warn!(?field, "Student drafts have no toggles");
    }
}

impl Entity for Student {
    type Draft = StudentDraft;

    const NOUN: &'static str = "student";
    const ENDPOINT: &'static str = "siswa";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            nik: self.nik.clone(),
            nisn: self.nisn.clone(),
            name: Some(self.name.clone()),
            gender: self.gender,
            religion: self.religion,
            birth_place: self.birth_place.clone(),
            birth_date: Some(self.birth_date.as_deref().map(calendar_date).unwrap_or_default()),
            previous_school: self.previous_school.clone(),
            address: self.address.clone(),
            father_name: self.father_name.clone(),
            father_occupation: self.father_occupation.clone(),
            mother_name: self.mother_name.clone(),
            mother_occupation: self.mother_occupation.clone(),
            parents_address: self.parents_address.clone(),
            guardian_name: self.guardian_name.clone(),
            guardian_occupation: self.guardian_occupation.clone(),
            guardian_address: self.guardian_address.clone(),
            status: self.status,
        }
    }
}
