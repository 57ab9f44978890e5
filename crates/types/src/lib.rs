//! Shared vocabulary for the doctor directory.
//!
//! The filter panel offers a closed set of choices: a consultation mode, one of the
//! twenty-four specialties and a sort order. Each choice has a display label, a value
//! written to the URL query string and a stable `data-testid` used by the rendered page.
//! Keeping them as enums means an unknown value can only enter the system through
//! [`std::str::FromStr`], where it is rejected.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a filter choice from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The value is not one of the known consultation modes
    #[error("unknown consultation mode: {0}")]
    UnknownConsultation(String),
    /// The value is not one of the twenty-four specialties
    #[error("unknown specialty: {0}")]
    UnknownSpecialty(String),
    /// The value is not a known sort key
    #[error("unknown sort key: {0}")]
    UnknownSort(String),
}

/// Replaces `/` and whitespace with `-` so a display name can be used inside a test id.
///
/// `Dietitian/Nutritionist` becomes `Dietitian-Nutritionist` and `General Physician`
/// becomes `General-Physician`.
pub fn sanitise_for_test_id(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c.is_whitespace() { '-' } else { c })
        .collect()
}

/// How a patient can see the doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsultationMode {
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    /// Both modes, in the order the filter panel shows them.
    pub const ALL: [ConsultationMode; 2] = [ConsultationMode::VideoConsult, ConsultationMode::InClinic];

    /// Display label, also used verbatim as the URL value.
    pub fn label(self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }

    pub fn test_id(self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "filter-video-consult",
            ConsultationMode::InClinic => "filter-in-clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConsultationMode {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConsultationMode::ALL
            .into_iter()
            .find(|mode| mode.label() == s)
            .ok_or_else(|| TypesError::UnknownConsultation(s.to_owned()))
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Ascending by fee amount
    Fees,
    /// Descending by years of experience
    Experience,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Fees, SortKey::Experience];

    /// Value written to the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Fees => "Fees (Low to High)",
            SortKey::Experience => "Experience (High to Low)",
        }
    }

    pub fn test_id(self) -> &'static str {
        match self {
            SortKey::Fees => "sort-fees",
            SortKey::Experience => "sort-experience",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TypesError::UnknownSort(s.to_owned()))
    }
}

/// A medical discipline from the fixed list offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Specialty {
    GeneralPhysician,
    Dentist,
    Dermatologist,
    Paediatrician,
    Gynaecologist,
    Ent,
    Diabetologist,
    Cardiologist,
    Physiotherapist,
    Endocrinologist,
    Orthopaedic,
    Ophthalmologist,
    Gastroenterologist,
    Pulmonologist,
    Psychiatrist,
    Urologist,
    DietitianNutritionist,
    Psychologist,
    Sexologist,
    Nephrologist,
    Neurologist,
    Oncologist,
    Ayurveda,
    Homeopath,
}

impl Specialty {
    /// Every specialty, in the order the filter panel lists them.
    pub const ALL: [Specialty; 24] = [
        Specialty::GeneralPhysician,
        Specialty::Dentist,
        Specialty::Dermatologist,
        Specialty::Paediatrician,
        Specialty::Gynaecologist,
        Specialty::Ent,
        Specialty::Diabetologist,
        Specialty::Cardiologist,
        Specialty::Physiotherapist,
        Specialty::Endocrinologist,
        Specialty::Orthopaedic,
        Specialty::Ophthalmologist,
        Specialty::Gastroenterologist,
        Specialty::Pulmonologist,
        Specialty::Psychiatrist,
        Specialty::Urologist,
        Specialty::DietitianNutritionist,
        Specialty::Psychologist,
        Specialty::Sexologist,
        Specialty::Nephrologist,
        Specialty::Neurologist,
        Specialty::Oncologist,
        Specialty::Ayurveda,
        Specialty::Homeopath,
    ];

    /// Display name, matched exactly against a record's speciality names.
    pub fn name(self) -> &'static str {
        match self {
            Specialty::GeneralPhysician => "General Physician",
            Specialty::Dentist => "Dentist",
            Specialty::Dermatologist => "Dermatologist",
            Specialty::Paediatrician => "Paediatrician",
            Specialty::Gynaecologist => "Gynaecologist",
            Specialty::Ent => "ENT",
            Specialty::Diabetologist => "Diabetologist",
            Specialty::Cardiologist => "Cardiologist",
            Specialty::Physiotherapist => "Physiotherapist",
            Specialty::Endocrinologist => "Endocrinologist",
            Specialty::Orthopaedic => "Orthopaedic",
            Specialty::Ophthalmologist => "Ophthalmologist",
            Specialty::Gastroenterologist => "Gastroenterologist",
            Specialty::Pulmonologist => "Pulmonologist",
            Specialty::Psychiatrist => "Psychiatrist",
            Specialty::Urologist => "Urologist",
            Specialty::DietitianNutritionist => "Dietitian/Nutritionist",
            Specialty::Psychologist => "Psychologist",
            Specialty::Sexologist => "Sexologist",
            Specialty::Nephrologist => "Nephrologist",
            Specialty::Neurologist => "Neurologist",
            Specialty::Oncologist => "Oncologist",
            Specialty::Ayurveda => "Ayurveda",
            Specialty::Homeopath => "Homeopath",
        }
    }

    /// Test id of the specialty's checkbox, e.g. `filter-specialty-General-Physician`.
    pub fn test_id(self) -> String {
        format!("filter-specialty-{}", sanitise_for_test_id(self.name()))
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Specialty {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.name() == s)
            .ok_or_else(|| TypesError::UnknownSpecialty(s.to_owned()))
    }
}

impl serde::Serialize for Specialty {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl serde::Serialize for ConsultationMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl serde::Serialize for SortKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn specialty_names_are_unique_and_comma_free() {
        let names: HashSet<&str> = Specialty::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), 24);
        assert!(names.iter().all(|n| !n.contains(',')));
    }

    #[test]
    fn specialty_test_ids_sanitise_slash_and_spaces() {
        assert_eq!(
            Specialty::DietitianNutritionist.test_id(),
            "filter-specialty-Dietitian-Nutritionist"
        );
        assert_eq!(
            Specialty::GeneralPhysician.test_id(),
            "filter-specialty-General-Physician"
        );
        assert_eq!(Specialty::Ent.test_id(), "filter-specialty-ENT");
    }

    #[test]
    fn sanitise_replaces_tabs_too() {
        assert_eq!(sanitise_for_test_id("a\tb/c d"), "a-b-c-d");
    }

    #[test]
    fn parses_every_specialty_from_its_name() {
        for sp in Specialty::ALL {
            assert_eq!(sp.name().parse::<Specialty>(), Ok(sp));
        }
    }

    #[test]
    fn rejects_case_mismatched_specialty() {
        let err = "dentist".parse::<Specialty>().expect_err("names are case-sensitive");
        assert_eq!(err, TypesError::UnknownSpecialty("dentist".into()));
    }

    #[test]
    fn consultation_labels_and_ids() {
        assert_eq!("Video Consult".parse::<ConsultationMode>(), Ok(ConsultationMode::VideoConsult));
        assert_eq!("In Clinic".parse::<ConsultationMode>(), Ok(ConsultationMode::InClinic));
        assert_eq!(ConsultationMode::InClinic.test_id(), "filter-in-clinic");
        assert!("video".parse::<ConsultationMode>().is_err());
    }

    #[test]
    fn sort_values_and_ids() {
        assert_eq!("fees".parse::<SortKey>(), Ok(SortKey::Fees));
        assert_eq!("experience".parse::<SortKey>(), Ok(SortKey::Experience));
        assert_eq!(SortKey::Experience.test_id(), "sort-experience");
        assert!("Fees".parse::<SortKey>().is_err());
    }

    #[test]
    fn serde_uses_display_values() {
        let json = serde_json::to_string(&vec![Specialty::Ent, Specialty::DietitianNutritionist])
            .expect("serialize");
        assert_eq!(json, r#"["ENT","Dietitian/Nutritionist"]"#);

        let json = serde_json::to_string(&(ConsultationMode::InClinic, SortKey::Experience))
            .expect("serialize");
        assert_eq!(json, r#"["In Clinic","experience"]"#);
    }
}
