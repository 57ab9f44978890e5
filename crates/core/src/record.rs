//! Doctor records as served by the directory endpoint.
//!
//! The wire shape is tolerant: unknown keys are ignored, and missing or `null` fields fall back
//! to empty values, so one sparse record does not hide the rest of the list. Fees and
//! experience stay as the free text the endpoint sends (`"₹ 500"`, `"13 Years of experience"`);
//! [`amount_in`] extracts the number when sorting needs it.

use serde::{Deserialize, Deserializer, Serialize};

/// One doctor as listed by the directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialities: Vec<Speciality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_clinic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<Clinic>,
}

/// A named speciality attached to a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<ClinicAddress>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicAddress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_line1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
}

impl DoctorRecord {
    /// Whether the record lists a speciality with exactly this name.
    pub fn has_speciality(&self, name: &str) -> bool {
        self.specialities.iter().any(|s| s.name == name)
    }

    /// Speciality names joined with `", "`, or `None` when the record lists none.
    pub fn speciality_line(&self) -> Option<String> {
        if self.specialities.is_empty() {
            return None;
        }
        Some(
            self.specialities
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Fee amount with currency symbols and text stripped; `0` when absent.
    pub fn fee_amount(&self) -> u64 {
        amount_in(self.fees.as_deref())
    }

    /// Years of experience with trailing text stripped; `0` when absent.
    pub fn experience_years(&self) -> u64 {
        amount_in(self.experience.as_deref())
    }

    /// Two upper-case initials taken from the first letters of the name's first two words.
    ///
    /// Returns `"DR"` when the record has no name.
    pub fn initials(&self) -> String {
        if self.name.is_empty() {
            return "DR".to_string();
        }
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl ClinicAddress {
    /// `line1, locality, city`, keeping empty parts so the layout matches the page.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.address_line1, self.locality, self.city)
    }
}

/// Extract the integer formed by every ASCII digit in `text`.
///
/// `"₹ 1,200"` yields `1200`; absent text or text without digits yields `0`. Digit runs too
/// long for a `u64` saturate to `u64::MAX`.
pub fn amount_in(text: Option<&str>) -> u64 {
    let digits: String = text
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
