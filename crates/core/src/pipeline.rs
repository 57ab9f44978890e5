//! Derivation of the displayed doctor list from the full list and the committed filters.
//!
//! Stages run in a fixed order: search, consultation, specialty, sort. Each stage narrows or
//! reorders a list of borrowed records, so the input list is never touched and the output is
//! always a subsequence (before sorting) of the input.

use crate::{DoctorRecord, FilterState};
use directory_types::{ConsultationMode, SortKey, Specialty};

/// Apply every stage of the pipeline.
pub fn apply<'a>(doctors: &'a [DoctorRecord], filters: &FilterState) -> Vec<&'a DoctorRecord> {
    let list: Vec<&DoctorRecord> = doctors.iter().collect();
    let list = by_name(list, &filters.search);
    let list = by_consultation(list, filters.consultation);
    let list = by_specialties(list, &filters.specialties);
    sort(list, filters.sort)
}

/// Case-insensitive substring match on the name. An empty needle keeps everything.
pub fn name_matches(name: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || name.to_lowercase().contains(needle_lower)
}

fn by_name<'a>(list: Vec<&'a DoctorRecord>, search: &str) -> Vec<&'a DoctorRecord> {
    if search.is_empty() {
        return list;
    }
    let needle = search.to_lowercase();
    list.into_iter()
        .filter(|d| name_matches(&d.name, &needle))
        .collect()
}

fn by_consultation(
    list: Vec<&DoctorRecord>,
    mode: Option<ConsultationMode>,
) -> Vec<&DoctorRecord> {
    match mode {
        None => list,
        Some(ConsultationMode::VideoConsult) => {
            list.into_iter().filter(|d| d.video_consult).collect()
        }
        Some(ConsultationMode::InClinic) => list.into_iter().filter(|d| d.in_clinic).collect(),
    }
}

/// Keeps records offering every selected specialty.
fn by_specialties<'a>(
    list: Vec<&'a DoctorRecord>,
    selected: &[Specialty],
) -> Vec<&'a DoctorRecord> {
    if selected.is_empty() {
        return list;
    }
    list.into_iter()
        .filter(|d| selected.iter().all(|sp| d.has_speciality(sp.name())))
        .collect()
}

fn sort(mut list: Vec<&DoctorRecord>, key: Option<SortKey>) -> Vec<&DoctorRecord> {
    // `sort_by_key` is stable, so ties keep their filtered order.
    match key {
        None => {}
        Some(SortKey::Fees) => list.sort_by_key(|d| d.fee_amount()),
        Some(SortKey::Experience) => {
            list.sort_by_key(|d| std::cmp::Reverse(d.experience_years()))
        }
    }
    list
}
