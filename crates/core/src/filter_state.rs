use directory_types::{ConsultationMode, SortKey, Specialty};
use serde::Serialize;

/// The filters the user has committed.
///
/// Mirrored into the URL query string by [`crate::query`]. `specialties` keeps the order in
/// which the user ticked them and never holds duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search: String,
    pub consultation: Option<ConsultationMode>,
    pub specialties: Vec<Specialty>,
    pub sort: Option<SortKey>,
}

impl FilterState {
    /// Tick the specialty if it is unticked, untick it otherwise.
    pub fn toggle_specialty(&mut self, specialty: Specialty) {
        if let Some(pos) = self.specialties.iter().position(|s| *s == specialty) {
            self.specialties.remove(pos);
        } else {
            self.specialties.push(specialty);
        }
    }

    /// Tick the specialty, keeping the list free of duplicates.
    pub fn select_specialty(&mut self, specialty: Specialty) {
        if !self.is_selected(specialty) {
            self.specialties.push(specialty);
        }
    }

    pub fn is_selected(&self, specialty: Specialty) -> bool {
        self.specialties.contains(&specialty)
    }

    /// True when no filter or sort is active.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = FilterState::default();
        state.toggle_specialty(Specialty::Dentist);
        state.toggle_specialty(Specialty::Ent);
        assert_eq!(state.specialties, vec![Specialty::Dentist, Specialty::Ent]);

        state.toggle_specialty(Specialty::Dentist);
        assert_eq!(state.specialties, vec![Specialty::Ent]);
        assert!(!state.is_selected(Specialty::Dentist));
    }

    #[test]
    fn select_is_idempotent() {
        let mut state = FilterState::default();
        state.select_specialty(Specialty::Ayurveda);
        state.select_specialty(Specialty::Ayurveda);
        assert_eq!(state.specialties, vec![Specialty::Ayurveda]);
        assert!(!state.is_default());
    }
}
