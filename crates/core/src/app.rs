//! The directory page as a state machine.
//!
//! [`DirectoryApp`] owns the doctor list, the committed filters, the search box and the page
//! location. Everything the user does arrives as a [`UiEvent`]; the location is read at three
//! points only:
//!
//! - [`DirectoryApp::mount`] parses it into the initial filters
//! - every filter change writes it back with `replace_state` (no new history entry)
//! - [`DirectoryApp::navigated`] re-parses it after back/forward, replacing all filters at once
//!
//! The displayed list is derived on demand from the doctors and the filters, so it can never
//! drift from either.

use crate::autocomplete::{suggest, SearchBox};
use crate::pipeline;
use crate::query::{location_search, parse_query, History};
use crate::view::{render_html, render_table, Page};
use crate::{DirectoryConfig, DoctorRecord, FilterState};
use directory_types::{ConsultationMode, SortKey, Specialty};
use std::time::Instant;

/// Whether the doctor list has arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Something the user did on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// The search input's text changed.
    Input(String),
    /// The search input gained focus.
    Focus,
    /// The search input lost focus.
    Blur { at: Instant },
    /// Enter pressed in the search input.
    Enter,
    /// Pointer-down on the n-th visible suggestion.
    SuggestionPointerDown { index: usize, at: Instant },
    /// Time has advanced; closes the dropdown once a blur deadline passes.
    Tick { now: Instant },
    /// A consultation radio was chosen.
    SelectConsultation(ConsultationMode),
    /// A specialty checkbox was clicked.
    ToggleSpecialty(Specialty),
    /// A sort radio was chosen.
    SelectSort(SortKey),
}

/// The doctor directory page.
pub struct DirectoryApp<H: History> {
    doctors: Vec<DoctorRecord>,
    load_state: LoadState,
    filters: FilterState,
    search: SearchBox,
    history: H,
}

impl<H: History> DirectoryApp<H> {
    /// Mount the page: read the filters from the location and start loading.
    pub fn mount(history: H, config: &DirectoryConfig) -> Self {
        let filters = parse_query(&history.location_search());
        let mut search = SearchBox::new(config.blur_grace());
        search.seed(&filters.search);

        let mut app = Self {
            doctors: Vec::new(),
            load_state: LoadState::Loading,
            filters,
            search,
            history,
        };
        app.write_location();
        app
    }

    /// Store the fetched list and leave the loading state.
    ///
    /// The list is loaded once per session; later calls are ignored.
    pub fn finish_loading(&mut self, doctors: Vec<DoctorRecord>) {
        if self.load_state == LoadState::Ready {
            tracing::warn!("doctor list already loaded; ignoring {} records", doctors.len());
            return;
        }
        tracing::debug!("doctor list ready with {} records", doctors.len());
        self.doctors = doctors;
        self.load_state = LoadState::Ready;
    }

    /// Dispatch a UI event.
    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Input(text) => self.search.input(&text),
            UiEvent::Focus => self.search.focus(),
            UiEvent::Blur { at } => self.search.blur(at),
            UiEvent::Tick { now } => {
                self.search.tick(now);
            }
            UiEvent::Enter => {
                let text = self.search.enter();
                self.commit_search(text);
            }
            UiEvent::SuggestionPointerDown { index, at } => {
                self.pick_suggestion(index, at);
            }
            UiEvent::SelectConsultation(mode) => {
                self.filters.consultation = Some(mode);
                self.write_location();
            }
            UiEvent::ToggleSpecialty(specialty) => {
                self.filters.toggle_specialty(specialty);
                self.write_location();
            }
            UiEvent::SelectSort(key) => {
                self.filters.sort = Some(key);
                self.write_location();
            }
        }
    }

    /// Pointer-down on the `index`-th suggestion at `at`.
    ///
    /// Returns `true` when the suggestion was committed, `false` when the dropdown was closed,
    /// its blur deadline had passed or there is no such suggestion.
    pub fn pick_suggestion(&mut self, index: usize, at: Instant) -> bool {
        let suggestions = suggest(&self.doctors, self.search.buffer());
        match self.search.pick(&suggestions, index, at) {
            Some(name) => {
                self.commit_search(name);
                true
            }
            None => false,
        }
    }

    /// The location changed through back/forward: replace every filter from it.
    pub fn navigated(&mut self) {
        self.filters = parse_query(&self.history.location_search());
        self.search.seed(&self.filters.search);
        tracing::debug!("filters restored from navigation: {:?}", self.filters);
        self.write_location();
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_box(&self) -> &SearchBox {
        &self.search
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for navigation; call [`DirectoryApp::navigated`] afterwards.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// The filtered and sorted list.
    pub fn displayed(&self) -> Vec<&DoctorRecord> {
        pipeline::apply(&self.doctors, &self.filters)
    }

    /// Suggestions for the current search buffer; empty while the dropdown is closed.
    pub fn suggestions(&self) -> Vec<&DoctorRecord> {
        if !self.search.is_open() {
            return Vec::new();
        }
        suggest(&self.doctors, self.search.buffer())
    }

    pub fn page(&self) -> Page<'_> {
        Page {
            filters: &self.filters,
            search: &self.search,
            suggestions: self.suggestions(),
            doctors: self.displayed(),
            loading: self.is_loading(),
        }
    }

    pub fn render_html(&self) -> String {
        render_html(&self.page())
    }

    pub fn render_table(&self) -> String {
        render_table(&self.page())
    }

    fn commit_search(&mut self, text: String) {
        if self.filters.search != text {
            tracing::debug!("search committed: {text:?}");
        }
        self.filters.search = text;
        self.write_location();
    }

    fn write_location(&mut self) {
        let search = location_search(&self.filters);
        self.history.replace_state(&search);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::doctor;
    use crate::query::SessionHistory;
    use crate::SearchPhase;
    use std::time::Duration;

    fn config() -> DirectoryConfig {
        DirectoryConfig::default()
    }

    fn doctors() -> Vec<DoctorRecord> {
        let mut list = vec![
            doctor("1", "Anil", "₹500", "10 Years", &["Dentist"]),
            doctor("2", "Anita", "₹200", "5 Years", &["Dentist", "ENT"]),
            doctor("3", "Anjali", "₹300", "7 Years", &["Ayurveda"]),
            doctor("4", "Banerjee", "₹800", "20 Years", &["ENT"]),
        ];
        list[0].video_consult = true;
        list[1].in_clinic = true;
        list[3].in_clinic = true;
        list
    }

    fn loaded(search: &str) -> DirectoryApp<SessionHistory> {
        let mut app = DirectoryApp::mount(SessionHistory::new(search), &config());
        app.finish_loading(doctors());
        app
    }

    fn names(list: &[&DoctorRecord]) -> Vec<String> {
        list.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn mount_reads_filters_and_seeds_search_box() {
        let app = DirectoryApp::mount(
            SessionHistory::new("?search=an&sort=fees&specialties=Dentist"),
            &config(),
        );
        assert!(app.is_loading());
        assert_eq!(app.filters().search, "an");
        assert_eq!(app.filters().sort, Some(SortKey::Fees));
        assert_eq!(app.search_box().buffer(), "an");
        assert!(!app.search_box().is_open());
        assert!(app.displayed().is_empty());
        assert!(app.render_html().contains("Loading doctors..."));
    }

    #[test]
    fn mount_normalises_the_location() {
        let app = DirectoryApp::mount(
            SessionHistory::new("?sort=rating&consultation=In+Clinic&utm=x"),
            &config(),
        );
        assert_eq!(app.history().location_search(), "?consultation=In+Clinic");
    }

    #[test]
    fn filters_apply_once_loaded() {
        let app = loaded("?specialties=Dentist&sort=experience");
        assert_eq!(names(&app.displayed()), ["Anil", "Anita"]);
        assert_eq!(app.load_state(), LoadState::Ready);
    }

    #[test]
    fn second_load_is_ignored() {
        let mut app = loaded("");
        app.finish_loading(Vec::new());
        assert_eq!(app.doctors().len(), 4);
    }

    #[test]
    fn failed_load_shows_empty_state() {
        let mut app = DirectoryApp::mount(SessionHistory::default(), &config());
        app.finish_loading(Vec::new());
        assert!(!app.is_loading());
        assert!(app.render_html().contains("No doctors found."));
    }

    #[test]
    fn filter_events_write_the_location() {
        let mut app = loaded("");
        app.handle(UiEvent::SelectConsultation(ConsultationMode::InClinic));
        app.handle(UiEvent::ToggleSpecialty(Specialty::Ent));
        app.handle(UiEvent::SelectSort(SortKey::Fees));
        assert_eq!(
            app.history().location_search(),
            "?consultation=In+Clinic&specialties=ENT&sort=fees"
        );
        assert_eq!(names(&app.displayed()), ["Anita", "Banerjee"]);

        app.handle(UiEvent::SelectSort(SortKey::Experience));
        app.handle(UiEvent::ToggleSpecialty(Specialty::Ent));
        assert_eq!(
            app.history().location_search(),
            "?consultation=In+Clinic&sort=experience"
        );
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn typing_suggests_without_filtering() {
        let mut app = loaded("");
        app.handle(UiEvent::Input("an".into()));
        assert_eq!(names(&app.suggestions()), ["Anil", "Anita", "Anjali"]);
        assert_eq!(app.displayed().len(), 4);
        assert_eq!(app.history().location_search(), "");
        assert_eq!(
            app.render_html().matches("data-testid=\"suggestion-item\"").count(),
            3
        );
    }

    #[test]
    fn enter_commits_the_buffer() {
        let mut app = loaded("");
        app.handle(UiEvent::Input("ani".into()));
        app.handle(UiEvent::Enter);
        assert_eq!(app.filters().search, "ani");
        assert!(app.suggestions().is_empty());
        assert_eq!(names(&app.displayed()), ["Anil", "Anita"]);
        assert_eq!(app.history().location_search(), "?search=ani");
    }

    #[test]
    fn pick_during_blur_commits_the_suggestion() {
        let mut app = loaded("");
        let t0 = Instant::now();
        app.handle(UiEvent::Input("an".into()));
        app.handle(UiEvent::Blur { at: t0 });
        app.handle(UiEvent::SuggestionPointerDown {
            index: 1,
            at: t0 + Duration::from_millis(10),
        });
        app.handle(UiEvent::Tick {
            now: t0 + Duration::from_secs(1),
        });

        assert_eq!(app.filters().search, "Anita");
        assert_eq!(app.search_box().buffer(), "Anita");
        assert_eq!(app.search_box().phase(), SearchPhase::Committed);
        assert_eq!(names(&app.displayed()), ["Anita"]);
    }

    #[test]
    fn pick_reports_whether_it_committed() {
        let mut app = loaded("");
        let t0 = Instant::now();
        app.handle(UiEvent::Input("Anil".into()));
        app.handle(UiEvent::Enter);
        app.handle(UiEvent::Focus);
        assert_eq!(app.search_box().buffer(), app.filters().search);

        assert!(!app.pick_suggestion(9, t0));
        assert_eq!(app.filters().search, "Anil");
        assert!(app.pick_suggestion(0, t0));
        assert_eq!(app.search_box().phase(), SearchPhase::Committed);

        assert!(!app.pick_suggestion(0, t0));
    }

    #[test]
    fn blur_without_pick_closes_after_grace() {
        let mut app = loaded("");
        let t0 = Instant::now();
        app.handle(UiEvent::Input("an".into()));
        app.handle(UiEvent::Blur { at: t0 });
        assert_eq!(app.suggestions().len(), 3);

        app.handle(UiEvent::Tick {
            now: t0 + config().blur_grace(),
        });
        assert!(app.suggestions().is_empty());
        assert_eq!(app.filters().search, "");
    }

    #[test]
    fn navigation_replaces_every_filter() {
        let mut app = loaded("?consultation=In+Clinic&specialties=ENT");
        app.history_mut().push("?search=anil");
        app.navigated();
        assert_eq!(
            app.filters(),
            &FilterState {
                search: "anil".into(),
                ..FilterState::default()
            }
        );
        assert_eq!(app.search_box().buffer(), "anil");

        assert!(app.history_mut().back());
        app.navigated();
        assert_eq!(app.filters().consultation, Some(ConsultationMode::InClinic));
        assert_eq!(app.filters().specialties, vec![Specialty::Ent]);
        assert_eq!(app.filters().search, "");
        assert_eq!(names(&app.displayed()), ["Anita", "Banerjee"]);
    }

    #[test]
    fn location_and_filters_agree_after_every_event() {
        let mut app = loaded("?sort=fees");
        let t0 = Instant::now();
        let events = vec![
            UiEvent::ToggleSpecialty(Specialty::Dentist),
            UiEvent::Input("an".into()),
            UiEvent::SuggestionPointerDown { index: 0, at: t0 },
            UiEvent::SelectConsultation(ConsultationMode::VideoConsult),
            UiEvent::ToggleSpecialty(Specialty::DietitianNutritionist),
            UiEvent::Input("".into()),
            UiEvent::Enter,
            UiEvent::SelectSort(SortKey::Experience),
        ];
        for event in events {
            app.handle(event);
            assert_eq!(
                parse_query(&app.history().location_search()),
                *app.filters()
            );
        }
    }
}
