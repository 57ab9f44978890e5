//! Rendering of the directory page.
//!
//! [`render_html`] produces the page markup. Every interactive element and every displayed
//! doctor field carries a `data-testid`; those ids are a contract with automated tests and must
//! not change:
//!
//! | element                      | test id                                   |
//! |------------------------------|-------------------------------------------|
//! | search input                 | `autocomplete-input`                      |
//! | each suggestion              | `suggestion-item`                         |
//! | filter group headers         | `filter-header-moc`, `filter-header-speciality`, `filter-header-sort` |
//! | consultation radios          | `filter-video-consult`, `filter-in-clinic` |
//! | specialty checkboxes         | `filter-specialty-<name>` (`/` and whitespace become `-`) |
//! | sort radios                  | `sort-fees`, `sort-experience`            |
//! | doctor card and its fields   | `doctor-card`, `doctor-name`, `doctor-specialty`, `doctor-experience`, `doctor-fee` |
//!
//! [`render_table`] is the terminal counterpart used by the binaries.

use crate::{DoctorRecord, FilterState, SearchBox};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use directory_types::{ConsultationMode, SortKey, Specialty};
use std::fmt::Write;

pub const TESTID_SEARCH_INPUT: &str = "autocomplete-input";
pub const TESTID_SUGGESTION: &str = "suggestion-item";
pub const TESTID_HEADER_CONSULTATION: &str = "filter-header-moc";
pub const TESTID_HEADER_SPECIALITY: &str = "filter-header-speciality";
pub const TESTID_HEADER_SORT: &str = "filter-header-sort";
pub const TESTID_CARD: &str = "doctor-card";
pub const TESTID_NAME: &str = "doctor-name";
pub const TESTID_SPECIALTY: &str = "doctor-specialty";
pub const TESTID_EXPERIENCE: &str = "doctor-experience";
pub const TESTID_FEE: &str = "doctor-fee";

pub const LOADING_MESSAGE: &str = "Loading doctors...";
pub const EMPTY_MESSAGE: &str = "No doctors found.";
pub const NO_SPECIALTIES: &str = "No specialties listed";

/// Everything one render needs, borrowed from the app.
pub struct Page<'a> {
    pub filters: &'a FilterState,
    pub search: &'a SearchBox,
    pub suggestions: Vec<&'a DoctorRecord>,
    pub doctors: Vec<&'a DoctorRecord>,
    pub loading: bool,
}

/// Render the whole page as HTML.
pub fn render_html(page: &Page<'_>) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"container\">\n");
    render_header(&mut out, page);
    out.push_str("<main>\n");
    render_filter_panel(&mut out, page.filters);
    render_doctor_list(&mut out, page);
    out.push_str("</main>\n</div>\n");
    out
}

fn render_header(out: &mut String, page: &Page<'_>) {
    out.push_str("<header>\n<h2>Doctor Listing</h2>\n<div class=\"autocomplete-header\">\n");
    let _ = writeln!(
        out,
        "<input data-testid=\"{TESTID_SEARCH_INPUT}\" value=\"{}\" placeholder=\"Search doctor by name\" autocomplete=\"off\" aria-label=\"Search doctor by name\">",
        escape(page.search.buffer())
    );

    if page.search.is_open() && !page.suggestions.is_empty() {
        out.push_str("<div class=\"suggestion-dropdown\">\n");
        for doctor in &page.suggestions {
            let _ = writeln!(
                out,
                "<div data-testid=\"{TESTID_SUGGESTION}\" class=\"suggestion-item\" data-id=\"{}\">{}</div>",
                escape(&doctor.id),
                escape(&doctor.name)
            );
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</header>\n");
}

fn render_filter_panel(out: &mut String, filters: &FilterState) {
    out.push_str("<aside class=\"filter-panel\">\n");

    let _ = writeln!(
        out,
        "<div>\n<div data-testid=\"{TESTID_HEADER_CONSULTATION}\" class=\"filter-header\">Consultation Mode</div>"
    );
    for mode in ConsultationMode::ALL {
        radio(
            out,
            "consultation",
            mode.test_id(),
            mode.label(),
            mode.label(),
            filters.consultation == Some(mode),
        );
    }
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        "<div>\n<div data-testid=\"{TESTID_HEADER_SPECIALITY}\" class=\"filter-header\">Speciality</div>\n<div class=\"specialty-list\">"
    );
    for specialty in Specialty::ALL {
        let _ = writeln!(
            out,
            "<label><input type=\"checkbox\" data-testid=\"{}\" value=\"{}\"{}>{}</label>",
            specialty.test_id(),
            escape(specialty.name()),
            checked(filters.is_selected(specialty)),
            escape(specialty.name())
        );
    }
    out.push_str("</div>\n</div>\n");

    let _ = writeln!(
        out,
        "<div>\n<div data-testid=\"{TESTID_HEADER_SORT}\" class=\"filter-header\">Sort</div>"
    );
    for key in SortKey::ALL {
        radio(
            out,
            "sort",
            key.test_id(),
            key.as_str(),
            key.label(),
            filters.sort == Some(key),
        );
    }
    out.push_str("</div>\n</aside>\n");
}

fn radio(out: &mut String, group: &str, test_id: &str, value: &str, label: &str, is_checked: bool) {
    let _ = writeln!(
        out,
        "<label><input type=\"radio\" name=\"{group}\" data-testid=\"{test_id}\" value=\"{}\"{}>{}</label>",
        escape(value),
        checked(is_checked),
        escape(label)
    );
}

fn checked(is_checked: bool) -> &'static str {
    if is_checked {
        " checked"
    } else {
        ""
    }
}

fn render_doctor_list(out: &mut String, page: &Page<'_>) {
    out.push_str("<section class=\"doctor-list\">\n");
    if page.loading {
        let _ = writeln!(out, "<div>{LOADING_MESSAGE}</div>");
    } else if page.doctors.is_empty() {
        let _ = writeln!(out, "<div>{EMPTY_MESSAGE}</div>");
    } else {
        for doctor in &page.doctors {
            render_card(out, doctor);
        }
    }
    out.push_str("</section>\n");
}

fn render_card(out: &mut String, doctor: &DoctorRecord) {
    let _ = writeln!(out, "<div class=\"doctor-card\" data-testid=\"{TESTID_CARD}\">");

    match &doctor.photo {
        Some(photo) => {
            let _ = writeln!(
                out,
                "<img class=\"doctor-avatar\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape(photo),
                escape(&doctor.name)
            );
        }
        None => {
            let _ = writeln!(
                out,
                "<div class=\"doctor-avatar doctor-initials\">{}</div>",
                escape(&doctor.initials())
            );
        }
    }

    out.push_str("<div class=\"doctor-info\">\n");
    let specialties = doctor
        .speciality_line()
        .unwrap_or_else(|| NO_SPECIALTIES.to_string());
    field(out, TESTID_NAME, "doctor-name", &doctor.name);
    field(out, TESTID_SPECIALTY, "doctor-specialty", &specialties);
    field(
        out,
        TESTID_EXPERIENCE,
        "doctor-experience",
        doctor.experience.as_deref().unwrap_or_default(),
    );
    field(out, TESTID_FEE, "doctor-fee", doctor.fees.as_deref().unwrap_or_default());

    if let Some(languages) = doctor.languages.as_ref().filter(|l| !l.is_empty()) {
        let _ = writeln!(
            out,
            "<div class=\"doctor-languages\"><span class=\"detail-label\">Languages:</span> {}</div>",
            escape(&languages.join(", "))
        );
    }

    if let Some(intro) = doctor.doctor_introduction.as_ref().filter(|i| !i.is_empty()) {
        let _ = writeln!(out, "<div class=\"doctor-introduction\">{}</div>", escape(intro));
    }

    if let Some(clinic) = &doctor.clinic {
        let _ = write!(
            out,
            "<div class=\"doctor-clinic\"><span class=\"detail-label\">Clinic:</span> {}",
            escape(&clinic.name)
        );
        if let Some(address) = &clinic.address {
            let _ = write!(
                out,
                "<div class=\"clinic-address\">{}</div>",
                escape(&address.one_line())
            );
        }
        out.push_str("</div>\n");
    }

    out.push_str("<div class=\"consultation-options\">");
    if doctor.video_consult {
        out.push_str("<span class=\"consult-badge video\">Video Consult</span>");
    }
    if doctor.in_clinic {
        out.push_str("<span class=\"consult-badge clinic\">In Clinic</span>");
    }
    out.push_str("</div>\n");

    out.push_str("<button class=\"book-btn\" type=\"button\">Book Appointment</button>\n");
    out.push_str("</div>\n</div>\n");
}

fn field(out: &mut String, test_id: &str, class: &str, text: &str) {
    let _ = writeln!(
        out,
        "<div data-testid=\"{test_id}\" class=\"{class}\">{}</div>",
        escape(text)
    );
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the displayed doctors as a terminal table.
pub fn render_table(page: &Page<'_>) -> String {
    if page.loading {
        return LOADING_MESSAGE.to_string();
    }
    if page.doctors.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "", "Name", "Speciality", "Experience", "Fee", "Consultation",
    ]);

    for doctor in &page.doctors {
        let mut modes = Vec::new();
        if doctor.video_consult {
            modes.push(ConsultationMode::VideoConsult.label());
        }
        if doctor.in_clinic {
            modes.push(ConsultationMode::InClinic.label());
        }
        table.add_row(vec![
            doctor.initials(),
            doctor.name.clone(),
            doctor
                .speciality_line()
                .unwrap_or_else(|| NO_SPECIALTIES.to_string()),
            doctor.experience.clone().unwrap_or_default(),
            doctor.fees.clone().unwrap_or_default(),
            modes.join(", "),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::doctor;
    use crate::record::{Clinic, ClinicAddress};
    use std::time::Duration;

    fn page<'a>(
        filters: &'a FilterState,
        search: &'a SearchBox,
        doctors: Vec<&'a DoctorRecord>,
        loading: bool,
    ) -> Page<'a> {
        Page {
            filters,
            search,
            suggestions: Vec::new(),
            doctors,
            loading,
        }
    }

    #[test]
    fn renders_every_filter_test_id() {
        let filters = FilterState::default();
        let search = SearchBox::new(Duration::ZERO);
        let html = render_html(&page(&filters, &search, Vec::new(), false));

        for id in [
            TESTID_SEARCH_INPUT,
            TESTID_HEADER_CONSULTATION,
            TESTID_HEADER_SPECIALITY,
            TESTID_HEADER_SORT,
            "filter-video-consult",
            "filter-in-clinic",
            "sort-fees",
            "sort-experience",
            "filter-specialty-Dietitian-Nutritionist",
            "filter-specialty-General-Physician",
        ] {
            assert!(html.contains(&format!("data-testid=\"{id}\"")), "missing {id}");
        }
        assert_eq!(html.matches("type=\"checkbox\"").count(), 24);
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn marks_selected_filters() {
        let filters = FilterState {
            consultation: Some(ConsultationMode::InClinic),
            specialties: vec![Specialty::Ent],
            sort: Some(SortKey::Experience),
            ..FilterState::default()
        };
        let search = SearchBox::new(Duration::ZERO);
        let html = render_html(&page(&filters, &search, Vec::new(), false));

        assert!(html.contains("data-testid=\"filter-in-clinic\" value=\"In Clinic\" checked>"));
        assert!(html.contains("data-testid=\"filter-specialty-ENT\" value=\"ENT\" checked>"));
        assert!(html.contains("data-testid=\"sort-experience\" value=\"experience\" checked>"));
        assert_eq!(html.matches(" checked>").count(), 3);
    }

    #[test]
    fn loading_hides_empty_state() {
        let filters = FilterState::default();
        let search = SearchBox::new(Duration::ZERO);
        let html = render_html(&page(&filters, &search, Vec::new(), true));
        assert!(html.contains(LOADING_MESSAGE));
        assert!(!html.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn renders_card_fields_and_escapes_text() {
        let mut d = doctor("7", "Dr. <Ravi> Kumar", "₹ 500", "8 Years", &[]);
        d.video_consult = true;
        d.languages = Some(vec!["Tamil".into(), "English".into()]);
        d.doctor_introduction = Some("Treats \"everything\"".into());
        d.clinic = Some(Clinic {
            name: "City Care".into(),
            address: Some(ClinicAddress {
                address_line1: "12 Main Rd".into(),
                locality: "Adyar".into(),
                city: "Chennai".into(),
            }),
        });

        let filters = FilterState::default();
        let search = SearchBox::new(Duration::ZERO);
        let html = render_html(&page(&filters, &search, vec![&d], false));

        assert_eq!(html.matches("data-testid=\"doctor-card\"").count(), 1);
        assert!(html.contains("class=\"doctor-name\">Dr. &lt;Ravi&gt; Kumar</div>"));
        assert!(html.contains("class=\"doctor-specialty\">No specialties listed</div>"));
        assert!(html.contains("class=\"doctor-experience\">8 Years</div>"));
        assert!(html.contains("class=\"doctor-fee\">₹ 500</div>"));
        assert!(html.contains("Languages:</span> Tamil, English"));
        assert!(html.contains("Treats &quot;everything&quot;"));
        assert!(html.contains("12 Main Rd, Adyar, Chennai"));
        assert!(html.contains("consult-badge video"));
        assert!(!html.contains("consult-badge clinic"));
        assert!(html.contains("doctor-initials\">D&lt;</div>"));
        assert!(html.contains("Book Appointment"));
    }

    #[test]
    fn photo_replaces_initials() {
        let mut d = doctor("7", "Dr. Ravi", "", "", &["Dentist"]);
        d.photo = Some("https://img.example/r.jpg".into());
        let filters = FilterState::default();
        let search = SearchBox::new(Duration::ZERO);
        let html = render_html(&page(&filters, &search, vec![&d], false));
        assert!(html.contains("<img class=\"doctor-avatar\" src=\"https://img.example/r.jpg\""));
        assert!(!html.contains("doctor-initials"));
        assert!(html.contains("class=\"doctor-specialty\">Dentist</div>"));
    }

    #[test]
    fn dropdown_only_when_open_with_suggestions() {
        let d = doctor("1", "Anil", "", "", &[]);
        let filters = FilterState::default();
        let mut search = SearchBox::new(Duration::ZERO);
        search.input("an");

        let mut open = page(&filters, &search, Vec::new(), false);
        open.suggestions = vec![&d];
        let html = render_html(&open);
        assert!(html.contains("data-testid=\"suggestion-item\""));
        assert!(html.contains("value=\"an\""));

        let empty = page(&filters, &search, Vec::new(), false);
        assert!(!render_html(&empty).contains("suggestion-dropdown"));
    }

    #[test]
    fn table_lists_rows_or_messages() {
        let filters = FilterState::default();
        let search = SearchBox::new(Duration::ZERO);
        assert_eq!(render_table(&page(&filters, &search, Vec::new(), true)), LOADING_MESSAGE);
        assert_eq!(render_table(&page(&filters, &search, Vec::new(), false)), EMPTY_MESSAGE);

        let mut d = doctor("1", "Dr. Anil", "₹ 500", "9 Years", &["ENT"]);
        d.in_clinic = true;
        let table = render_table(&page(&filters, &search, vec![&d], false));
        assert!(table.contains("Dr. Anil"));
        assert!(table.contains("In Clinic"));
    }
}
