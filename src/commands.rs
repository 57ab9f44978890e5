//! Line commands understood by the interactive session.

use directory_core::{ConsultationMode, SortKey, Specialty};
use directory_types::sanitise_for_test_id;

pub const HELP: &str = "\
Commands:
  type <text>          change the search box text (empty text clears it)
  focus | blur         focus or blur the search box
  enter                commit the search box text
  pick <n>             select the n-th suggestion (1-based)
  consult video|clinic choose a consultation mode
  toggle <specialty>   tick or untick a specialty, e.g. 'toggle ENT'
  sort fees|experience choose the sort order
  open <query>         navigate to a new query string, e.g. 'open ?sort=fees'
  back | forward       move through the session history
  show                 print the displayed doctors
  url                  print the current location
  html [path]          print the page as HTML, or write it to a file
  help                 show this help
  quit                 leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Focus,
    Blur,
    Enter,
    Pick(usize),
    Consult(ConsultationMode),
    Toggle(Specialty),
    Sort(SortKey),
    Open(String),
    Back,
    Forward,
    Show,
    Url,
    Html(Option<String>),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (word, raw_rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };
        let rest = raw_rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            // Everything after the single separator, spaces included.
            "type" => Command::Type(raw_rest.to_string()),
            "focus" => Command::Focus,
            "blur" => Command::Blur,
            "enter" => Command::Enter,
            "pick" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| format!("expected a suggestion number, got '{rest}'"))?;
                if n == 0 {
                    return Err("suggestions are numbered from 1".into());
                }
                Command::Pick(n - 1)
            }
            "consult" => match rest.to_ascii_lowercase().as_str() {
                "video" | "video consult" => Command::Consult(ConsultationMode::VideoConsult),
                "clinic" | "in clinic" => Command::Consult(ConsultationMode::InClinic),
                _ => return Err(format!("unknown consultation mode '{rest}'")),
            },
            "toggle" => Command::Toggle(find_specialty(rest)?),
            "sort" => Command::Sort(
                rest.to_ascii_lowercase()
                    .parse::<SortKey>()
                    .map_err(|e| e.to_string())?,
            ),
            "open" => Command::Open(rest.to_string()),
            "back" => Command::Back,
            "forward" => Command::Forward,
            "show" | "ls" => Command::Show,
            "url" => Command::Url,
            "html" => Command::Html(Some(rest.to_string()).filter(|p| !p.is_empty())),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("empty command; type 'help'".into()),
            other => return Err(format!("unknown command '{other}'; type 'help'")),
        };
        Ok(command)
    }
}

/// Match a specialty by display name or test-id form, ignoring case.
fn find_specialty(input: &str) -> Result<Specialty, String> {
    Specialty::ALL
        .into_iter()
        .find(|sp| {
            sp.name().eq_ignore_ascii_case(input)
                || sanitise_for_test_id(sp.name()).eq_ignore_ascii_case(input)
        })
        .ok_or_else(|| format!("unknown specialty '{input}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_box_commands() {
        assert_eq!(Command::parse("type Dr. Anil"), Ok(Command::Type("Dr. Anil".into())));
        assert_eq!(Command::parse("type"), Ok(Command::Type(String::new())));
        assert_eq!(Command::parse("type  an "), Ok(Command::Type(" an ".into())));
        assert_eq!(Command::parse("type an\r"), Ok(Command::Type("an".into())));
        assert_eq!(Command::parse("  ENTER "), Ok(Command::Enter));
        assert_eq!(Command::parse("pick 2"), Ok(Command::Pick(1)));
        assert!(Command::parse("pick 0").is_err());
        assert!(Command::parse("pick two").is_err());
    }

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            Command::parse("consult clinic"),
            Ok(Command::Consult(ConsultationMode::InClinic))
        );
        assert_eq!(
            Command::parse("toggle dietitian-nutritionist"),
            Ok(Command::Toggle(Specialty::DietitianNutritionist))
        );
        assert_eq!(
            Command::parse("toggle General Physician"),
            Ok(Command::Toggle(Specialty::GeneralPhysician))
        );
        assert_eq!(Command::parse("sort Fees"), Ok(Command::Sort(SortKey::Fees)));
        assert!(Command::parse("sort rating").is_err());
        assert!(Command::parse("toggle Astrology").is_err());
    }

    #[test]
    fn parses_navigation_and_output() {
        assert_eq!(
            Command::parse("open ?sort=fees"),
            Ok(Command::Open("?sort=fees".into()))
        );
        assert_eq!(Command::parse("html"), Ok(Command::Html(None)));
        assert_eq!(
            Command::parse("html page.html"),
            Ok(Command::Html(Some("page.html".into())))
        );
        assert!(Command::parse("").is_err());
        assert!(Command::parse("dance").is_err());
    }
}
