//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the data source and
//! the app. Environment variables are read by the binaries only; this module parses the raw
//! values they hand over, so event handling never consults process-wide state.

use crate::constants::{DEFAULT_BLUR_GRACE, DEFAULT_FETCH_TIMEOUT, DEFAULT_SOURCE_URL};
use crate::{DirectoryError, DirectoryResult};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the doctor list comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DoctorSource {
    /// An HTTP(S) endpoint answering a GET with a JSON array.
    Remote(Url),
    /// A local JSON file with the same shape.
    File(PathBuf),
}

impl DoctorSource {
    /// Parse a source from user input.
    ///
    /// `http://` and `https://` values become [`DoctorSource::Remote`], `file://` URLs and
    /// anything else are treated as a filesystem path.
    pub fn parse(value: &str) -> DirectoryResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DirectoryError::InvalidConfig(
                "doctor source cannot be empty".into(),
            ));
        }

        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(DoctorSource::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(DoctorSource::File)
                .map_err(|_| DirectoryError::InvalidConfig(format!("invalid file URL: {value}"))),
            _ => Ok(DoctorSource::File(PathBuf::from(value))),
        }
    }
}

impl Default for DoctorSource {
    fn default() -> Self {
        Url::parse(DEFAULT_SOURCE_URL)
            .map(DoctorSource::Remote)
            .unwrap_or_else(|_| DoctorSource::File(PathBuf::from(DEFAULT_SOURCE_URL)))
    }
}

impl fmt::Display for DoctorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorSource::Remote(url) => write!(f, "{url}"),
            DoctorSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Directory configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    source: DoctorSource,
    fetch_timeout: Duration,
    blur_grace: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            source: DoctorSource::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            blur_grace: DEFAULT_BLUR_GRACE,
        }
    }
}

impl DirectoryConfig {
    /// Create a new `DirectoryConfig`.
    pub fn new(
        source: DoctorSource,
        fetch_timeout: Duration,
        blur_grace: Duration,
    ) -> DirectoryResult<Self> {
        if fetch_timeout.is_zero() {
            return Err(DirectoryError::InvalidConfig(
                "fetch timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            source,
            fetch_timeout,
            blur_grace,
        })
    }

    /// Build a configuration from raw environment values.
    ///
    /// `None`, empty and whitespace-only values fall back to the defaults.
    pub fn from_env_values(
        source: Option<String>,
        fetch_timeout_secs: Option<String>,
        blur_grace_ms: Option<String>,
    ) -> DirectoryResult<Self> {
        let source = match non_blank(source) {
            Some(value) => DoctorSource::parse(&value)?,
            None => DoctorSource::default(),
        };

        let fetch_timeout = match non_blank(fetch_timeout_secs) {
            Some(value) => Duration::from_secs(parse_number(&value, "fetch timeout")?),
            None => DEFAULT_FETCH_TIMEOUT,
        };

        let blur_grace = match non_blank(blur_grace_ms) {
            Some(value) => Duration::from_millis(parse_number(&value, "blur grace")?),
            None => DEFAULT_BLUR_GRACE,
        };

        Self::new(source, fetch_timeout, blur_grace)
    }

    /// Replace the source, keeping the other settings.
    pub fn with_source(mut self, source: DoctorSource) -> Self {
        self.source = source;
        self
    }

    pub fn source(&self) -> &DoctorSource {
        &self.source
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn blur_grace(&self) -> Duration {
        self.blur_grace
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: &str, what: &str) -> DirectoryResult<u64> {
    value
        .parse::<u64>()
        .map_err(|e| DirectoryError::InvalidConfig(format!("invalid {what} '{value}': {e}")))
}
