//! Constants used throughout the directory core crate.

use std::time::Duration;

/// Endpoint serving the doctor list as a JSON array.
pub const DEFAULT_SOURCE_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Timeout applied to the doctor list request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// How long the suggestion dropdown stays open after the search input loses focus.
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(150);

/// Maximum number of autocomplete suggestions.
pub const SUGGESTION_LIMIT: usize = 3;

/// Query parameter holding the committed search text.
pub const PARAM_SEARCH: &str = "search";

/// Query parameter holding the consultation mode label.
pub const PARAM_CONSULTATION: &str = "consultation";

/// Query parameter holding the comma-joined specialty names.
pub const PARAM_SPECIALTIES: &str = "specialties";

/// Query parameter holding the sort key.
pub const PARAM_SORT: &str = "sort";

/// Separator between specialty names in the `specialties` parameter.
pub const SPECIALTY_SEPARATOR: char = ',';

/// Environment variable naming the doctor source (URL or file path).
pub const ENV_SOURCE: &str = "DIRECTORY_SOURCE";

/// Environment variable holding the fetch timeout in whole seconds.
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DIRECTORY_FETCH_TIMEOUT_SECS";

/// Environment variable holding the blur grace window in milliseconds.
pub const ENV_BLUR_GRACE_MS: &str = "DIRECTORY_BLUR_GRACE_MS";
