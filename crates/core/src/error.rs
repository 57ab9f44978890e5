#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("failed to fetch doctors from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("doctor endpoint {url} answered with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to read doctor file {path}: {source}", path = path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("doctor list does not match the expected schema at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize doctors: {0}")]
    Serialization(serde_json::Error),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
