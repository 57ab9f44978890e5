//! Loading of the doctor list.
//!
//! The list is fetched once per session. [`DataSource::fetch`] reports every failure;
//! [`DataSource::load_doctors`] applies the page policy on top of it: log the failure and carry
//! on with an empty list, which the page shows as "No doctors found.".

use crate::{
    DirectoryConfig, DirectoryError, DirectoryResult, DoctorRecord, DoctorSource, FilterState,
};
use serde::Serialize;

/// Fetches doctor records from the configured source.
#[derive(Clone, Debug)]
pub struct DataSource {
    source: DoctorSource,
    client: reqwest::Client,
}

impl DataSource {
    pub fn new(config: &DirectoryConfig) -> DirectoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .map_err(DirectoryError::HttpClient)?;

        Ok(Self {
            source: config.source().clone(),
            client,
        })
    }

    pub fn source(&self) -> &DoctorSource {
        &self.source
    }

    /// Fetch and decode the whole list. Any failure fails the whole list.
    pub async fn fetch(&self) -> DirectoryResult<Vec<DoctorRecord>> {
        let bytes = match &self.source {
            DoctorSource::Remote(url) => {
                let fetch_err = |source: reqwest::Error| DirectoryError::Fetch {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(fetch_err)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(DirectoryError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.bytes().await.map_err(fetch_err)?.to_vec()
            }
            DoctorSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| DirectoryError::FileRead {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        decode_doctors(&bytes)
    }

    /// Fetch the list, degrading to an empty list on failure.
    pub async fn load_doctors(&self) -> Vec<DoctorRecord> {
        match self.fetch().await {
            Ok(doctors) => {
                tracing::info!("loaded {} doctors from {}", doctors.len(), self.source);
                doctors
            }
            Err(e) => {
                tracing::error!("error fetching doctor data: {e}");
                Vec::new()
            }
        }
    }
}

/// Decode a JSON array of doctor records.
///
/// Errors name the JSON path of the first mismatch, e.g. `[2].video_consult`.
pub fn decode_doctors(bytes: &[u8]) -> DirectoryResult<Vec<DoctorRecord>> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let doctors: Vec<DoctorRecord> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            DirectoryError::Decode {
                path,
                source: err.into_inner(),
            }
        })?;
    deserializer.end().map_err(|source| DirectoryError::Decode {
        path: "<root>".into(),
        source,
    })?;
    Ok(doctors)
}

#[derive(Serialize)]
struct Listing<'a> {
    #[serde(skip_serializing_if = "FilterState::is_default")]
    filters: &'a FilterState,
    doctors: &'a [&'a DoctorRecord],
}

/// Serialise a filtered listing as JSON: the active filters (omitted when none are set) and the
/// displayed records in the endpoint's shape.
pub fn encode_listing(filters: &FilterState, doctors: &[&DoctorRecord]) -> DirectoryResult<String> {
    serde_json::to_string_pretty(&Listing { filters, doctors })
        .map_err(DirectoryError::Serialization)
}
