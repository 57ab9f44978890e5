//! # Directory Core
//!
//! Core logic for the doctor directory.
//!
//! This crate contains everything the directory page does, without any terminal or process
//! concerns:
//! - Loading the doctor list once from a remote endpoint or a local file
//! - The filter state and its two-way mapping to the URL query string
//! - The search/consultation/specialty/sort pipeline that derives the displayed list
//! - The autocomplete search box and its blur grace window
//! - Rendering the page as HTML (with its `data-testid` contract) or as a terminal table
//!
//! **No process concerns**: reading environment variables, installing a tracing subscriber and
//! driving the event loop belong in the `directory-run` and `directory-cli` binaries.

pub mod app;
pub mod autocomplete;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter_state;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod source;
pub mod view;

pub use app::{DirectoryApp, LoadState, UiEvent};
pub use autocomplete::{suggest, SearchBox, SearchPhase};
pub use config::{DirectoryConfig, DoctorSource};
pub use error::{DirectoryError, DirectoryResult};
pub use filter_state::FilterState;
pub use query::{parse_query, serialize_query, History, SessionHistory};
pub use record::DoctorRecord;
pub use source::DataSource;

pub use directory_types::{ConsultationMode, SortKey, Specialty};
