//! Error types for bulk-geocode
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (submission, protocol, parse, etc.)
//! - The coordinator-level `Geocoding` failure carrying the failing step and
//!   the last observed job status
//! - Conversions from the transport and codec crates
//!
//! All failures are terminal for the job they occur in; nothing in this crate
//! retries internally.

use crate::types::JobStatus;
use thiserror::Error;

/// Result type alias for bulk-geocode operations
pub type Result<T> = std::result::Result<T, Error>;

/// The workflow step in which a job failure occurred.
///
/// Recorded inside [`Error::Geocoding`] so a caller can tell remotely which
/// part of the lifecycle broke without parsing error messages. Only the
/// networked lifecycle is covered; payload encoding failures surface at
/// construction as plain codec errors, before a job exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The initial job-creation POST
    Submit,
    /// The status polling loop
    Poll,
    /// Fetching the result artifact from the succeeded link
    FetchResults,
    /// Decoding the raw result payload
    Parse,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::Submit => "submit",
            Step::Poll => "poll",
            Step::FetchResults => "fetch_results",
            Step::Parse => "parse",
        };
        write!(f, "{}", name)
    }
}

/// Main error type for bulk-geocode
///
/// Each variant includes contextual information to help diagnose issues.
/// The only variant a caller of [`crate::GeocodingJob::fetch_results`] sees is
/// [`Error::Geocoding`]; everything else surfaces either at construction time
/// or wrapped inside it as the source.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "poll_interval")
        key: Option<String>,
    },

    /// No credential supplied via parameter or environment
    #[error("no geocoding credential supplied")]
    MissingCredential,

    /// Job creation call failed (network error or non-success HTTP status)
    #[error("job submission failed{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Submission {
        /// HTTP status returned by the remote service, if the call got that far
        status: Option<u16>,
        /// Description of the failure
        message: String,
    },

    /// Status document missing expected structure (no populated resource set,
    /// no succeeded output link after completion, invalid link URL)
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Terminal coordinator failure — the job did not reach its expected
    /// post-condition. Carries the failing step and the last observed status.
    #[error("geocoding job failed during {step} (last status: {last_status}): {source}")]
    Geocoding {
        /// The workflow step that failed
        step: Step,
        /// Job status observed when the failure happened
        last_status: JobStatus,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },

    /// Result payload does not match the expected format
    #[error("result parse error: {0}")]
    Parse(String),

    /// Delimited-text codec error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Markup codec error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configured polling bound reached before the remote job completed
    #[error("poll attempt limit reached after {attempts} attempts")]
    PollLimitExceeded {
        /// Number of re-fetches performed before giving up
        attempts: u32,
    },

    /// External cancellation observed while waiting for results
    #[error("geocoding job cancelled while waiting for results")]
    Cancelled,
}
