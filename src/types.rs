//! Core types for bulk-geocode

use crate::error::Result;
use crate::schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle status of a geocoding job.
///
/// The sequence only ever advances forward:
///
/// ```text
/// Initialized → JobCreated → Pending ⟲ → RemoteCompleted
///             → ResultRequestCompleted → Completed
/// ```
///
/// `Error` is reachable from any non-terminal state. Once `Completed` or
/// `Error` is reached the job is immutable. All mutation goes through the
/// coordinator, which enforces the forward-only invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Payload built, credential set, nothing submitted yet
    Initialized,
    /// The job-creation call succeeded
    JobCreated,
    /// The remote service reported the job as pending at least once
    Pending,
    /// The remote service reported the job as completed
    RemoteCompleted,
    /// The result artifact has been fetched from the succeeded link
    ResultRequestCompleted,
    /// Results decoded and returned to the caller
    Completed,
    /// Terminal failure state
    Error,
}

impl JobStatus {
    /// Position in the forward sequence. `Error` sorts last so that any
    /// non-terminal state may fall into it.
    fn rank(self) -> u8 {
        match self {
            JobStatus::Initialized => 0,
            JobStatus::JobCreated => 1,
            JobStatus::Pending => 2,
            JobStatus::RemoteCompleted => 3,
            JobStatus::ResultRequestCompleted => 4,
            JobStatus::Completed => 5,
            JobStatus::Error => 6,
        }
    }

    /// True for the two states a finished job can rest in.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// Whether a transition to `next` respects the forward-only invariant.
    ///
    /// Terminal states accept no transitions; every non-terminal state may
    /// move to `Error`; otherwise the sequence position must strictly
    /// increase (skipping states is allowed, e.g. a job that completes on the
    /// first status read never passes through `Pending`).
    pub fn can_advance_to(self, next: JobStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == JobStatus::Error {
            return true;
        }
        next.rank() > self.rank()
    }

    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Initialized => "initialized",
            JobStatus::JobCreated => "job_created",
            JobStatus::Pending => "pending",
            JobStatus::RemoteCompleted => "remote_completed",
            JobStatus::ResultRequestCompleted => "result_request_completed",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status string reported by the remote service for an in-flight job.
///
/// A closed variant type so every poll-loop transition site matches
/// exhaustively; an unrecognized remote value lands in `Other` and is handled
/// deliberately (keep polling) instead of falling through a string comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteStatus {
    /// Terminal success marker — the job's results are ready to fetch
    Completed,
    /// The job is queued or running remotely
    Pending,
    /// Any other status string the service may introduce
    Other(String),
}

impl RemoteStatus {
    /// Classify a raw status string from the status document.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Completed" => RemoteStatus::Completed,
            "Pending" => RemoteStatus::Pending,
            other => RemoteStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteStatus::Completed => write!(f, "Completed"),
            RemoteStatus::Pending => write!(f, "Pending"),
            RemoteStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One raw input address row.
///
/// Any field other than `id` may be absent; the payload builder renders
/// absent text fields as empty strings and left-pads the postcode, so the
/// wire payload never contains a "missing" marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Caller-assigned identifier, echoed back in the results
    pub id: u32,
    /// Street address line
    #[serde(default)]
    pub street_address: Option<String>,
    /// Municipality / locality name
    #[serde(default)]
    pub municipality: Option<String>,
    /// Postal code, padded to five digits on output
    #[serde(default)]
    pub postcode: Option<String>,
}

/// One decoded result row: a mapping from dotted-path column name
/// (e.g. `GeocodeResponse/Address/Locality`) to value.
///
/// Owned by the caller once returned from the coordinator; the crate holds no
/// reference afterwards. Columns absent from the upstream payload are simply
/// absent here — values are never fabricated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultRecord {
    fields: BTreeMap<String, String>,
}

impl ResultRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous one.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Look up a column by its dotted-path name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// The echoed request identifier.
    pub fn id(&self) -> Option<&str> {
        self.get(schema::ID)
    }

    /// The geocoded locality.
    pub fn locality(&self) -> Option<&str> {
        self.get(schema::RESPONSE_LOCALITY)
    }

    /// The geocoded point latitude, as reported by the service.
    pub fn latitude(&self) -> Option<&str> {
        self.get(schema::RESPONSE_LATITUDE)
    }

    /// The geocoded point longitude, as reported by the service.
    pub fn longitude(&self) -> Option<&str> {
        self.get(schema::RESPONSE_LONGITUDE)
    }

    /// Iterate over all populated columns in name order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of populated columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no column is populated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for ResultRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Wire format of the request payload and the result artifact.
///
/// A tagged variant rather than a string key: each format carries its own
/// encode/decode behavior, so an unsupported format cannot be named at all.
/// The format chosen at submission time is also the one the result is decoded
/// with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Delimited text with a banner line and a header row
    #[default]
    Csv,
    /// Versioned geocode-feed markup
    Xml,
}

impl Format {
    /// Value of the `input=` query parameter on the submission URL.
    pub fn query_value(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xml => "xml",
        }
    }

    /// Serialize input records into this format's request payload.
    pub fn encode(self, records: &[AddressRecord]) -> Result<String> {
        match self {
            Format::Csv => crate::payload::encode_csv(records),
            Format::Xml => crate::payload::encode_xml(records),
        }
    }

    /// Decode a raw result payload in this format into records.
    pub fn decode(self, text: &str) -> Result<Vec<ResultRecord>> {
        match self {
            Format::Csv => crate::parser::decode_csv(text),
            Format::Xml => crate::parser::decode_xml(text),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query_value())
    }
}
