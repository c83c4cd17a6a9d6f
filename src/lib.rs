//! # bulk-geocode
//!
//! Client-side workflow coordinator for bulk geocoding over the Bing Spatial
//! Data Services dataflow API.
//!
//! The crate submits one batch of postal addresses, polls the asynchronous
//! remote job until completion, fetches the result artifact and decodes it
//! into structured records. It is not a geocoding engine — all spatial
//! computation happens on the remote service.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Explicit configuration** - the credential is a constructor argument;
//!   environment lookup is a composition-root helper, never implicit
//! - **One job, one batch** - concurrent batches are independent jobs with
//!   no shared state
//! - **Blocking by intent** - the wait loop is unbounded by default, but the
//!   bound and cancellation are first-class options
//!
//! ## Quick Start
//!
//! ```no_run
//! use bulk_geocode::{AddressRecord, Config, GeocodingJob};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = vec![
//!         AddressRecord {
//!             id: 4,
//!             street_address: Some("Ratatie 11".to_string()),
//!             municipality: Some("Vantaa".to_string()),
//!             postcode: Some("00510".to_string()),
//!         },
//!     ];
//!
//!     let config = Config::from_env()?; // reads BING_API_KEY
//!     let mut job = GeocodingJob::new(&records, config)?;
//!
//!     let results = job.fetch_results().await?;
//!     for record in &results {
//!         println!("{:?} -> {:?}", record.id(), record.locality());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Job coordinator and polling loop
pub mod job;
/// Result payload decoders
pub mod parser;
/// Request payload builders
pub mod payload;
/// Status document wire model
pub mod resource;
/// Fixed wire schema (columns and constants)
pub mod schema;
/// Transport collaborator boundary
pub mod transport;
/// Core types: lifecycle states, records, formats
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::{CREDENTIAL_ENV_VAR, Config};
pub use error::{Error, Result, Step};
pub use job::GeocodingJob;
pub use resource::{JobResource, ResourceLink, ResourceSet, StatusResponse};
pub use transport::{HttpTransport, Transport};
pub use types::{AddressRecord, Format, JobStatus, RemoteStatus, ResultRecord};
