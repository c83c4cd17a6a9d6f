//! Geocoding job coordinator — owns the submit → poll → fetch → parse
//! lifecycle.
//!
//! One `GeocodingJob` is one submitted batch, tracked through to completion.
//! The polling loop is the only suspension point: it sleeps a configured
//! interval between status checks, unbounded by default, bounded when
//! `max_poll_attempts` is set, and cooperatively cancellable through an
//! attached token. Concurrent batches are simply multiple independent jobs;
//! nothing is shared between them.

use crate::config::Config;
use crate::error::{Error, Result, Step};
use crate::resource::{JobResource, StatusResponse};
use crate::transport::{HttpTransport, Transport};
use crate::types::{AddressRecord, JobStatus, RemoteStatus, ResultRecord};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Append the credential as a `key` query parameter.
///
/// The remote service deliberately leaves the credential out of the links it
/// returns, so it is re-appended on every follow-up call.
fn with_key(url: &str, key: &str) -> Result<String> {
    let mut parsed = Url::parse(url)
        .map_err(|e| Error::Protocol(format!("remote returned an invalid link URL: {e}")))?;
    parsed.query_pairs_mut().append_pair("key", key);
    Ok(parsed.into())
}

/// One batch geocoding request, tracked from construction to a terminal
/// state.
///
/// The payload, submission URL and credential are fixed at construction; the
/// only mutation afterwards is the status, which advances strictly forward
/// (regressing only to [`JobStatus::Error`]). A job is not reusable across
/// batches — build a new one per batch.
pub struct GeocodingJob {
    config: Config,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
    status: JobStatus,
    payload: String,
    submission_url: String,
}

impl GeocodingJob {
    /// Create a job over the production HTTP transport.
    ///
    /// Builds and stores the serialized payload and submission URL. Fails
    /// with [`Error::MissingCredential`] or [`Error::Config`] before any
    /// network activity.
    pub fn new(records: &[AddressRecord], config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.http_timeout)?);
        Self::with_transport(records, config, transport)
    }

    /// Create a job with an injected transport. This is the seam tests (and
    /// embedders with their own HTTP stack) use.
    pub fn with_transport(
        records: &[AddressRecord],
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let payload = config.format.encode(records)?;
        let submission_url = config.submission_url()?;

        Ok(Self {
            config,
            transport,
            cancel: CancellationToken::new(),
            status: JobStatus::Initialized,
            payload,
            submission_url,
        })
    }

    /// Attach an external cancellation token, checked at every poll
    /// iteration. Without one the job blocks until the remote side finishes
    /// (or the configured attempt bound is hit).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Current lifecycle status.
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// The serialized request payload, as it will be submitted.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Run the whole lifecycle: submit the batch, poll until the remote job
    /// completes, fetch the result artifact and decode it.
    ///
    /// On success the job status is [`JobStatus::Completed`] and every
    /// decoded record is returned; on any failure the status is
    /// [`JobStatus::Error`] and the call fails with [`Error::Geocoding`] —
    /// never partial data. No step is retried.
    pub async fn fetch_results(&mut self) -> Result<Vec<ResultRecord>> {
        let body = match self.submit().await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(Step::Submit, e)),
        };

        let resource = match self.poll_until_complete(&body).await {
            Ok(resource) => resource,
            Err(e) => return Err(self.fail(Step::Poll, e)),
        };

        let raw = match self.fetch_result_payload(&resource).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail(Step::FetchResults, e)),
        };

        // Post-condition of the fetch step; anything else means a transition
        // was skipped and the result cannot be trusted.
        if self.status != JobStatus::ResultRequestCompleted {
            let err = Error::Protocol(format!(
                "job finished fetching in unexpected state {}",
                self.status
            ));
            return Err(self.fail(Step::FetchResults, err));
        }

        let records = match self.config.format.decode(&raw) {
            Ok(records) => records,
            Err(e) => return Err(self.fail(Step::Parse, e)),
        };

        self.advance(JobStatus::Completed);
        info!(records = records.len(), "geocoding job completed");
        Ok(records)
    }

    /// Issue the one job-creation POST. Any failure here is terminal for the
    /// job; there is no retry at this layer.
    async fn submit(&mut self) -> Result<String> {
        debug!(
            format = %self.config.format,
            payload_bytes = self.payload.len(),
            "submitting geocoding batch"
        );

        let body = self
            .transport
            .post_text(&self.submission_url, self.payload.clone())
            .await
            .map_err(|e| match e {
                submission @ Error::Submission { .. } => submission,
                other => Error::Submission {
                    status: None,
                    message: other.to_string(),
                },
            })?;

        self.advance(JobStatus::JobCreated);
        Ok(body)
    }

    /// The core polling loop.
    ///
    /// Terminates only on the explicit success marker, on a structural
    /// violation of the status document, on cancellation, or on the
    /// configured attempt bound. Transient or unrecognized remote statuses
    /// keep the loop running.
    async fn poll_until_complete(&mut self, submit_body: &str) -> Result<JobResource> {
        let mut resource = StatusResponse::parse(submit_body)?.first_resource()?.clone();
        let mut attempts: u32 = 0;
        let cancel = self.cancel.clone();

        debug!("entering status polling loop");
        loop {
            match resource.remote_status() {
                RemoteStatus::Completed => break,
                RemoteStatus::Pending => self.advance(JobStatus::Pending),
                RemoteStatus::Other(status) => {
                    debug!(status = %status, "remote job reported unrecognized status, continuing to poll");
                }
            }

            if let Some(max) = self.config.max_poll_attempts
                && attempts >= max
            {
                return Err(Error::PollLimitExceeded { attempts });
            }
            attempts += 1;

            tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }

            let url = with_key(resource.poll_url()?, &self.config.key)?;
            let body = self.transport.get_text(&url).await?;
            resource = StatusResponse::parse(&body)?.first_resource()?.clone();
            debug!(attempt = attempts, status = %resource.status, "polled job status");
        }

        Ok(resource)
    }

    /// Fetch the raw result artifact from the succeeded output link.
    ///
    /// A completed resource without that link is a protocol violation and no
    /// further network call is made.
    async fn fetch_result_payload(&mut self, resource: &JobResource) -> Result<String> {
        self.advance(JobStatus::RemoteCompleted);

        let link = resource.succeeded_link()?;
        let url = with_key(link, &self.config.key)?;
        let raw = self.transport.get_text(&url).await?;

        self.advance(JobStatus::ResultRequestCompleted);
        Ok(raw)
    }

    /// Single mutation site for the job status; enforces the forward-only
    /// invariant. Re-asserting the current status is a no-op (e.g. repeated
    /// pending polls).
    fn advance(&mut self, next: JobStatus) {
        if next == self.status {
            return;
        }
        if self.status.can_advance_to(next) {
            debug!(from = %self.status, to = %next, "job status transition");
            self.status = next;
        }
    }

    /// Mark the job failed and wrap the underlying error with the step and
    /// the last status observed before the failure.
    fn fail(&mut self, step: Step, source: Error) -> Error {
        let last_status = self.status;
        warn!(step = %step, status = %last_status, error = %source, "geocoding job failed");
        self.advance(JobStatus::Error);
        Error::Geocoding {
            step,
            last_status,
            source: Box::new(source),
        }
    }
}
