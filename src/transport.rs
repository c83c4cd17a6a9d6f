//! Transport collaborator boundary.
//!
//! The coordinator depends only on "given a URL and optional body, return the
//! response text" — never on any HTTP library's types. [`HttpTransport`] is
//! the production implementation over reqwest; tests inject a scripted double
//! instead.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Content type the dataflow endpoint requires for job submissions.
const SUBMIT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// User agent reported by the production transport.
const USER_AGENT: &str = concat!("bulk-geocode/", env!("CARGO_PKG_VERSION"));

/// Outbound call surface the job coordinator is written against.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a request body as `text/plain; charset=UTF-8`, returning the
    /// response text. Used once per job, to create it.
    async fn post_text(&self, url: &str, body: String) -> Result<String>;

    /// GET a URL, returning the response text. Used for status polls and for
    /// fetching the result artifact.
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// Production transport over a reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_text(&self, url: &str, body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, SUBMIT_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Submission {
                status: Some(status.as_u16()),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.text().await?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol(format!(
                "status endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        Ok(response.text().await?)
    }
}
