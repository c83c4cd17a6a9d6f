//! Configuration types for bulk-geocode

use crate::error::{Error, Result};
use crate::types::Format;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment variable the composition-root helper reads the credential from.
pub const CREDENTIAL_ENV_VAR: &str = "BING_API_KEY";

/// Configuration for one geocoding job.
///
/// The credential is an explicit field, never read from the environment by
/// the core — callers that want the environment fallback use
/// [`Config::from_env`] at their composition root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Credential for the remote geocoding service (required)
    #[serde(default)]
    pub key: String,

    /// Base URL of the REST endpoint (default: the public dataflow service)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Wire format for the request payload and the result artifact
    #[serde(default)]
    pub format: Format,

    /// Interval to sleep between status polls (default: 10 seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Maximum number of status re-fetches before giving up.
    ///
    /// `None` (the default) blocks until the remote job finishes — the
    /// intended mode for batch use, but an explicit choice here rather than
    /// an absent bound.
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,

    /// Per-request HTTP timeout for the production transport (default: 30 s)
    #[serde(default = "default_http_timeout")]
    pub http_timeout: Duration,
}

fn default_base_url() -> String {
    "http://spatial.virtualearth.net/REST/v1".to_string()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: default_base_url(),
            format: Format::default(),
            poll_interval: default_poll_interval(),
            max_poll_attempts: None,
            http_timeout: default_http_timeout(),
        }
    }
}

impl Config {
    /// Construct a config with the given credential and defaults elsewhere.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Composition-root helper: read the credential from `BING_API_KEY`.
    ///
    /// Fails with [`Error::MissingCredential`] when the variable is absent or
    /// empty; the core library itself never touches the environment.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CREDENTIAL_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::with_key(key)),
            _ => Err(Error::MissingCredential),
        }
    }

    /// Validate the configuration. Called once at job construction, before
    /// any network activity.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        if self.poll_interval.is_zero() {
            return Err(Error::Config {
                message: "poll_interval must be greater than zero".into(),
                key: Some("poll_interval".into()),
            });
        }
        if self.max_poll_attempts == Some(0) {
            return Err(Error::Config {
                message: "max_poll_attempts must be at least 1 when set".into(),
                key: Some("max_poll_attempts".into()),
            });
        }
        Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("base_url is not a valid URL: {e}"),
            key: Some("base_url".into()),
        })?;
        Ok(())
    }

    /// The job-creation URL: `<base>/Dataflows/Geocode?input=<format>&key=<credential>`.
    pub fn submission_url(&self) -> Result<String> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/Dataflows/Geocode")).map_err(|e| {
            Error::Config {
                message: format!("base_url is not a valid URL: {e}"),
                key: Some("base_url".into()),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("input", self.format.query_value())
            .append_pair("key", &self.key);
        Ok(url.into())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://spatial.virtualearth.net/REST/v1");
        assert_eq!(config.format, Format::Csv);
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.max_poll_attempts, None);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn submission_url_carries_format_and_credential() {
        let config = Config {
            key: "secret-key".into(),
            ..Default::default()
        };
        let url = config.submission_url().unwrap();
        assert_eq!(
            url,
            "http://spatial.virtualearth.net/REST/v1/Dataflows/Geocode?input=csv&key=secret-key"
        );

        let xml = Config {
            key: "secret-key".into(),
            format: Format::Xml,
            ..Default::default()
        };
        assert!(xml.submission_url().unwrap().contains("input=xml"));
    }

    #[test]
    fn validate_rejects_missing_credential() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(Error::MissingCredential)));

        let blank = Config::with_key("   ");
        assert!(matches!(blank.validate(), Err(Error::MissingCredential)));
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let config = Config {
            key: "k".into(),
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn validate_rejects_zero_attempt_bound() {
        let config = Config {
            key: "k".into(),
            max_poll_attempts: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn validate_rejects_unparseable_base_url() {
        let config = Config {
            key: "k".into(),
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    #[serial]
    fn from_env_reads_the_credential_variable() {
        // set_var is unsafe in edition 2024; fine in a serialized test
        unsafe { std::env::set_var(CREDENTIAL_ENV_VAR, "env-key") };
        let config = Config::from_env().unwrap();
        assert_eq!(config.key, "env-key");
        unsafe { std::env::remove_var(CREDENTIAL_ENV_VAR) };
    }

    #[test]
    #[serial]
    fn from_env_fails_without_the_variable() {
        unsafe { std::env::remove_var(CREDENTIAL_ENV_VAR) };
        assert!(matches!(Config::from_env(), Err(Error::MissingCredential)));
    }
}
