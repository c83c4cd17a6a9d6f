//! Wire model for the remote job status document.
//!
//! Every submission and poll response is a JSON document of resource sets,
//! each holding resources that describe the job: its status string and the
//! links to follow for the next poll or for the final results. The model is
//! read-only and re-derived on every poll; nothing here is persisted.

use crate::error::{Error, Result};
use crate::types::RemoteStatus;
use serde::{Deserialize, Serialize};

/// Top-level status document:
/// `{"resourceSets":[{"resources":[{"status","links":[...]}]}]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Resource sets; some may carry no resources
    #[serde(default)]
    pub resource_sets: Vec<ResourceSet>,
}

/// One resource set within the status document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourceSet {
    /// Job resources; usually zero or one
    #[serde(default)]
    pub resources: Vec<JobResource>,
}

/// The remote service's descriptor for one job: status plus navigable links.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobResource {
    /// Raw status string ("Pending", "Completed", others possible)
    #[serde(default)]
    pub status: String,
    /// Ordered link collection; the first link is the resource's own URL
    #[serde(default)]
    pub links: Vec<ResourceLink>,
}

/// One navigable link on a job resource.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Link role, e.g. "self" or "output"
    #[serde(default)]
    pub role: String,
    /// Link name, e.g. "succeeded"; absent on plain self links
    #[serde(default)]
    pub name: Option<String>,
    /// Target URL; the service never embeds the credential here
    #[serde(default)]
    pub url: String,
}

impl StatusResponse {
    /// Parse a raw status document body.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(Error::from)
    }

    /// First resource of the first resource set that actually contains one.
    ///
    /// A document with no populated resource set is a protocol violation,
    /// never something to silently skip past.
    pub fn first_resource(&self) -> Result<&JobResource> {
        self.resource_sets
            .iter()
            .find(|set| !set.resources.is_empty())
            .map(|set| &set.resources[0])
            .ok_or_else(|| {
                Error::Protocol("status document contains no populated resource set".into())
            })
    }
}

impl JobResource {
    /// The reported status, classified.
    pub fn remote_status(&self) -> RemoteStatus {
        RemoteStatus::parse(&self.status)
    }

    /// URL to re-fetch this resource from. The credential is re-appended by
    /// the caller on every poll since the service leaves it out of its links.
    pub fn poll_url(&self) -> Result<&str> {
        self.links
            .first()
            .map(|link| link.url.as_str())
            .ok_or_else(|| Error::Protocol("job resource carries no links to poll".into()))
    }

    /// URL of the `role="output", name="succeeded"` link holding the results.
    ///
    /// Missing after completion means the protocol was violated; the caller
    /// must not issue any further network call.
    pub fn succeeded_link(&self) -> Result<&str> {
        self.links
            .iter()
            .find(|link| link.role == "output" && link.name.as_deref() == Some("succeeded"))
            .map(|link| link.url.as_str())
            .ok_or_else(|| {
                Error::Protocol("completed job resource has no succeeded output link".into())
            })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn status_body(status: &str, links: serde_json::Value) -> String {
        serde_json::json!({
            "resourceSets": [
                { "resources": [ { "status": status, "links": links } ] }
            ]
        })
        .to_string()
    }

    #[test]
    fn parses_the_documented_status_shape() {
        let body = status_body(
            "Pending",
            serde_json::json!([{ "role": "self", "url": "http://remote/jobs/1" }]),
        );
        let resource = StatusResponse::parse(&body)
            .unwrap()
            .first_resource()
            .unwrap()
            .clone();

        assert_eq!(resource.status, "Pending");
        assert_eq!(resource.remote_status(), RemoteStatus::Pending);
        assert_eq!(resource.poll_url().unwrap(), "http://remote/jobs/1");
    }

    #[test]
    fn first_resource_skips_empty_resource_sets() {
        let body = serde_json::json!({
            "resourceSets": [
                { "resources": [] },
                { "resources": [ { "status": "Completed", "links": [] } ] }
            ]
        })
        .to_string();

        let response = StatusResponse::parse(&body).unwrap();
        assert_eq!(response.first_resource().unwrap().status, "Completed");
    }

    #[test]
    fn missing_resources_is_a_protocol_violation() {
        let response = StatusResponse::parse(r#"{"resourceSets":[{"resources":[]}]}"#).unwrap();
        assert!(matches!(
            response.first_resource(),
            Err(Error::Protocol(_))
        ));

        let empty = StatusResponse::parse(r#"{"resourceSets":[]}"#).unwrap();
        assert!(matches!(empty.first_resource(), Err(Error::Protocol(_))));
    }

    #[test]
    fn malformed_status_document_fails_to_parse() {
        assert!(matches!(
            StatusResponse::parse("not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn succeeded_link_requires_both_role_and_name() {
        let body = status_body(
            "Completed",
            serde_json::json!([
                { "role": "self", "url": "http://remote/jobs/1" },
                { "role": "output", "name": "failed", "url": "http://remote/jobs/1/failed" },
                { "role": "output", "name": "succeeded", "url": "http://remote/jobs/1/succeeded" }
            ]),
        );
        let response = StatusResponse::parse(&body).unwrap();
        let resource = response.first_resource().unwrap();

        assert_eq!(
            resource.succeeded_link().unwrap(),
            "http://remote/jobs/1/succeeded"
        );
    }

    #[test]
    fn missing_succeeded_link_is_a_protocol_violation() {
        let body = status_body(
            "Completed",
            serde_json::json!([{ "role": "self", "url": "http://remote/jobs/1" }]),
        );
        let response = StatusResponse::parse(&body).unwrap();
        let resource = response.first_resource().unwrap();

        assert!(matches!(resource.succeeded_link(), Err(Error::Protocol(_))));
    }

    #[test]
    fn resource_without_links_cannot_be_polled() {
        let resource = JobResource {
            status: "Pending".into(),
            links: vec![],
        };
        assert!(matches!(resource.poll_url(), Err(Error::Protocol(_))));
    }
}
