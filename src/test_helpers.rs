//! Shared test doubles for exercising the job lifecycle without a network.

use crate::error::{Error, Result};
use crate::transport::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Transport double returning scripted responses and counting every call.
///
/// The POST response is served for the single submission; GET responses are
/// consumed in order, one per poll or result fetch. Running out of scripted
/// responses surfaces as a transport failure, which keeps misconfigured tests
/// loud instead of hanging the polling loop.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    post_response: Mutex<Option<String>>,
    get_responses: Mutex<VecDeque<String>>,
    post_calls: AtomicUsize,
    get_calls: AtomicUsize,
    get_urls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn with_post_response(self, body: impl Into<String>) -> Self {
        *self.post_response.lock().unwrap() = Some(body.into());
        self
    }

    pub(crate) fn with_get_responses(self, bodies: Vec<String>) -> Self {
        *self.get_responses.lock().unwrap() = bodies.into();
        self
    }

    pub(crate) fn post_count(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn get_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn get_urls(&self) -> Vec<String> {
        self.get_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_text(&self, _url: &str, _body: String) -> Result<String> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.post_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Submission {
                status: None,
                message: "no scripted POST response".into(),
            })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.get_urls.lock().unwrap().push(url.to_string());
        self.get_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Protocol("no scripted GET response".into()))
    }
}

/// Status document reporting `status` with a single self link.
pub(crate) fn status_with(status: &str, self_url: &str) -> String {
    serde_json::json!({
        "resourceSets": [{
            "resources": [{
                "status": status,
                "links": [{ "role": "self", "url": self_url }]
            }]
        }]
    })
    .to_string()
}

/// Status document for a job the service still reports as pending.
pub(crate) fn pending_status(self_url: &str) -> String {
    status_with("Pending", self_url)
}

/// Status document for a completed job, with or without the succeeded output
/// link.
pub(crate) fn completed_status(self_url: &str, output_url: Option<&str>) -> String {
    let mut links = vec![serde_json::json!({ "role": "self", "url": self_url })];
    if let Some(url) = output_url {
        links.push(serde_json::json!({
            "role": "output",
            "name": "succeeded",
            "url": url
        }));
    }
    serde_json::json!({
        "resourceSets": [{
            "resources": [{ "status": "Completed", "links": links }]
        }]
    })
    .to_string()
}

/// A small delimited-text result payload echoing two localities.
pub(crate) fn result_csv() -> String {
    "Bing Spatial Data Services, 2.0\n\
     Id,GeocodeRequest/Address/Locality,GeocodeResponse/Address/Locality\n\
     4,Vantaa,Vantaa\n\
     7,Helsinki,Helsinki\n"
        .to_string()
}
