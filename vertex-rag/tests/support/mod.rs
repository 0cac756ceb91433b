#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wiremock::{Request, Respond, ResponseTemplate};

use vertex_rag::{Client, PollOptions};

pub const PARENT: &str = "projects/proj/locations/loc";

/// Client for project `proj` in `loc`, pointed at a mock server.
pub fn build_client(base_url: &str) -> Client {
    build_client_with_poll(base_url, fast_poll())
}

pub fn build_client_with_poll(base_url: &str, poll_options: PollOptions) -> Client {
    Client::builder()
        .project("proj")
        .location("loc")
        .access_token("test-token")
        .base_url(base_url)
        .poll_options(poll_options)
        .build()
        .unwrap()
}

pub fn fast_poll() -> PollOptions {
    PollOptions::fixed(Duration::from_millis(5)).with_max_attempts(Some(20))
}

/// Replays responses in order, repeating the last one forever.
#[derive(Clone)]
pub struct SequenceResponder {
    calls: Arc<AtomicUsize>,
    responses: Vec<ResponseTemplate>,
}

impl SequenceResponder {
    pub fn new(responses: Vec<ResponseTemplate>) -> Self {
        assert!(!responses.is_empty());
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            responses,
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = idx.min(self.responses.len() - 1);
        self.responses[idx].clone()
    }
}
