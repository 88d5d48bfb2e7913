use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::fixtures::ServiceFixture;

/// Headers and query of a request, as seen by the mock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCreate {
    pub meta: RequestMeta,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFetch {
    pub meta: RequestMeta,
    pub token: String,
}

/// Shared state of a running mock: its fixture and everything it received
#[derive(Debug)]
pub struct MockState {
    pub fixture: ServiceFixture,
    creates: Mutex<Vec<RecordedCreate>>,
    fetches: Mutex<Vec<RecordedFetch>>,
    // token -> fetches still answered with "In Queue"
    pending: Mutex<HashMap<String, u32>>,
}

impl MockState {
    pub fn new(fixture: ServiceFixture) -> Self {
        Self {
            fixture,
            creates: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn record_create(&self, create: RecordedCreate) {
        self.creates.lock().unwrap().push(create);
    }

    pub fn record_fetch(&self, fetch: RecordedFetch) {
        self.fetches.lock().unwrap().push(fetch);
    }

    pub fn issue_token(&self, token: &str) {
        self.pending
            .lock()
            .unwrap()
            .insert(token.to_string(), self.fixture.pending_fetches);
    }

    /// `None` for unknown tokens, otherwise whether this fetch is still pending
    pub fn take_pending(&self, token: &str) -> Option<bool> {
        let mut pending = self.pending.lock().unwrap();
        let remaining = pending.get_mut(token)?;
        if *remaining > 0 {
            *remaining -= 1;
            Some(true)
        } else {
            Some(false)
        }
    }

    pub fn creates(&self) -> Vec<RecordedCreate> {
        self.creates.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.lock().unwrap().clone()
    }
}
