use crate::transport::{json_url, Transport, TransportError};
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned documents from memory, and remembers what was asked for.
///
/// Requests are recorded as the full `?f=json` URL, in the order they were
/// made, whether or not anything was there to serve.
#[derive(Default)]
pub struct MemTransport {
    bodies: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies.insert(url.into(), body.into());
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MemTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(json_url(url));
        self.bodies.get(url).cloned().ok_or(TransportError::NotFound)
    }
}
