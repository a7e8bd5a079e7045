//! Getting JSON documents from the server.
//!
//! Every node in an ArcGIS REST directory serves its configuration when asked
//! for `?f=json`. That's the only request the mirror ever makes: no retries,
//! no auth, no paging.

use reqwest::blocking::{Client, Request};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection failures, timeouts, and non-success statuses.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Only produced by in-memory transports, which have no 404 page.
    #[error("no such resource")]
    NotFound,
}

/// Something that can fetch the JSON document for a node.
pub trait Transport {
    /// GET `url` with `f=json` appended, returning the raw body.
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// The real thing: blocking HTTP.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("arcmirror/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// The GET for `url`'s JSON document, ready to send.
    pub fn request(&self, url: &str) -> Result<Request, reqwest::Error> {
        self.client.get(url).query(&[("f", "json")]).build()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let request = self.request(url)?;
        let response = self.client.execute(request)?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// The request line a transport is expected to issue for `url`.
pub fn json_url(url: &str) -> String {
    format!("{}?f=json", url)
}
