use crate::types::envelope::RemoteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Ways that a response body can fail to become a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The body wasn't JSON, or didn't have the shape of a `kind` document.
    #[error("malformed {kind} document: {source}")]
    Json {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with its `{"error": ...}` envelope instead.
    #[error("server reported error {}: {}", .0.code, .0.message)]
    Remote(RemoteError),
}
