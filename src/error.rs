use crate::transport::TransportError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop us from producing (or using) a mirrored tree.
///
/// Resolution is all-or-nothing, so every one of these coming out of
/// [`crate::resolver::resolve`] means there is no tree at all.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to decode {kind} document at {url}: {source}")]
    Decode {
        url: String,
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} reported error {code}: {message}")]
    Remote {
        url: String,
        code: i64,
        message: String,
    },

    #[error("unhandled service type '{service_type}' at {url}")]
    UnknownServiceType { url: String, service_type: String },

    #[error("expected layer type to be 'Feature Layer', got '{layer_type}' at {url}")]
    UnexpectedLayerType { url: String, layer_type: String },

    #[error("snapshot i/o failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {}: {reason}", path.display())]
    Snapshot { path: PathBuf, reason: String },

    #[error("invalid url {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{0}")]
    Config(String),

    #[error("no node at {0}")]
    NotFound(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Attach the URL a document came from to its decoding failure.
    pub fn document(url: impl Into<String>, err: arcgis::Error) -> Self {
        let url = url.into();
        match err {
            arcgis::Error::Json { kind, source } => Self::Decode { url, kind, source },
            arcgis::Error::Remote(remote) => Self::Remote {
                url,
                code: remote.code,
                message: remote.message,
            },
        }
    }
}
