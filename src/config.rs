//! Turning command line flags (and their environment fallbacks) into the
//! settings a run actually uses.

use crate::cli::Args;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Where the REST directory lives on an ArcGIS server.
pub const SERVICES_PATH: &str = "/arcgis/rest/services";

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Settings {
    pub root_url: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub refresh: bool,
    pub quiet: bool,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        let root_url = match (&args.root, &args.server) {
            (Some(root), _) => Some(root.trim_end_matches('/').to_owned()),
            (None, Some(server)) => Some(services_url(server)),
            (None, None) => None,
        };
        Self {
            root_url,
            snapshot: args.snapshot.clone(),
            refresh: args.refresh,
            quiet: args.quiet,
        }
    }

    /// The folder to start crawling from. Only needed when we do crawl.
    pub fn root_url(&self) -> Result<&str> {
        self.root_url.as_deref().ok_or_else(|| {
            Error::Config(
                "no server to crawl: pass --server or --root, or set SOURCE_ARCGIS_SERVER_URL"
                    .into(),
            )
        })
    }
}

/// The services root for a server base URL.
pub fn services_url(server: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), SERVICES_PATH)
}
