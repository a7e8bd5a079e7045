//! Mirror the directory tree of an ArcGIS REST services endpoint.
//!
//! ```
//! use arcmirror::memtransport::MemTransport;
//! use arcmirror::resolver::resolve;
//!
//! let root = "https://gis.example.com/arcgis/rest/services";
//! let server = MemTransport::new()
//!     .with(root, r#"{"folders": [], "services": [{"name": "Parks", "type": "GPServer"}]}"#)
//!     .with(format!("{}/Parks/GPServer", root), r#"{"tasks": ["Buffer"]}"#);
//!
//! let tree = resolve(&server, root)?;
//! assert_eq!(tree.outline(), "FOLDER services\n  SERVICE Parks (GPServer)\n");
//! # Ok::<(), arcmirror::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod logger;
pub mod memtransport;
pub mod record;
pub mod resolver;
pub mod service;
pub mod snapshot;
pub mod transport;
pub mod tree;

#[cfg(test)]
pub mod test_tools;

pub use error::{Error, Result};
