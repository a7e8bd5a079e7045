//! Configuration documents served by an ArcGIS REST services directory.
//!
//! Every node in the directory answers `?f=json` with a JSON document. The
//! shape depends on what the node is: a folder lists its subfolders and
//! services, Map and Feature services list their layers and tables, and the
//! rest (layers, tables, Geometry and GP services) are leaves as far as the
//! directory is concerned.
//!
//! Every document is kept exactly as the server sent it, in the order it
//! arrived, so a decoded document re-encodes to the same JSON. The few
//! fields needed to walk the directory (subfolders, services, layers and
//! tables) are read out of it as typed views. We never interpret geometry,
//! spatial references or renderers.
//!
//! ```
//! use ::arcgis::*;
//!
//! let folder = FolderConfig::decode(r#"{
//!     "currentVersion": 10.91,
//!     "folders": ["Utilities"],
//!     "services": [{"name": "Utilities/Water", "type": "MapServer"}]
//! }"#)?;
//!
//! assert_eq!(folder.folders().to_vec(), vec!["Utilities"]);
//! assert_eq!(folder.services()[0].service_type, "MapServer");
//! assert_eq!(folder.raw()["currentVersion"], 10.91);
//! # Ok::<(), arcgis::Error>(())
//! ```

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
