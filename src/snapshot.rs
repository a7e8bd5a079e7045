//! Saving a resolved tree to disk, and getting it back without the network.
//!
//! A snapshot is one pretty-printed JSON file:
//!
//! ```text
//! {
//!   "version": 1,
//!   "root": { "url": ..., "name": ..., "folderConfig": ..., "folders": [...], "services": [...] }
//! }
//! ```
//!
//! The root is a [`FolderRecord`], so there are no parent links on disk. They
//! come back when the record is turned into a [`Tree`].

use crate::error::{Error, Result};
use crate::record::FolderRecord;
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub const SNAPSHOT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Outgoing<'a> {
    version: u64,
    root: &'a FolderRecord,
}

#[derive(Deserialize)]
struct Incoming {
    version: u64,
    root: Value,
}

/// Write `tree` to `path`, replacing whatever was there.
///
/// The file is written beside its destination and renamed into place, so
/// readers see either the old snapshot or the new one.
pub fn save(tree: &Tree, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.into(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let file = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let root = tree.to_record();
    let snapshot = Outgoing {
        version: SNAPSHOT_VERSION,
        root: &root,
    };
    serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|e| io_err(e.into()))?;
    writer.write_all(b"\n").map_err(io_err)?;
    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.persist(path).map_err(|pe| io_err(pe.error))?;

    info!(path = %path.display(), "saved snapshot");
    Ok(())
}

/// Read a tree back from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Tree> {
    let path = path.as_ref();
    let invalid = |reason: String| Error::Snapshot {
        path: path.into(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.into(),
        source,
    })?;
    let incoming: Incoming =
        serde_json::from_slice(&bytes).map_err(|e| invalid(e.to_string()))?;
    if incoming.version != SNAPSHOT_VERSION {
        return Err(invalid(format!(
            "version {} (expected {})",
            incoming.version, SNAPSHOT_VERSION
        )));
    }
    let root: FolderRecord =
        serde_json::from_value(incoming.root).map_err(|e| invalid(e.to_string()))?;

    let tree = Tree::from(root);
    info!(path = %path.display(), "loaded snapshot: {}", tree.stats());
    Ok(tree)
}
