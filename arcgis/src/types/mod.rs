//! The document types, one module per node kind.

pub mod envelope;
pub mod folder;
pub mod leaf;
pub mod service;

pub use envelope::RemoteError;
pub use folder::{FolderConfig, ServiceEntry};
pub use leaf::{LayerConfig, TableConfig};
pub use service::{
    FeatureServiceConfig, GPServiceConfig, GeometryServiceConfig, LayerDescriptor,
    MapServiceConfig, TableDescriptor,
};

use serde::Deserialize;

/// A JSON object, kept exactly as it arrived.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Read the list under `key`, if there is one.
///
/// Documents keep their raw object, and typed lists like `layers` are read
/// out of it as a view. Absent means empty; anything else must parse.
pub(crate) fn list<'a, T: Deserialize<'a>>(raw: &'a Extra, key: &str) -> serde_json::Result<Vec<T>> {
    match raw.get(key) {
        Some(value) => Vec::<T>::deserialize(value),
        None => Ok(vec![]),
    }
}
