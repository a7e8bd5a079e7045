//! The nested form of a tree: each node owns its children, and nobody knows
//! their parent.
//!
//! This is what the resolver builds as it walks (each call hands a finished
//! record back to its caller) and what a snapshot stores. [`crate::tree::Tree`]
//! is built from a root record, and that's where parents get filled in.

use crate::service::ServiceConfig;
use arcgis::{FolderConfig, LayerConfig, LayerDescriptor, TableConfig, TableDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub url: String,
    pub name: String,
    pub folder_config: FolderConfig,
    pub folders: Vec<FolderRecord>,
    pub services: Vec<ServiceRecord>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub url: String,

    /// As listed by the parent folder, folder qualification included.
    pub name: String,

    pub service: ServiceConfig,
    pub layers: Vec<LayerRecord>,
    pub tables: Vec<TableRecord>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    pub url: String,

    /// The entry from the service's `layers` list.
    pub descriptor: LayerDescriptor,

    pub layer_config: LayerConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    pub url: String,

    /// The entry from the service's `tables` list.
    pub descriptor: TableDescriptor,

    pub table_config: TableConfig,
}
