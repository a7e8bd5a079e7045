//! Layer and table documents.
//!
//! These are the biggest documents in the directory (field lists, domains,
//! renderers) and the walk needs nothing from them, so they're kept whole.

use super::Extra;
use crate::traits::Document;
use serde::{Deserialize, Serialize};

/// Served at `.../MapServer/{id}` and `.../FeatureServer/{id}`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerConfig(pub Extra);

/// Served at the table's `{id}` under its service.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableConfig(pub Extra);

impl Document for LayerConfig {
    const KIND: &'static str = "layer";
}
impl Document for TableConfig {
    const KIND: &'static str = "table";
}
