use crate::types::service::{LayerDescriptor, TableDescriptor};

/// Services that declare their own layers and tables.
pub trait Catalog {
    fn layers(&self) -> &[LayerDescriptor];
    fn tables(&self) -> &[TableDescriptor];
}
