//! Walking a live server into a [`Tree`].
//!
//! The walk is depth-first and strictly sequential. Within a folder,
//! subfolders come before services; within a service, layers come before
//! tables; everything else follows listing order. Each step hands a finished
//! record back to its caller, and the first failure anywhere abandons the
//! whole walk.

use crate::error::{Error, Result};
use crate::record::{FolderRecord, LayerRecord, ServiceRecord, TableRecord};
use crate::service::ServiceType;
use crate::transport::Transport;
use crate::tree::Tree;
use arcgis::{
    Document, FolderConfig, LayerConfig, LayerDescriptor, ServiceEntry, TableConfig,
    TableDescriptor,
};
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// The only layer type a mirrored service may declare.
pub const FEATURE_LAYER: &str = "Feature Layer";

/// What to call the root when its URL has no path to name it after.
pub const DEFAULT_ROOT_NAME: &str = "services";

/// Fetch and assemble the whole directory under `root_url`.
///
/// Nothing is returned unless every node resolved.
pub fn resolve(transport: &impl Transport, root_url: &str) -> Result<Tree> {
    let root_url = root_url.trim_end_matches('/');
    let parsed = Url::parse(root_url).map_err(|source| Error::Url {
        url: root_url.into(),
        source,
    })?;
    let name = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or(DEFAULT_ROOT_NAME)
        .to_owned();

    let root = Resolver { transport }.folder(root_url, name)?;
    let tree = Tree::from(root);
    info!(url = root_url, "resolved {}", tree.stats());
    Ok(tree)
}

struct Resolver<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> Resolver<'a, T> {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching");
        self.transport.get(url).map_err(|source| Error::Transport {
            url: url.into(),
            source,
        })
    }

    fn fetch<D: Document>(&self, url: &str) -> Result<D> {
        let body = self.get(url)?;
        D::decode(body).map_err(|e| Error::document(url, e))
    }

    fn folder(&self, url: &str, name: String) -> Result<FolderRecord> {
        let config = self.fetch::<FolderConfig>(url)?;
        let folders = config
            .folders()
            .iter()
            .map(|sub| self.folder(&format!("{}/{}", url, sub), sub.clone()))
            .collect::<Result<Vec<_>>>()?;
        let services = config
            .services()
            .iter()
            .map(|entry| self.service(url, entry))
            .collect::<Result<Vec<_>>>()?;

        info!(
            url,
            folders = folders.len(),
            services = services.len(),
            "resolved folder"
        );
        Ok(FolderRecord {
            url: url.into(),
            name,
            folder_config: config,
            folders,
            services,
        })
    }

    fn service(&self, folder_url: &str, entry: &ServiceEntry) -> Result<ServiceRecord> {
        let url = format!("{}/{}/{}", folder_url, entry.base_name(), entry.service_type);
        let handler = match ServiceType::from_str(&entry.service_type) {
            Ok(service_type) => service_type.handler(),
            Err(_) => {
                return Err(Error::UnknownServiceType {
                    url,
                    service_type: entry.service_type.clone(),
                })
            }
        };

        let body = self.get(&url)?;
        let config = (handler.decode)(&body).map_err(|e| Error::document(&url, e))?;
        let (layers, tables) = match (handler.catalog)(&config) {
            Some(catalog) => (
                self.layers(&url, catalog.layers())?,
                self.tables(&url, catalog.tables())?,
            ),
            None => (vec![], vec![]),
        };

        info!(
            url = url.as_str(),
            service_type = %handler.service_type,
            layers = layers.len(),
            tables = tables.len(),
            "resolved service"
        );
        Ok(ServiceRecord {
            url,
            name: entry.name.clone(),
            service: config,
            layers,
            tables,
        })
    }

    fn layers(&self, service_url: &str, declared: &[LayerDescriptor]) -> Result<Vec<LayerRecord>> {
        declared
            .iter()
            .map(|descriptor| {
                let url = format!("{}/{}", service_url, descriptor.id);
                if descriptor.layer_type != FEATURE_LAYER {
                    return Err(Error::UnexpectedLayerType {
                        url,
                        layer_type: descriptor.layer_type.clone(),
                    });
                }
                let layer_config = self.fetch::<LayerConfig>(&url)?;
                Ok(LayerRecord {
                    url,
                    descriptor: descriptor.clone(),
                    layer_config,
                })
            })
            .collect()
    }

    fn tables(&self, service_url: &str, declared: &[TableDescriptor]) -> Result<Vec<TableRecord>> {
        declared
            .iter()
            .map(|descriptor| {
                let url = format!("{}/{}", service_url, descriptor.id);
                let table_config = self.fetch::<TableConfig>(&url)?;
                Ok(TableRecord {
                    url,
                    descriptor: descriptor.clone(),
                    table_config,
                })
            })
            .collect()
    }
}
