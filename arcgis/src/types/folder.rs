use super::{list, Extra};
use crate::traits::Document;
use serde::{Deserialize, Serialize};

/// The listing served at a folder, including the root `services` folder.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Extra", into = "Extra")]
pub struct FolderConfig {
    raw: Extra,
    folders: Vec<String>,
    services: Vec<ServiceEntry>,
}

impl FolderConfig {
    /// Subfolder names, relative to this folder.
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    pub fn raw(&self) -> &Extra {
        &self.raw
    }
}

impl TryFrom<Extra> for FolderConfig {
    type Error = serde_json::Error;

    fn try_from(raw: Extra) -> serde_json::Result<Self> {
        let folders = list(&raw, "folders")?;
        let services = list(&raw, "services")?;
        Ok(Self {
            raw,
            folders,
            services,
        })
    }
}

impl From<FolderConfig> for Extra {
    fn from(config: FolderConfig) -> Self {
        config.raw
    }
}

/// One line of a folder's service listing.
///
/// Outside the root, ArcGIS qualifies the name with the folder path, so a
/// service in `Utilities` is listed as `Utilities/Water`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,

    /// Left as text: deciding what counts as a known type isn't our job.
    #[serde(rename = "type")]
    pub service_type: String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl ServiceEntry {
    /// The service's own name, without any folder qualification.
    pub fn base_name(&self) -> &str {
        match self.name.rfind('/') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }
}

impl Document for FolderConfig {
    const KIND: &'static str = "folder";
}
