//! The closed set of service types, and what to do with each.
//!
//! Everything type-specific lives in [`HANDLERS`]. The resolver looks up a
//! handler and never matches on the type itself.

use arcgis::{
    Catalog, Document, Extra, FeatureServiceConfig, GPServiceConfig, GeometryServiceConfig,
    MapServiceConfig,
};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The service types we know how to mirror.
///
/// Parses from and displays as the exact literal ArcGIS uses in listings and
/// URLs. Parsing is case-sensitive, like the server.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, EnumString, Display, AsRefStr)]
pub enum ServiceType {
    MapServer,
    FeatureServer,
    GeometryServer,
    GPServer,
}

/// A service's document. Exactly one, matching the service's type.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum ServiceConfig {
    MapServer(MapServiceConfig),
    FeatureServer(FeatureServiceConfig),
    GeometryServer(GeometryServiceConfig),
    GPServer(GPServiceConfig),
}

/// How to handle one type of service.
pub struct Handler {
    pub service_type: ServiceType,

    /// Decode the service's own document.
    pub decode: fn(&[u8]) -> arcgis::Result<ServiceConfig>,

    /// The layers and tables to walk, for the types that declare them.
    pub catalog: fn(&ServiceConfig) -> Option<&dyn Catalog>,
}

fn decode_map(body: &[u8]) -> arcgis::Result<ServiceConfig> {
    MapServiceConfig::decode(body).map(ServiceConfig::MapServer)
}
fn decode_feature(body: &[u8]) -> arcgis::Result<ServiceConfig> {
    FeatureServiceConfig::decode(body).map(ServiceConfig::FeatureServer)
}
fn decode_geometry(body: &[u8]) -> arcgis::Result<ServiceConfig> {
    GeometryServiceConfig::decode(body).map(ServiceConfig::GeometryServer)
}
fn decode_gp(body: &[u8]) -> arcgis::Result<ServiceConfig> {
    GPServiceConfig::decode(body).map(ServiceConfig::GPServer)
}

fn catalog_map(config: &ServiceConfig) -> Option<&dyn Catalog> {
    match config {
        ServiceConfig::MapServer(c) => Some(c as &dyn Catalog),
        _ => None,
    }
}
fn catalog_feature(config: &ServiceConfig) -> Option<&dyn Catalog> {
    match config {
        ServiceConfig::FeatureServer(c) => Some(c as &dyn Catalog),
        _ => None,
    }
}
fn no_catalog(_: &ServiceConfig) -> Option<&dyn Catalog> {
    None
}

/// Indexed by `ServiceType as usize`.
pub static HANDLERS: [Handler; 4] = [
    Handler {
        service_type: ServiceType::MapServer,
        decode: decode_map,
        catalog: catalog_map,
    },
    Handler {
        service_type: ServiceType::FeatureServer,
        decode: decode_feature,
        catalog: catalog_feature,
    },
    Handler {
        service_type: ServiceType::GeometryServer,
        decode: decode_geometry,
        catalog: no_catalog,
    },
    Handler {
        service_type: ServiceType::GPServer,
        decode: decode_gp,
        catalog: no_catalog,
    },
];

impl ServiceType {
    pub fn handler(self) -> &'static Handler {
        &HANDLERS[self as usize]
    }
}

impl ServiceConfig {
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::MapServer(_) => ServiceType::MapServer,
            Self::FeatureServer(_) => ServiceType::FeatureServer,
            Self::GeometryServer(_) => ServiceType::GeometryServer,
            Self::GPServer(_) => ServiceType::GPServer,
        }
    }

    /// Declared layers and tables, for the types that have them.
    pub fn catalog(&self) -> Option<&dyn Catalog> {
        (self.service_type().handler().catalog)(self)
    }

    /// The document exactly as the server sent it.
    pub fn raw(&self) -> &Extra {
        match self {
            Self::MapServer(c) => c.raw(),
            Self::FeatureServer(c) => c.raw(),
            Self::GeometryServer(c) => &c.0,
            Self::GPServer(c) => &c.0,
        }
    }

    /// The bare document, without our type tag.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        match pretty {
            true => serde_json::to_string_pretty(self.raw()),
            false => serde_json::to_string(self.raw()),
        }
    }
}
