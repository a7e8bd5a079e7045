//! Service documents.
//!
//! Map and Feature services declare layers and tables, which is all the
//! directory walk needs from them. Those lists are read out of the document
//! as a view; the document itself is kept whole. Geometry and GP services
//! declare neither, so their documents stay completely opaque.

use super::{list, Extra};
use crate::traits::{Catalog, Document};
use serde::{Deserialize, Serialize};

fn no_parent() -> i64 {
    -1
}

/// A layer, as declared in its service's `layers` list.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// `-1` for top-level layers.
    #[serde(default = "no_parent")]
    pub parent_layer_id: i64,

    #[serde(default)]
    pub default_visibility: bool,

    #[serde(default)]
    pub sub_layer_ids: Option<Vec<i64>>,

    #[serde(default)]
    pub min_scale: f64,

    #[serde(default)]
    pub max_scale: f64,

    /// "Feature Layer", "Group Layer", "Raster Layer", ...
    #[serde(rename = "type", default)]
    pub layer_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A table, as declared in its service's `tables` list.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Served at `.../MapServer`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Extra", into = "Extra")]
pub struct MapServiceConfig {
    raw: Extra,
    layers: Vec<LayerDescriptor>,
    tables: Vec<TableDescriptor>,
}

/// Served at `.../FeatureServer`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Extra", into = "Extra")]
pub struct FeatureServiceConfig {
    raw: Extra,
    layers: Vec<LayerDescriptor>,
    tables: Vec<TableDescriptor>,
}

/// Served at `.../GeometryServer`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryServiceConfig(pub Extra);

/// Served at `.../GPServer`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GPServiceConfig(pub Extra);

impl MapServiceConfig {
    pub fn raw(&self) -> &Extra {
        &self.raw
    }
}

impl FeatureServiceConfig {
    pub fn raw(&self) -> &Extra {
        &self.raw
    }
}

impl TryFrom<Extra> for MapServiceConfig {
    type Error = serde_json::Error;

    fn try_from(raw: Extra) -> serde_json::Result<Self> {
        let layers = list(&raw, "layers")?;
        let tables = list(&raw, "tables")?;
        Ok(Self {
            raw,
            layers,
            tables,
        })
    }
}

impl TryFrom<Extra> for FeatureServiceConfig {
    type Error = serde_json::Error;

    fn try_from(raw: Extra) -> serde_json::Result<Self> {
        let layers = list(&raw, "layers")?;
        let tables = list(&raw, "tables")?;
        Ok(Self {
            raw,
            layers,
            tables,
        })
    }
}

impl From<MapServiceConfig> for Extra {
    fn from(config: MapServiceConfig) -> Self {
        config.raw
    }
}

impl From<FeatureServiceConfig> for Extra {
    fn from(config: FeatureServiceConfig) -> Self {
        config.raw
    }
}

impl Catalog for MapServiceConfig {
    fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }
    fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }
}

impl Catalog for FeatureServiceConfig {
    fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }
    fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }
}

impl Document for MapServiceConfig {
    const KIND: &'static str = "map service";
}
impl Document for FeatureServiceConfig {
    const KIND: &'static str = "feature service";
}
impl Document for GeometryServiceConfig {
    const KIND: &'static str = "geometry service";
}
impl Document for GPServiceConfig {
    const KIND: &'static str = "GP service";
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;
    use indoc::indoc;

    const FEATURE_SERVICE: &str = indoc! {r#"
        {
          "currentVersion": 10.81,
          "serviceDescription": "Parks and their amenities",
          "layers": [
            {
              "id": 0,
              "name": "Parks",
              "parentLayerId": -1,
              "defaultVisibility": true,
              "subLayerIds": null,
              "minScale": 0,
              "maxScale": 0,
              "type": "Feature Layer",
              "geometryType": "esriGeometryPolygon"
            },
            {
              "id": 3,
              "name": "Benches",
              "type": "Feature Layer",
              "geometryType": "esriGeometryPoint"
            }
          ],
          "tables": [{"id": 4, "name": "Inspections"}]
        }
    "#};

    #[test]
    fn feature_service() -> Result<()> {
        let fs = FeatureServiceConfig::decode(FEATURE_SERVICE)?;
        let ids: Vec<i64> = fs.layers().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![0, 3]);
        let parks = &fs.layers()[0];
        assert_eq!(parks.geometry_type.as_deref(), Some("esriGeometryPolygon"));
        assert_eq!(parks.default_visibility, true);

        // Absent fields fall back to the ArcGIS defaults.
        let benches = &fs.layers()[1];
        assert_eq!(benches.parent_layer_id, -1);
        assert_eq!(benches.sub_layer_ids, None);
        assert_eq!(benches.default_visibility, false);

        assert_eq!(fs.tables().len(), 1);
        assert_eq!(fs.tables()[0].name, "Inspections");
        assert_eq!(fs.raw()["serviceDescription"], "Parks and their amenities");
        Ok(())
    }

    #[test]
    fn map_service_without_tables() -> Result<()> {
        let ms = MapServiceConfig::decode(r#"{"mapName": "Layers", "layers": []}"#)?;
        assert!(ms.layers().is_empty());
        assert!(ms.tables().is_empty());
        Ok(())
    }

    #[test]
    fn layer_descriptor_requires_id() {
        assert!(MapServiceConfig::decode(r#"{"layers": [{"name": "No id"}]}"#).is_err());
    }

    #[test]
    fn reencode() -> Result<()> {
        let fs = FeatureServiceConfig::decode(FEATURE_SERVICE)?;
        let again = FeatureServiceConfig::decode(fs.to_json().unwrap())?;
        assert_eq!(fs, again);
        Ok(())
    }

    #[test]
    fn verbatim() -> Result<()> {
        // Defaults filled in for the descriptors never leak into the document.
        let body = r#"{"currentVersion":10.81,"layers":[{"id":0,"name":"Parks","type":"Feature Layer","minScale":250000}],"tables":[]}"#;
        let fs = FeatureServiceConfig::decode(body)?;
        assert_eq!(fs.layers()[0].min_scale, 250000.0);
        assert_eq!(fs.layers()[0].parent_layer_id, -1);
        assert_eq!(fs.to_json().unwrap(), body);

        let ms = MapServiceConfig::decode(r#"{"mapName":"Water","tables":[{"id":1,"name":"Valves"}]}"#)?;
        assert_eq!(ms.to_json().unwrap(), r#"{"mapName":"Water","tables":[{"id":1,"name":"Valves"}]}"#);
        Ok(())
    }

    #[test]
    fn bad_tables() {
        assert!(FeatureServiceConfig::decode(r#"{"tables": {"id": 1}}"#).is_err());
    }
}
