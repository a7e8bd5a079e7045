//! A small ArcGIS server, served from memory.
//!
//! ```text
//! services
//!   Utilities/
//!     Water (MapServer)        layer 0 Mains
//!     Routing (GPServer)
//!   Parks (FeatureServer)      layers 0 Parks, 1 Trails; table 2 Inspections
//!   Geometry (GeometryServer)  declares a layer, which must be ignored
//! ```

use crate::memtransport::MemTransport;
use crate::transport::json_url;
use indoc::indoc;

pub const ROOT: &str = "https://gis.example.com/arcgis/rest/services";

/// Absolute URL for a path under [`ROOT`].
pub fn url(path: &str) -> String {
    format!("{}{}", ROOT, path)
}

/// The request a transport should record for a path under [`ROOT`].
pub fn requested(path: &str) -> String {
    json_url(&url(path))
}

pub fn server() -> MemTransport {
    MemTransport::new()
        .with(url(""), ROOT_FOLDER)
        .with(url("/Utilities"), UTILITIES_FOLDER)
        .with(url("/Utilities/Water/MapServer"), WATER)
        .with(url("/Utilities/Water/MapServer/0"), WATER_MAINS)
        .with(url("/Utilities/Routing/GPServer"), ROUTING)
        .with(url("/Parks/FeatureServer"), PARKS)
        .with(url("/Parks/FeatureServer/0"), PARKS_PARKS)
        .with(url("/Parks/FeatureServer/1"), PARKS_TRAILS)
        .with(url("/Parks/FeatureServer/2"), PARKS_INSPECTIONS)
        .with(url("/Geometry/GeometryServer"), GEOMETRY)
}

const ROOT_FOLDER: &str = indoc! {r#"
    {
      "currentVersion": 10.81,
      "folders": ["Utilities"],
      "services": [
        {"name": "Parks", "type": "FeatureServer"},
        {"name": "Geometry", "type": "GeometryServer"}
      ]
    }
"#};

const UTILITIES_FOLDER: &str = indoc! {r#"
    {
      "currentVersion": 10.81,
      "folders": [],
      "services": [
        {"name": "Utilities/Water", "type": "MapServer"},
        {"name": "Utilities/Routing", "type": "GPServer"}
      ]
    }
"#};

const WATER: &str = indoc! {r#"
    {
      "mapName": "Water",
      "layers": [
        {
          "id": 0,
          "name": "Mains",
          "parentLayerId": -1,
          "defaultVisibility": true,
          "subLayerIds": null,
          "minScale": 0,
          "maxScale": 0,
          "type": "Feature Layer",
          "geometryType": "esriGeometryPolyline"
        }
      ],
      "tables": []
    }
"#};

const WATER_MAINS: &str = indoc! {r#"
    {
      "id": 0,
      "name": "Mains",
      "type": "Feature Layer",
      "geometryType": "esriGeometryPolyline",
      "fields": [{"name": "OBJECTID", "type": "esriFieldTypeOID"}]
    }
"#};

const ROUTING: &str = r#"{"serviceDescription":"Network routing","tasks":["FindRoute"]}"#;

const PARKS: &str = indoc! {r#"
    {
      "currentVersion": 10.81,
      "serviceDescription": "Parks and trails",
      "layers": [
        {
          "id": 0,
          "name": "Parks",
          "parentLayerId": -1,
          "defaultVisibility": true,
          "subLayerIds": null,
          "minScale": 250000,
          "maxScale": 0,
          "type": "Feature Layer",
          "geometryType": "esriGeometryPolygon"
        },
        {
          "id": 1,
          "name": "Trails",
          "parentLayerId": -1,
          "defaultVisibility": false,
          "subLayerIds": null,
          "minScale": 50000,
          "maxScale": 0,
          "type": "Feature Layer",
          "geometryType": "esriGeometryPolyline"
        }
      ],
      "tables": [{"id": 2, "name": "Inspections"}]
    }
"#};

const PARKS_PARKS: &str = indoc! {r#"
    {
      "id": 0,
      "name": "Parks",
      "type": "Feature Layer",
      "geometryType": "esriGeometryPolygon"
    }
"#};

const PARKS_TRAILS: &str = indoc! {r#"
    {
      "id": 1,
      "name": "Trails",
      "type": "Feature Layer",
      "geometryType": "esriGeometryPolyline"
    }
"#};

const PARKS_INSPECTIONS: &str = r#"{"id":2,"name":"Inspections","type":"Table"}"#;

const GEOMETRY: &str = indoc! {r#"
    {
      "serviceDescription": "Geometry service",
      "layers": [{"id": 0, "name": "Bogus", "type": "Feature Layer"}]
    }
"#};
