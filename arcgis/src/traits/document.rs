use crate::error::{Error, Result};
use crate::types::envelope::RemoteError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A JSON document served at some node of the directory.
///
/// Decoding checks for the server's error envelope first. ArcGIS answers
/// most failures with a 200 and `{"error": {...}}`, and since nearly every
/// field here is optional, that body would otherwise decode into an empty
/// document without complaint.
pub trait Document: Serialize + DeserializeOwned {
    /// What to call this kind of document in errors.
    const KIND: &'static str;

    fn decode(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let json = |source| Error::Json {
            kind: Self::KIND,
            source,
        };
        let value: Value = serde_json::from_slice(bytes.as_ref()).map_err(json)?;
        if let Some(remote) = RemoteError::from_envelope(&value) {
            return Err(Error::Remote(remote));
        }
        serde_json::from_value(value).map_err(json)
    }

    /// Compact JSON, as served for `f=json`.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON, as served for `f=pjson`.
    fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
