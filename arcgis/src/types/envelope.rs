use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The body of `{"error": {...}}`, which ArcGIS sends with a 200 status.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl RemoteError {
    /// Pull the error out of a response, if the response is an error.
    pub fn from_envelope(value: &Value) -> Option<Self> {
        let inner = value.as_object()?.get("error")?;
        if !inner.is_object() {
            return None;
        }
        // A mangled envelope is still an error; keep whatever we can read.
        Some(
            serde_json::from_value(inner.clone()).unwrap_or_else(|_| Self {
                code: inner["code"].as_i64().unwrap_or_default(),
                message: inner["message"].as_str().unwrap_or_default().to_owned(),
                details: vec![],
            }),
        )
    }
}
