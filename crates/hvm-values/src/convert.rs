//! Conversion between [`Value`] trees and YAML / JSON text

use crate::value::{Mapping, Value};

/// Errors converting documents to and from value trees
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// Tree could not be written as YAML
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[source] serde_yaml::Error),

    /// Tree could not be written as JSON
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[source] serde_json::Error),
}

impl Value {
    /// Parse a YAML (or JSON) document
    ///
    /// Non-string mapping keys are converted to their canonical string form
    /// and YAML tags are dropped in favour of the tagged value. Merge keys
    /// (`<<: *anchor`) are resolved, with explicit keys taking precedence over
    /// merged ones. An empty document parses as `null`.
    ///
    /// Only the YAML 1.2 core schema is recognised: `yes`, `no`, `on` and
    /// `off` are strings, not booleans.
    ///
    /// # Errors
    /// Returns [`ConvertError::InvalidYaml`] if the text is not valid YAML
    pub fn from_yaml_str(text: &str) -> Result<Self, ConvertError> {
        let mut raw: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(ConvertError::InvalidYaml)?;
        raw.apply_merge().map_err(ConvertError::InvalidYaml)?;
        Ok(Self::from(raw))
    }
}

/// Render a mapping as a YAML document
///
/// # Errors
/// Returns [`ConvertError::YamlSerialization`] on serializer failure
pub fn to_yaml_string(map: &Mapping) -> Result<String, ConvertError> {
    serde_yaml::to_string(map).map_err(ConvertError::YamlSerialization)
}

/// Render a mapping as pretty-printed JSON
///
/// # Errors
/// Returns [`ConvertError::JsonSerialization`] on serializer failure
pub fn to_json_string(map: &Mapping) -> Result<String, ConvertError> {
    serde_json::to_string_pretty(map).map_err(ConvertError::JsonSerialization)
}

impl From<serde_yaml::Value> for Value {
    fn from(raw: serde_yaml::Value) -> Self {
        match raw {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => Self::from(n),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_yaml::Value::Mapping(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key_string(key), Self::from(value)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn key_string(key: serde_yaml::Value) -> String {
    match Value::from(key) {
        Value::String(s) => s,
        Value::Number(n) => Value::Number(n).canonical_string().unwrap_or_default(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
