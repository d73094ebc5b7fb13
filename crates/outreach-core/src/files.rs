use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ConfigError;

/// Read and deserialize a JSON or YAML file. YAML is chosen by a `.yaml` or
/// `.yml` extension; anything else is parsed as JSON.
pub(crate) fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| ConfigError::FileParse {
        path: path.display().to_string(),
        reason,
    })
}
