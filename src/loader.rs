//! Loads array configurations from JSON.
//!
//! The tree is walked before it is handed to serde so that a missing required
//! field is reported as [`ArrayConfigError::MissingRequiredField`] with the
//! dotted path of the node that lacks it, e.g. `array_config.source_array_config`.

use std::{fs, path::Path};

use serde_json::Value;

use crate::{config::ArrayConfig, errors::ArrayConfigError, metadata::ArrayKind};

pub const ROOT_NODE: &str = "array_config";

pub fn load_array_config(value: &Value) -> Result<ArrayConfig, ArrayConfigError> {
    load_array_config_at(value, ROOT_NODE)
}

/// Like [`load_array_config`], reporting errors relative to `node`.
pub fn load_array_config_at(value: &Value, node: &str) -> Result<ArrayConfig, ArrayConfigError> {
    check_node(value, node)?;
    serde_json::from_value(value.clone())
        .map_err(|e| ArrayConfigError::serialization(format!("{node}: {e}")))
}

pub fn load_array_config_str(text: &str) -> Result<ArrayConfig, ArrayConfigError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ArrayConfigError::serialization(e.to_string()))?;
    load_array_config(&value)
}

pub fn load_array_config_file<P: AsRef<Path>>(path: P) -> Result<ArrayConfig, ArrayConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| ArrayConfigError::io(format!("{}: {e}", path.display())))?;
    log::debug!("loading array config from {}", path.display());
    load_array_config_str(&text)
}

fn check_node(value: &Value, node: &str) -> Result<(), ArrayConfigError> {
    let object = value.as_object().ok_or_else(|| {
        ArrayConfigError::invalid_config(format!("{node} must be a JSON object"))
    })?;
    let tag = match object.get("type") {
        Some(Value::String(tag)) => tag,
        None | Some(Value::Null) => return Err(ArrayConfigError::missing_field("type", node)),
        Some(other) => {
            return Err(ArrayConfigError::invalid_config(format!(
                "{node}.type must be a string, got {other}"
            )));
        }
    };
    let kind = ArrayKind::parse(tag)
        .ok_or_else(|| ArrayConfigError::unknown_type(format!("`{tag}` at {node}")))?;
    for field in kind.fields() {
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(ArrayConfigError::missing_field(field.name, node));
            }
            Some(child) if field.nested && !child.is_null() => {
                check_node(child, &format!("{node}.{}", field.name))?;
            }
            _ => {}
        }
    }
    Ok(())
}
