// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;
use thiserror::Error;

use crate::model::Configuration;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("invalid configuration structure: {reason}")]
    InvalidStructure { reason: String },
}

impl ImportError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            reason: reason.into(),
        }
    }
}

/// Parses a serialized configuration.
///
/// The document must be a JSON object carrying an `id` and a `nodes` array; everything else
/// falls back to defaults when absent. The tree itself is not validated here.
pub fn import_configuration(json: &str) -> Result<Configuration, ImportError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|err| ImportError::invalid(format!("not valid JSON: {err}")))?;

    let Some(object) = value.as_object() else {
        return Err(ImportError::invalid("document is not an object"));
    };
    match object.get("id") {
        Some(Value::String(id)) if !id.is_empty() => {}
        Some(Value::Null) | None => return Err(ImportError::invalid("missing `id`")),
        Some(_) => return Err(ImportError::invalid("`id` must be a non-empty string")),
    }
    match object.get("nodes") {
        Some(Value::Array(_)) => {}
        Some(Value::Null) | None => return Err(ImportError::invalid("missing `nodes`")),
        Some(_) => return Err(ImportError::invalid("`nodes` must be an array")),
    }

    serde_json::from_value(value).map_err(|err| ImportError::invalid(err.to_string()))
}

/// Serializes a configuration as pretty-printed JSON.
pub fn export_configuration(config: &Configuration) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// JSON Schema describing the configuration document.
pub fn configuration_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Configuration)).unwrap_or(Value::Null)
}
