//! Model schemas declared in TOML.
//!
//! ```toml
//! [[model]]
//! name = "user_profiles"
//! nullable = ["facebook_profile"]
//!
//! [[model.fields]]
//! name = "facebook_profile"
//! kind = "text"
//! ```

use crate::{ModelResult, ModelSchema};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Raw TOML structure of a schema file.
#[derive(Deserialize)]
struct SchemaFile {
    #[serde(default, rename = "model")]
    models: Vec<ModelSchema>,
}

impl ModelSchema {
    /// Parses and validates every `[[model]]` table in `contents`.
    pub fn from_toml_str(contents: &str) -> ModelResult<Vec<ModelSchema>> {
        let file: SchemaFile = toml::from_str(contents)?;
        for schema in &file.models {
            schema.validate()?;
        }
        Ok(file.models)
    }
}

/// Loads model schemas from a TOML file.
pub fn load_schemas(path: &Path) -> ModelResult<Vec<ModelSchema>> {
    let contents = std::fs::read_to_string(path)?;
    let schemas = ModelSchema::from_toml_str(&contents)?;
    info!("Loaded {} model schema(s) from {:?}", schemas.len(), path);
    Ok(schemas)
}
