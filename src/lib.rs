pub mod config;
pub mod defaults;
pub mod diagnostic;
pub mod fields;
pub mod model;
pub mod module;
pub mod naming;
pub mod output;
pub mod python;
pub mod relation;
pub mod schema;

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

pub use config::{Config, ConfigError};
pub use diagnostic::{Warning, WarningKind};
pub use module::{GenerateError, Generated, generate};
pub use schema::{Schema, SchemaError};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Generate a Tortoise models module from DMMF JSON.
///
/// `options` is an optional JSON object of generator options with string
/// values, e.g. `{"appName": "app"}`.
#[wasm_bindgen(js_name = "generateModels")]
pub fn generate_models(dmmf: &str, options: Option<String>) -> Result<String, String> {
    let options: BTreeMap<String, String> = match options.as_deref() {
        Some(json) => serde_json::from_str(json).map_err(|e| e.to_string())?,
        None => BTreeMap::new(),
    };
    let config = Config::from_options(&options).map_err(|e| e.to_string())?;
    let schema = Schema::from_json(dmmf).map_err(|e| e.to_string())?;
    let generated = generate(&schema, &config).map_err(|e| e.to_string())?;
    Ok(generated.source)
}
