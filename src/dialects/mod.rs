//! Dialect system for the catalog bridge
//!
//! Each dialect is configured via an embedded TOML file and implements the
//! DatabaseDialect trait: capability data plus the type, default-value and
//! exception converters.

pub mod base;
pub mod defaults;
pub mod registry;

pub mod gbase;
pub mod phoenix;

pub use base::{DatabaseDialect, DetectionResult, DialectCapability, DialectError};
pub use gbase::GbaseDialect;
pub use phoenix::PhoenixDialect;
pub use registry::get_registry;

use log::info;
use std::sync::Arc;

/// Get dialect by name or alias
pub fn get_dialect(name: &str) -> Option<Arc<dyn DatabaseDialect>> {
    get_registry().get(name)
}

/// Resolve the dialect: explicit name, then configured name, then detection
/// from the connection string.
pub fn get_dialect_with_config(
    explicit_name: Option<&str>,
    connection_string: Option<&str>,
    config_dialect: Option<&str>,
) -> Result<Arc<dyn DatabaseDialect>, DialectError> {
    let registry = get_registry();

    if let Some(name) = explicit_name.or(config_dialect) {
        return registry
            .get(name)
            .ok_or_else(|| DialectError::NotFound(name.to_string()));
    }

    match connection_string {
        Some(conn) => {
            let dialect = registry.detect(conn)?;
            info!("Detected dialect '{}' from connection string", dialect.name());
            Ok(dialect)
        }
        None => Err(DialectError::NotFound("No dialect configured".to_string())),
    }
}

/// List all available dialect names
pub fn list_dialects() -> Vec<String> {
    get_registry().list_dialects()
}
