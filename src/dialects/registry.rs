use crate::dialects::base::{DatabaseDialect, DetectionResult, DialectError};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Central registry for all available database dialects
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn DatabaseDialect>>,
    aliases: HashMap<String, String>, // alias -> dialect_name mapping
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn register(&mut self, dialect: Arc<dyn DatabaseDialect>) {
        let name = dialect.name().to_string();
        debug!("Registering dialect: {}", name);

        for alias in dialect.aliases() {
            self.aliases.insert(alias.clone(), name.clone());
        }
        self.dialects.insert(name, dialect);
    }

    /// Get a dialect by name or alias, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DatabaseDialect>> {
        let key = name.to_ascii_lowercase();
        if let Some(dialect) = self.dialects.get(&key) {
            return Some(dialect.clone());
        }

        self.aliases
            .get(&key)
            .and_then(|dialect_name| self.dialects.get(dialect_name))
            .cloned()
    }

    /// Detect the dialect from a connection string. More than one match is
    /// ambiguous.
    pub fn detect(&self, connection_string: &str) -> Result<Arc<dyn DatabaseDialect>, DialectError> {
        debug!(
            "Detecting dialect for connection string (length: {})",
            connection_string.len()
        );

        let mut candidates: Vec<(Arc<dyn DatabaseDialect>, DetectionResult)> = self
            .dialects
            .values()
            .filter_map(|dialect| dialect.detect(connection_string).map(|result| (dialect.clone(), result)))
            .collect();

        for (_, result) in &candidates {
            debug!(
                "Dialect '{}' matched pattern '{}'",
                result.dialect_name, result.matched_pattern
            );
        }

        match candidates.len() {
            0 => {
                warn!("No dialect detected for connection string");
                Err(DialectError::NotFound("No matching dialect found".to_string()))
            }
            1 => {
                let (dialect, _) = candidates.remove(0);
                debug!("Selected dialect: {}", dialect.name());
                Ok(dialect)
            }
            _ => {
                let mut names: Vec<String> = candidates.iter().map(|(d, _)| d.name().to_string()).collect();
                names.sort();
                Err(DialectError::Ambiguous(names))
            }
        }
    }

    /// Registered dialect names, sorted.
    pub fn list_dialects(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dialects.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_aliases(&self, dialect_name: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .aliases
            .iter()
            .filter(|(_, name)| *name == dialect_name)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<DialectRegistry> = OnceLock::new();

/// The built-in registry; populated on first use and read-only afterwards.
pub fn get_registry() -> &'static DialectRegistry {
    GLOBAL_REGISTRY.get_or_init(create_default_registry)
}

fn create_default_registry() -> DialectRegistry {
    let mut registry = DialectRegistry::new();

    registry.register(Arc::new(crate::dialects::gbase::GbaseDialect::new()));
    registry.register(Arc::new(crate::dialects::phoenix::PhoenixDialect::new()));

    registry
}
