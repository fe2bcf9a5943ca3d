use super::{defaults, types};
use crate::dialects::base::{DatabaseDialect, DialectCapability};
use crate::error::CatalogError;
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, PortableType};
use std::sync::OnceLock;

static CAPABILITY: OnceLock<DialectCapability> = OnceLock::new();

pub struct GbaseDialect {
    capability: &'static DialectCapability,
}

impl GbaseDialect {
    pub fn new() -> Self {
        let capability = CAPABILITY.get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            toml::from_str(config_str).expect("Failed to parse GBase dialect config")
        });

        Self { capability }
    }
}

impl Default for GbaseDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for GbaseDialect {
    fn capability(&self) -> &DialectCapability {
        self.capability
    }

    fn to_portable_type(&self, descriptor: &DialectTypeDescriptor) -> PortableType {
        types::to_portable(descriptor)
    }

    fn from_portable_type(&self, data_type: &PortableType) -> Result<String, CatalogError> {
        types::from_portable(data_type)
    }

    fn default_from_sql(
        &self,
        descriptor: &DialectTypeDescriptor,
        raw: Option<&str>,
        _is_expression: bool,
        nullable: bool,
    ) -> DefaultValueExpression {
        defaults::from_sql(self.capability, descriptor, raw, nullable)
    }
}
