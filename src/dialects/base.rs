use crate::dialects::defaults;
use crate::error::CatalogError;
use crate::executor::ConnectionError;
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, PortableType};
use log::error;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Static facts about a dialect, loaded once from its embedded `dialect.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectCapability {
    pub metadata: DialectMetadata,
    pub detection: DetectionConfig,
    pub features: FeatureConfig,
    pub sql: SqlConfig,
    pub formats: FormatConfig,
    pub schemas: SchemaConfig,
    pub errors: ErrorCodeConfig,
    pub introspection: IntrospectionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialectMetadata {
    pub name: String,
    pub version: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    pub connection_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    pub supports_schema_comment: bool,
    pub supports_schema_properties: bool,
    pub supports_partitioning: bool,
    pub supports_distribution: bool,
    pub supports_sort_orders: bool,
    pub supports_comments: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqlConfig {
    pub quote_identifier: String,
    pub escape_identifier: String,
    pub current_timestamp: String,
    pub null_keyword: String,
    pub auto_increment_keyword: Option<String>,
    /// Primary keys render as `CONSTRAINT <name> PRIMARY KEY (..)`.
    pub named_primary_key: bool,
    /// Table names render as `<schema>.<table>`.
    pub qualify_table_name: bool,
    pub statement_terminator: String,
    /// Statement binding a session to a schema; `{schema}` is substituted.
    pub schema_binding: Option<String>,
}

/// chrono patterns for temporal default literals.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormatConfig {
    pub date: String,
    pub time: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaConfig {
    pub system: Vec<String>,
}

/// Native error codes per portable error kind.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorCodeConfig {
    #[serde(default)]
    pub schema_not_found: Vec<i32>,
    #[serde(default)]
    pub schema_already_exists: Vec<i32>,
    #[serde(default)]
    pub table_not_found: Vec<i32>,
    #[serde(default)]
    pub table_already_exists: Vec<i32>,
}

/// Metadata queries; `{schema}` and `{table}` are substituted as escaped
/// string literals. Result columns use JDBC metadata labels.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntrospectionConfig {
    pub list_schemas: String,
    pub list_tables: String,
    /// `TABLE_TYPE` values that denote plain tables.
    pub table_relation_kinds: Vec<String>,
    pub columns: String,
    pub primary_keys: String,
    pub table_comment: Option<String>,
}

/// Result of dialect detection
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub dialect_name: String,
    pub matched_pattern: String,
}

/// One backend dialect: capability data plus the type, default-value and
/// exception converters that operations dispatch through.
pub trait DatabaseDialect: Send + Sync {
    fn capability(&self) -> &DialectCapability;

    fn name(&self) -> &str {
        &self.capability().metadata.name
    }

    fn aliases(&self) -> &[String] {
        &self.capability().metadata.aliases
    }

    /// Map backend type metadata to a portable type. Unknown names become
    /// `PortableType::External`.
    fn to_portable_type(&self, descriptor: &DialectTypeDescriptor) -> PortableType;

    /// Render a portable type as this dialect's type name.
    fn from_portable_type(&self, data_type: &PortableType) -> Result<String, CatalogError>;

    /// Render a default as DEFAULT clause text; `None` omits the clause.
    fn default_to_sql(&self, value: &DefaultValueExpression) -> Result<Option<String>, CatalogError> {
        defaults::render(self.capability(), value)
    }

    /// Interpret a backend default. Never fails: text that cannot be parsed
    /// comes back as `DefaultValueExpression::Unparsed`.
    fn default_from_sql(
        &self,
        descriptor: &DialectTypeDescriptor,
        raw: Option<&str>,
        is_expression: bool,
        nullable: bool,
    ) -> DefaultValueExpression;

    /// Translate a native backend error code into the portable taxonomy.
    fn to_catalog_error(&self, code: i32, message: &str) -> CatalogError {
        let errors = &self.capability().errors;
        let message = message.to_string();
        if errors.schema_not_found.contains(&code) {
            CatalogError::SchemaNotFound(message)
        } else if errors.schema_already_exists.contains(&code) {
            CatalogError::SchemaAlreadyExists(message)
        } else if errors.table_not_found.contains(&code) {
            CatalogError::TableNotFound(message)
        } else if errors.table_already_exists.contains(&code) {
            CatalogError::TableAlreadyExists(message)
        } else {
            CatalogError::Backend { code, message }
        }
    }

    /// Route a collaborator failure through the exception converter.
    fn translate_error(&self, err: ConnectionError) -> CatalogError {
        error!("{} backend error {}: {}", self.name(), err.code(), err.message());
        self.to_catalog_error(err.code(), err.message())
    }

    fn is_system_schema(&self, name: &str) -> bool {
        self.capability().schemas.system.iter().any(|s| s == name)
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        let quote = &self.capability().sql.quote_identifier;
        let escape = &self.capability().sql.escape_identifier;
        let escaped = identifier.replace(quote.as_str(), escape);
        format!("{}{}{}", quote, escaped, quote)
    }

    /// Statement binding a session to `schema`, if the dialect needs one.
    fn schema_binding_sql(&self, schema: &str) -> Option<String> {
        self.capability()
            .sql
            .schema_binding
            .as_ref()
            .map(|template| template.replace("{schema}", &self.quote_identifier(schema)))
    }

    /// Match the connection string against the dialect's detection patterns.
    fn detect(&self, connection_string: &str) -> Option<DetectionResult> {
        let conn_lower = connection_string.to_lowercase();
        self.capability()
            .detection
            .connection_patterns
            .iter()
            .find(|pattern| {
                Regex::new(pattern)
                    .map(|re| re.is_match(&conn_lower))
                    .unwrap_or(false)
            })
            .map(|pattern| DetectionResult {
                dialect_name: self.name().to_string(),
                matched_pattern: pattern.clone(),
            })
    }
}

/// Error types for dialect lookup
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    #[error("Dialect not found: {0}")]
    NotFound(String),

    #[error("Multiple dialects detected: {0:?}")]
    Ambiguous(Vec<String>),
}
