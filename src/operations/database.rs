use crate::dialects::DatabaseDialect;
use crate::error::{CatalogError, Result};
use crate::executor::ConnectionSource;
use crate::operations::{escape_literal, fetch_table_names, open, validate_identifier};
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Schema (database) lifecycle for one dialect.
pub struct DatabaseOperations<'a> {
    dialect: &'a dyn DatabaseDialect,
    connections: &'a dyn ConnectionSource,
}

impl<'a> DatabaseOperations<'a> {
    pub fn new(dialect: &'a dyn DatabaseDialect, connections: &'a dyn ConnectionSource) -> Self {
        Self { dialect, connections }
    }

    pub fn is_system_schema(&self, name: &str) -> bool {
        self.dialect.is_system_schema(name)
    }

    pub fn generate_create_schema_sql(
        &self,
        name: &str,
        comment: Option<&str>,
        properties: &BTreeMap<String, String>,
    ) -> Result<String> {
        validate_identifier("Schema", name)?;
        let features = &self.dialect.capability().features;
        let comment = comment.filter(|c| !c.is_empty());

        if comment.is_some() && !features.supports_schema_comment {
            return Err(CatalogError::UnsupportedOperation(format!(
                "{} doesn't support setting schema comment",
                self.dialect.name()
            )));
        }
        if !properties.is_empty() && !features.supports_schema_properties {
            return Err(CatalogError::UnsupportedOperation(
                "Properties are not supported yet".to_string(),
            ));
        }

        let mut sql = format!("CREATE SCHEMA IF NOT EXISTS {}", name);
        if let Some(comment) = comment {
            sql.push_str(&format!(" COMMENT '{}'", escape_literal(comment)));
        }
        for (key, value) in properties {
            sql.push_str(&format!(" {} = {}", key, value));
        }

        info!("Generated create schema:{} sql: {}", name, sql);
        Ok(sql)
    }

    /// Without `cascade` the schema is probed first and must hold no tables.
    pub fn generate_drop_schema_sql(&self, name: &str, cascade: bool) -> Result<String> {
        validate_identifier("Schema", name)?;
        let sql = format!("DROP SCHEMA {}", name);
        if cascade {
            return Ok(sql);
        }

        let mut connection = open(self.dialect, self.connections, None)?;
        let tables = fetch_table_names(self.dialect, connection.as_mut(), name)?;
        if !tables.is_empty() {
            warn!("Refusing to drop schema {} holding {} tables", name, tables.len());
            return Err(CatalogError::NonEmptySchema(name.to_string()));
        }

        Ok(sql)
    }

    pub fn create_schema(
        &self,
        name: &str,
        comment: Option<&str>,
        properties: &BTreeMap<String, String>,
    ) -> Result<()> {
        let sql = self.generate_create_schema_sql(name, comment, properties)?;
        let mut connection = open(self.dialect, self.connections, None)?;
        connection
            .execute_update(&sql)
            .map_err(|e| self.dialect.translate_error(e))?;

        info!("Created schema {}", name);
        Ok(())
    }

    /// Confirm the schema exists and return its name.
    pub fn load_schema(&self, name: &str) -> Result<String> {
        if self.list_all_schemas()?.contains(name) {
            debug!("Loaded schema {}", name);
            Ok(name.to_string())
        } else {
            Err(CatalogError::SchemaNotFound(name.to_string()))
        }
    }

    /// Returns `false` when the schema did not exist.
    pub fn drop_schema(&self, name: &str, cascade: bool) -> Result<bool> {
        let sql = self.generate_drop_schema_sql(name, cascade)?;
        let mut connection = open(self.dialect, self.connections, None)?;

        match connection.execute_update(&sql) {
            Ok(_) => {
                info!("Dropped schema {}", name);
                Ok(true)
            }
            Err(e) => match self.dialect.translate_error(e) {
                CatalogError::SchemaNotFound(message) => {
                    warn!("Schema {} does not exist: {}", name, message);
                    Ok(false)
                }
                other => Err(other),
            },
        }
    }

    /// User schemas, sorted; reserved system schemas are never returned.
    pub fn list_schemas(&self) -> Result<Vec<String>> {
        let schemas: Vec<String> = self
            .list_all_schemas()?
            .into_iter()
            .filter(|name| !self.is_system_schema(name))
            .collect();

        info!("Finished listing {} schemas", schemas.len());
        Ok(schemas)
    }

    fn list_all_schemas(&self) -> Result<BTreeSet<String>> {
        let mut connection = open(self.dialect, self.connections, None)?;
        let rows = connection
            .execute_query(&self.dialect.capability().introspection.list_schemas)
            .map_err(|e| self.dialect.translate_error(e))?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get("TABLE_SCHEM"))
            .map(str::to_string)
            .collect())
    }
}
