//! Entry point tying a dialect to a connection source.

use crate::dialects::{self, DatabaseDialect, DialectError};
use crate::error::{CatalogError, Result};
use crate::executor::{ConnectionError, ConnectionManager, ConnectionSource};
use crate::model::{Config, CreateTableRequest, Table};
use crate::operations::{DatabaseOperations, TableOperations};
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CatalogInitError {
    #[error("No connection string configured")]
    MissingConnectionString,

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// A catalog over one backend: schema and table operations dispatched
/// through the selected dialect.
pub struct Catalog {
    dialect: Arc<dyn DatabaseDialect>,
    connections: Box<dyn ConnectionSource>,
}

impl Catalog {
    pub fn new(dialect: Arc<dyn DatabaseDialect>, connections: Box<dyn ConnectionSource>) -> Self {
        Self { dialect, connections }
    }

    /// Resolve the dialect (configured name, else detection from the
    /// connection string) and connect over ODBC.
    pub fn from_config(config: &Config) -> std::result::Result<Self, CatalogInitError> {
        let connection_string = config
            .database
            .connection_string
            .as_deref()
            .ok_or(CatalogInitError::MissingConnectionString)?;
        let configured = config.catalog.dialect.as_deref().filter(|name| !name.is_empty());
        let dialect = dialects::get_dialect_with_config(None, Some(connection_string), configured)?;

        let binding_dialect = dialect.clone();
        let manager = ConnectionManager::new(connection_string)?
            .with_login_timeout(config.database.login_timeout_sec)
            .with_schema_binding(move |schema| binding_dialect.schema_binding_sql(schema));

        info!("Catalog ready for dialect {}", dialect.name());
        Ok(Self::new(dialect, Box::new(manager)))
    }

    pub fn dialect(&self) -> &dyn DatabaseDialect {
        self.dialect.as_ref()
    }

    pub fn schemas(&self) -> DatabaseOperations<'_> {
        DatabaseOperations::new(self.dialect.as_ref(), self.connections.as_ref())
    }

    pub fn tables(&self) -> TableOperations<'_> {
        TableOperations::new(self.dialect.as_ref(), self.connections.as_ref())
    }

    pub fn create_schema(&self, name: &str, comment: Option<&str>) -> Result<()> {
        self.schemas().create_schema(name, comment, &BTreeMap::new())
    }

    pub fn drop_schema(&self, name: &str, cascade: bool) -> Result<bool> {
        self.schemas().drop_schema(name, cascade)
    }

    pub fn list_schemas(&self) -> Result<Vec<String>> {
        self.schemas().list_schemas()
    }

    pub fn create_table(&self, schema: &str, request: &CreateTableRequest) -> Result<()> {
        self.ensure_user_schema(schema)?;
        self.tables().create(schema, request)
    }

    pub fn load_table(&self, schema: &str, table: &str) -> Result<Table> {
        self.tables().load(schema, table)
    }

    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        self.tables().list_tables(schema)
    }

    pub fn drop_table(&self, schema: &str, table: &str) -> Result<bool> {
        self.tables().drop_table(schema, table)
    }

    fn ensure_user_schema(&self, schema: &str) -> Result<()> {
        if self.dialect.is_system_schema(schema) {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Cannot create tables in system schema {}",
                schema
            )));
        }
        Ok(())
    }
}
