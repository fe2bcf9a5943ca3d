//! Dialect-pluggable relational metadata bridge.
//!
//! Translates a portable schema/table/type model into vendor DDL and reads
//! vendor metadata and errors back into that model. GBase and Phoenix ship
//! as built-in dialects.

pub mod catalog;
pub mod dialects;
pub mod error;
pub mod executor;
pub mod logger;
pub mod model;
pub mod operations;

pub use catalog::{Catalog, CatalogInitError};
pub use dialects::{DatabaseDialect, DialectError, get_dialect, get_dialect_with_config, list_dialects};
pub use error::{CatalogError, Result};
pub use executor::{Connection, ConnectionError, ConnectionManager, ConnectionSource, Row};
pub use model::{
    Column, Config, CreateTableRequest, DefaultValueExpression, DialectTypeDescriptor, Index,
    LiteralValue, PortableType, Table,
};
pub use operations::{DatabaseOperations, TableOperations};
