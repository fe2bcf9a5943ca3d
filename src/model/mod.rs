pub mod config;
pub mod expression;
pub mod table;
pub mod types;

pub use config::{CatalogConfig, Config, ConfigError, DatabaseConfig, LoggingConfig};
pub use expression::{DefaultValueExpression, LiteralValue};
pub use table::{
    Column, CreateTableRequest, Distribution, DistributionStrategy, Index, IndexType, SortDirection,
    SortOrder, Table, Transform,
};
pub use types::{DialectTypeDescriptor, PortableType};
