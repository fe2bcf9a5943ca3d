use crate::model::expression::DefaultValueExpression;
use crate::model::types::PortableType;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: PortableType,
    pub nullable: bool,
    pub default_value: DefaultValueExpression,
    pub comment: Option<String>,
    pub auto_increment: bool,
}

impl Column {
    /// Nullable column without default, comment or auto increment.
    pub fn new(name: impl Into<String>, data_type: PortableType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default_value: DefaultValueExpression::NotSet,
            comment: None,
            auto_increment: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default_value: DefaultValueExpression) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    PrimaryKey,
    UniqueKey,
}

impl IndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::PrimaryKey => "PRIMARY_KEY",
            IndexType::UniqueKey => "UNIQUE_KEY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub index_type: IndexType,
    pub name: String,
    /// One path per indexed field; nested paths have more than one segment.
    pub field_names: Vec<Vec<String>>,
}

impl Index {
    pub fn primary(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            index_type: IndexType::PrimaryKey,
            name: name.into(),
            field_names: fields.iter().map(|f| vec![f.to_string()]).collect(),
        }
    }

    pub fn unique(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            index_type: IndexType::UniqueKey,
            name: name.into(),
            field_names: fields.iter().map(|f| vec![f.to_string()]).collect(),
        }
    }
}

/// Partitioning transform applied to table fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    pub name: String,
    pub field_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionStrategy {
    #[default]
    None,
    Hash,
    Range,
    Even,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    pub strategy: DistributionStrategy,
    pub number: u32,
    pub field_names: Vec<String>,
}

impl Distribution {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.strategy == DistributionStrategy::None && self.field_names.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field_name: String,
    pub direction: SortDirection,
}

/// Everything `CREATE TABLE` needs besides the target schema.
#[derive(Debug, Clone, Default)]
pub struct CreateTableRequest {
    pub name: String,
    pub columns: Vec<Column>,
    pub comment: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub partitioning: Vec<Transform>,
    pub distribution: Distribution,
    pub indexes: Vec<Index>,
    pub sort_orders: Vec<SortOrder>,
}

impl CreateTableRequest {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            ..Self::default()
        }
    }

    pub fn with_indexes(mut self, indexes: Vec<Index>) -> Self {
        self.indexes = indexes;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A table as loaded back from backend metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub comment: Option<String>,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
