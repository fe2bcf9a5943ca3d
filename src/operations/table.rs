use crate::dialects::DatabaseDialect;
use crate::error::{CatalogError, Result};
use crate::executor::{ConnectionSource, Row};
use crate::model::{
    Column, CreateTableRequest, DialectTypeDescriptor, Index, IndexType, Table,
};
use crate::operations::{escape_literal, fetch_table_names, open, render_query, validate_identifier};
use log::{debug, info, warn};

/// Table lifecycle and DDL synthesis for one dialect.
pub struct TableOperations<'a> {
    dialect: &'a dyn DatabaseDialect,
    connections: &'a dyn ConnectionSource,
}

impl<'a> TableOperations<'a> {
    pub fn new(dialect: &'a dyn DatabaseDialect, connections: &'a dyn ConnectionSource) -> Self {
        Self { dialect, connections }
    }

    /// Build and run `CREATE TABLE`. Every validation happens before a
    /// connection is opened.
    pub fn create(&self, schema: &str, request: &CreateTableRequest) -> Result<()> {
        info!("Attempting to create table {} in schema {}", request.name, schema);
        let sql = self.generate_create_table_sql(schema, request)?;

        let mut connection = open(self.dialect, self.connections, self.session_schema(schema))?;
        connection
            .execute_update(&sql)
            .map_err(|e| self.dialect.translate_error(e))?;

        info!("Created table {} in schema {}", request.name, schema);
        Ok(())
    }

    pub fn generate_create_table_sql(&self, schema: &str, request: &CreateTableRequest) -> Result<String> {
        validate_identifier("Schema", schema)?;
        validate_identifier("Table", &request.name)?;
        self.check_features(request)?;

        if request.columns.is_empty() {
            return Err(CatalogError::InvalidSchema(format!(
                "Table {} must define at least one column",
                request.name
            )));
        }
        validate_increment_columns(&request.columns, &request.indexes)?;

        let sql_config = &self.dialect.capability().sql;
        let mut sql = format!("CREATE TABLE {} (\n", self.table_name(schema, &request.name));

        let mut clauses = Vec::with_capacity(request.columns.len() + request.indexes.len());
        for column in &request.columns {
            clauses.push(self.column_definition(column)?);
        }
        for index in &request.indexes {
            clauses.push(self.index_definition(&request.name, index)?);
        }
        sql.push_str(&clauses.join(",\n"));
        sql.push_str("\n)");

        if let Some(comment) = request.comment.as_deref().filter(|c| !c.is_empty()) {
            if self.supports_comments() {
                sql.push_str(&format!(" COMMENT='{}'", escape_literal(comment)));
            } else {
                warn!(
                    "{} does not store table comments, dropping comment of {}",
                    self.dialect.name(),
                    request.name
                );
            }
        }

        if !request.properties.is_empty() {
            let properties: Vec<String> = request
                .properties
                .iter()
                .map(|(key, value)| format!("{} = {}", key, value))
                .collect();
            sql.push('\n');
            sql.push_str(&properties.join(",\n"));
        }

        sql.push_str(&sql_config.statement_terminator);

        info!("Generated create table:{} sql: {}", request.name, sql);
        Ok(sql)
    }

    pub fn load(&self, schema: &str, table: &str) -> Result<Table> {
        validate_identifier("Schema", schema)?;
        validate_identifier("Table", table)?;
        let introspection = &self.dialect.capability().introspection;
        let mut connection = open(self.dialect, self.connections, None)?;

        let tables = fetch_table_names(self.dialect, connection.as_mut(), schema)?;
        if !tables.iter().any(|t| t == table) {
            return Err(CatalogError::TableNotFound(format!("{}.{}", schema, table)));
        }

        let column_rows = connection
            .execute_query(&render_query(&introspection.columns, schema, Some(table)))
            .map_err(|e| self.dialect.translate_error(e))?;
        let columns = column_rows
            .iter()
            .filter_map(|row| self.column_from_row(row))
            .collect();

        let key_rows = connection
            .execute_query(&render_query(&introspection.primary_keys, schema, Some(table)))
            .map_err(|e| self.dialect.translate_error(e))?;
        let indexes = primary_key_from_rows(table, key_rows).into_iter().collect();

        let comment = match &introspection.table_comment {
            Some(query) => connection
                .execute_query(&render_query(query, schema, Some(table)))
                .map_err(|e| self.dialect.translate_error(e))?
                .first()
                .and_then(|row| row.get("REMARKS"))
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            None => None,
        };

        debug!("Loaded table {}.{}", schema, table);
        Ok(Table {
            schema: schema.to_string(),
            name: table.to_string(),
            comment,
            columns,
            indexes,
        })
    }

    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        validate_identifier("Schema", schema)?;
        let mut connection = open(self.dialect, self.connections, None)?;
        let names = fetch_table_names(self.dialect, connection.as_mut(), schema)?;

        info!("Finished listing {} tables for schema {}", names.len(), schema);
        Ok(names)
    }

    pub fn table_exists(&self, schema: &str, table: &str) -> Result<bool> {
        Ok(self.list_tables(schema)?.iter().any(|t| t == table))
    }

    /// Returns `false` when the table did not exist.
    pub fn drop_table(&self, schema: &str, table: &str) -> Result<bool> {
        validate_identifier("Schema", schema)?;
        validate_identifier("Table", table)?;
        let sql = format!(
            "DROP TABLE {}{}",
            self.table_name(schema, table),
            self.dialect.capability().sql.statement_terminator
        );

        let mut connection = open(self.dialect, self.connections, self.session_schema(schema))?;
        match connection.execute_update(&sql) {
            Ok(_) => {
                info!("Dropped table {}.{}", schema, table);
                Ok(true)
            }
            Err(e) => match self.dialect.translate_error(e) {
                CatalogError::TableNotFound(message) => {
                    warn!("Table {}.{} does not exist: {}", schema, table, message);
                    Ok(false)
                }
                other => Err(other),
            },
        }
    }

    pub fn generate_alter_table_sql(&self, schema: &str, table: &str) -> Result<String> {
        debug!("Rejecting alter of {}.{}", schema, table);
        Err(CatalogError::UnsupportedOperation(
            "alter table is not supported".to_string(),
        ))
    }

    pub fn generate_purge_table_sql(&self, table: &str) -> Result<String> {
        debug!("Rejecting purge of {}", table);
        Err(CatalogError::UnsupportedOperation(format!(
            "{} does not support purge table, please use drop table",
            self.dialect.name()
        )))
    }

    fn check_features(&self, request: &CreateTableRequest) -> Result<()> {
        let features = &self.dialect.capability().features;
        let name = self.dialect.name();

        if !request.partitioning.is_empty() && !features.supports_partitioning {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Currently we do not support Partitioning in {}",
                name
            )));
        }
        if !request.distribution.is_none() && !features.supports_distribution {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Currently we do not support distribution in {}",
                name
            )));
        }
        if !request.sort_orders.is_empty() && !features.supports_sort_orders {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Currently we do not support sort orders in {}",
                name
            )));
        }
        if self.dialect.capability().sql.auto_increment_keyword.is_none() {
            if let Some(column) = request.columns.iter().find(|c| c.auto_increment) {
                return Err(CatalogError::UnsupportedOperation(format!(
                    "{} does not support auto-increment column {}",
                    name, column.name
                )));
            }
        }
        Ok(())
    }

    fn column_definition(&self, column: &Column) -> Result<String> {
        validate_identifier("Column", &column.name)?;
        let sql_config = &self.dialect.capability().sql;

        let mut parts = vec![
            format!("  {}", column.name),
            self.dialect.from_portable_type(&column.data_type)?,
            if column.nullable { "NULL" } else { "NOT NULL" }.to_string(),
        ];

        if let Some(default) = self.dialect.default_to_sql(&column.default_value)? {
            parts.push(format!("DEFAULT {}", default));
        }

        if column.auto_increment {
            if let Some(keyword) = &sql_config.auto_increment_keyword {
                parts.push(keyword.clone());
            }
        }

        if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
            if self.supports_comments() {
                parts.push(format!("COMMENT '{}'", escape_literal(comment)));
            } else {
                warn!(
                    "{} does not store column comments, dropping comment of {}",
                    self.dialect.name(),
                    column.name
                );
            }
        }

        Ok(parts.join(" "))
    }

    fn index_definition(&self, table: &str, index: &Index) -> Result<String> {
        if index.index_type != IndexType::PrimaryKey {
            return Err(CatalogError::UnsupportedIndex(format!(
                "{} doesn't support index: {}",
                self.dialect.name(),
                index.index_type.as_str()
            )));
        }

        let mut fields = Vec::with_capacity(index.field_names.len());
        for path in &index.field_names {
            match path.as_slice() {
                [field] => {
                    validate_identifier("Index field", field)?;
                    fields.push(field.as_str());
                }
                _ => {
                    return Err(CatalogError::UnsupportedOperation(
                        "Index does not support complex fields in this catalog".to_string(),
                    ));
                }
            }
        }

        let fields = fields.join(", ");
        if self.dialect.capability().sql.named_primary_key {
            let name = if index.name.is_empty() {
                default_primary_key_name(table)
            } else {
                validate_identifier("Index", &index.name)?;
                index.name.clone()
            };
            Ok(format!(" CONSTRAINT {} PRIMARY KEY ({})", name, fields))
        } else {
            Ok(format!("PRIMARY KEY ({})", fields))
        }
    }

    fn column_from_row(&self, row: &Row) -> Option<Column> {
        let name = row.get("COLUMN_NAME")?;
        let descriptor = DialectTypeDescriptor {
            type_name: row.get("TYPE_NAME").unwrap_or_default().to_string(),
            column_size: row.get_u32("COLUMN_SIZE"),
            scale: row.get_u32("DECIMAL_DIGITS"),
        };
        let nullable = row.get_flag("NULLABLE");
        let default_value =
            self.dialect
                .default_from_sql(&descriptor, row.get("COLUMN_DEF"), false, nullable);

        Some(Column {
            name: name.to_string(),
            data_type: self.dialect.to_portable_type(&descriptor),
            nullable,
            default_value,
            comment: row
                .get("REMARKS")
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            auto_increment: row.get_flag("IS_AUTOINCREMENT"),
        })
    }

    fn table_name(&self, schema: &str, table: &str) -> String {
        if self.dialect.capability().sql.qualify_table_name {
            format!("{}.{}", schema, table)
        } else {
            table.to_string()
        }
    }

    /// Schema to bind the session to when table names are not qualified.
    fn session_schema<'s>(&self, schema: &'s str) -> Option<&'s str> {
        (!self.dialect.capability().sql.qualify_table_name).then_some(schema)
    }

    fn supports_comments(&self) -> bool {
        self.dialect.capability().features.supports_comments
    }
}

/// Every auto-increment column must be non-nullable and covered by a
/// single-column primary key, and there may be at most one.
pub fn validate_increment_columns(columns: &[Column], indexes: &[Index]) -> Result<()> {
    let auto_columns: Vec<&Column> = columns.iter().filter(|c| c.auto_increment).collect();

    match auto_columns.as_slice() {
        [] => Ok(()),
        [column] if column.nullable => Err(CatalogError::InvalidSchema(format!(
            "Incorrect table definition; auto-increment column {} must be NOT NULL",
            column.name
        ))),
        [column] => {
            let column = column.name.as_str();
            let covered = indexes.iter().any(|index| {
                index.index_type == IndexType::PrimaryKey
                    && matches!(index.field_names.as_slice(), [path] if path.len() == 1 && path[0] == *column)
            });
            if covered {
                Ok(())
            } else {
                Err(CatalogError::InvalidSchema(format!(
                    "Incorrect table definition; auto-increment column {} must be the single-column primary key",
                    column
                )))
            }
        }
        many => Err(CatalogError::InvalidSchema(format!(
            "Only one column can be auto-incremented. There are multiple auto-increment columns in your table: [{}]",
            many.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(",")
        ))),
    }
}

fn default_primary_key_name(table: &str) -> String {
    format!("{}_pk", table)
}

fn primary_key_from_rows(table: &str, mut rows: Vec<Row>) -> Option<Index> {
    rows.sort_by_key(|row| row.get_u32("KEY_SEQ").unwrap_or(u32::MAX));
    let fields: Vec<&str> = rows.iter().filter_map(|row| row.get("COLUMN_NAME")).collect();
    if fields.is_empty() {
        return None;
    }

    let name = rows
        .iter()
        .find_map(|row| row.get("PK_NAME"))
        .map(str::to_string)
        .unwrap_or_else(|| default_primary_key_name(table));
    Some(Index::primary(name, &fields))
}
