//! Schema and table operations, driven by a dialect and a connection source.

pub mod database;
pub mod table;

pub use database::DatabaseOperations;
pub use table::TableOperations;

use crate::dialects::DatabaseDialect;
use crate::error::{CatalogError, Result};
use crate::executor::{Connection, ConnectionSource};
use log::debug;

/// Characters that never appear in an identifier we emit unquoted.
const FORBIDDEN_IDENTIFIER_CHARS: &[char] = &[';', '\'', '"', '`', '(', ')', ','];

/// Basic identifier check applied before any name is placed into SQL.
pub(crate) fn validate_identifier(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CatalogError::InvalidSchema(format!("{} name must not be empty", kind)));
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_IDENTIFIER_CHARS.contains(&c))
    {
        return Err(CatalogError::InvalidSchema(format!(
            "Invalid {} name '{}'",
            kind, name
        )));
    }
    Ok(())
}

/// Fill `{schema}` and `{table}` placeholders of an introspection query with
/// escaped string literal contents.
pub(crate) fn render_query(template: &str, schema: &str, table: Option<&str>) -> String {
    let mut sql = template.replace("{schema}", &escape_literal(schema));
    if let Some(table) = table {
        sql = sql.replace("{table}", &escape_literal(table));
    }
    sql
}

pub(crate) fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

pub(crate) fn open<'s>(
    dialect: &dyn DatabaseDialect,
    connections: &'s dyn ConnectionSource,
    schema: Option<&str>,
) -> Result<Box<dyn Connection + 's>> {
    connections
        .open(schema)
        .map_err(|e| dialect.translate_error(e))
}

/// Plain tables in `schema`, in backend order without duplicates.
pub(crate) fn fetch_table_names(
    dialect: &dyn DatabaseDialect,
    connection: &mut dyn Connection,
    schema: &str,
) -> Result<Vec<String>> {
    let introspection = &dialect.capability().introspection;
    let sql = render_query(&introspection.list_tables, schema, None);
    let rows = connection
        .execute_query(&sql)
        .map_err(|e| dialect.translate_error(e))?;

    let mut names: Vec<String> = Vec::new();
    for row in &rows {
        let is_table = row
            .get("TABLE_TYPE")
            .is_none_or(|kind| introspection.table_relation_kinds.iter().any(|k| k == kind));
        if !is_table {
            continue;
        }
        if let Some(name) = row.get("TABLE_NAME") {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    debug!("Found {} tables in schema {}", names.len(), schema);
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("Table", "orders_2024").is_ok());
        assert!(validate_identifier("Table", "SALES.ORDERS").is_ok());
        for bad in ["", "a b", "x;drop", "o'hara", "we`ird", "f(x)"] {
            assert!(
                matches!(validate_identifier("Table", bad), Err(CatalogError::InvalidSchema(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_render_query_escapes_values() {
        let sql = render_query(
            "SELECT * FROM t WHERE s = '{schema}' AND n = '{table}'",
            "it's",
            Some("tbl"),
        );
        assert_eq!(sql, "SELECT * FROM t WHERE s = 'it''s' AND n = 'tbl'");
        assert_eq!(render_query("'{schema}' {table}", "s", None), "'s' {table}");
    }
}
