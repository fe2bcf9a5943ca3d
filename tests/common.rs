use catalog_bridge::executor::{MockConnectionSource, Row};
use catalog_bridge::{Column, DatabaseDialect, PortableType, get_dialect};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Built-in dialect by name; panics on typos in the test itself.
pub fn dialect(name: &str) -> Arc<dyn DatabaseDialect> {
    get_dialect(name).unwrap_or_else(|| panic!("dialect {} not registered", name))
}

pub fn mock() -> MockConnectionSource {
    MockConnectionSource::new()
}

/// Row shaped like the column introspection queries return.
pub fn column_row(
    name: &str,
    type_name: &str,
    size: Option<&str>,
    scale: Option<&str>,
    nullable: bool,
    default: Option<&str>,
) -> Row {
    Row::new()
        .with("COLUMN_NAME", Some(name))
        .with("TYPE_NAME", Some(type_name))
        .with("COLUMN_SIZE", size)
        .with("DECIMAL_DIGITS", scale)
        .with("NULLABLE", Some(if nullable { "1" } else { "0" }))
        .with("COLUMN_DEF", default)
}

pub fn table_row(name: &str, kind: &str) -> Row {
    Row::new()
        .with("TABLE_NAME", Some(name))
        .with("TABLE_TYPE", Some(kind))
}

pub fn key_row(column: &str, pk_name: Option<&str>, seq: &str) -> Row {
    Row::new()
        .with("COLUMN_NAME", Some(column))
        .with("PK_NAME", pk_name)
        .with("KEY_SEQ", Some(seq))
}

pub fn schema_row(name: &str) -> Row {
    Row::new().with("TABLE_SCHEM", Some(name))
}

pub fn id_column() -> Column {
    Column::new("id", PortableType::long()).not_null()
}

pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
