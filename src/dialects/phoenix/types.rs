use crate::error::CatalogError;
use crate::model::{DialectTypeDescriptor, PortableType};

pub const INTEGER: &str = "INTEGER";
pub const UNSIGNED_INT: &str = "UNSIGNED_INT";
pub const BIGINT: &str = "BIGINT";
pub const UNSIGNED_LONG: &str = "UNSIGNED_LONG";
pub const TINYINT: &str = "TINYINT";
pub const UNSIGNED_TINYINT: &str = "UNSIGNED_TINYINT";
pub const SMALLINT: &str = "SMALLINT";
pub const UNSIGNED_SMALLINT: &str = "UNSIGNED_SMALLINT";
pub const DECIMAL: &str = "DECIMAL";
pub const FLOAT: &str = "FLOAT";
pub const UNSIGNED_FLOAT: &str = "UNSIGNED_FLOAT";
pub const DOUBLE: &str = "DOUBLE";
pub const UNSIGNED_DOUBLE: &str = "UNSIGNED_DOUBLE";
pub const BOOLEAN: &str = "BOOLEAN";

pub const TIME: &str = "TIME";
pub const DATE: &str = "DATE";
pub const TIMESTAMP: &str = "TIMESTAMP";
pub const UNSIGNED_TIME: &str = "UNSIGNED_TIME";
pub const UNSIGNED_DATE: &str = "UNSIGNED_DATE";
pub const UNSIGNED_TIMESTAMP: &str = "UNSIGNED_TIMESTAMP";

pub const CHAR: &str = "CHAR";
pub const VARCHAR: &str = "VARCHAR";
pub const BINARY: &str = "BINARY";
pub const VARBINARY: &str = "VARBINARY";
pub const ARRAY: &str = "ARRAY";

pub fn to_portable(descriptor: &DialectTypeDescriptor) -> PortableType {
    match (descriptor.type_name.as_str(), descriptor.column_size) {
        (INTEGER, _) => PortableType::integer(),
        (UNSIGNED_INT, _) => PortableType::Integer { signed: false },
        (BIGINT, _) => PortableType::long(),
        (UNSIGNED_LONG, _) => PortableType::Long { signed: false },
        (TINYINT, _) => PortableType::byte(),
        (UNSIGNED_TINYINT, _) => PortableType::Byte { signed: false },
        (SMALLINT, _) => PortableType::short(),
        (UNSIGNED_SMALLINT, _) => PortableType::Short { signed: false },
        (DECIMAL, Some(precision)) => PortableType::Decimal {
            precision,
            scale: descriptor.scale.unwrap_or(0),
        },
        (FLOAT, _) => PortableType::float(),
        (UNSIGNED_FLOAT, _) => PortableType::Float { signed: false },
        (DOUBLE, _) => PortableType::double(),
        (UNSIGNED_DOUBLE, _) => PortableType::Double { signed: false },
        (BOOLEAN, _) => PortableType::Boolean,
        (TIME | UNSIGNED_TIME, _) => PortableType::Time,
        (DATE | UNSIGNED_DATE, _) => PortableType::Date,
        (TIMESTAMP, _) => PortableType::Timestamp { has_time_zone: true },
        (UNSIGNED_TIMESTAMP, _) => PortableType::Timestamp { has_time_zone: false },
        (CHAR, Some(length)) => PortableType::FixedChar { length },
        // Phoenix VARCHAR carries no mandatory length.
        (VARCHAR, _) => PortableType::StringUnbounded,
        (BINARY | VARBINARY, _) => PortableType::Binary,
        (ARRAY, _) => PortableType::external(ARRAY),
        (name, _) => PortableType::external(name),
    }
}

pub fn from_portable(data_type: &PortableType) -> Result<String, CatalogError> {
    let name = match data_type {
        PortableType::Byte { signed } => pick(*signed, TINYINT, UNSIGNED_TINYINT),
        PortableType::Short { signed } => pick(*signed, SMALLINT, UNSIGNED_SMALLINT),
        PortableType::Integer { signed } => pick(*signed, INTEGER, UNSIGNED_INT),
        PortableType::Long { signed } => pick(*signed, BIGINT, UNSIGNED_LONG),
        PortableType::Float { signed } => pick(*signed, FLOAT, UNSIGNED_FLOAT),
        PortableType::Double { signed } => pick(*signed, DOUBLE, UNSIGNED_DOUBLE),
        PortableType::StringUnbounded | PortableType::VarChar { .. } => VARCHAR.to_string(),
        PortableType::Date => DATE.to_string(),
        PortableType::Time => TIME.to_string(),
        PortableType::Timestamp { has_time_zone } => pick(*has_time_zone, TIMESTAMP, UNSIGNED_TIMESTAMP),
        PortableType::Decimal { precision, scale } => format!("{}({},{})", DECIMAL, precision, scale),
        PortableType::FixedChar { length } => format!("{}({})", CHAR, length),
        PortableType::Boolean => BOOLEAN.to_string(),
        PortableType::Binary => BINARY.to_string(),
        PortableType::External { raw_name } => raw_name.clone(),
    };
    Ok(name)
}

fn pick(primary: bool, when_true: &str, when_false: &str) -> String {
    let name = if primary { when_true } else { when_false };
    name.to_string()
}
