use crate::error::CatalogError;
use crate::model::{DialectTypeDescriptor, PortableType};

pub const TINYINT: &str = "TINYINT";
pub const SMALLINT: &str = "SMALLINT";
pub const INT: &str = "INT";
pub const BIGINT: &str = "BIGINT";
pub const FLOAT: &str = "FLOAT";
pub const DOUBLE: &str = "DOUBLE";
pub const DECIMAL: &str = "DECIMAL";
pub const NUMERIC: &str = "NUMERIC";

pub const CHAR: &str = "CHAR";
pub const VARCHAR: &str = "VARCHAR";
pub const TEXT: &str = "TEXT";

pub const BLOB: &str = "BLOB";
pub const LONGBLOB: &str = "LONGBLOB";

pub const DATE: &str = "DATE";
pub const DATETIME: &str = "DATETIME";
pub const TIME: &str = "TIME";
pub const TIMESTAMP: &str = "TIMESTAMP";

pub fn to_portable(descriptor: &DialectTypeDescriptor) -> PortableType {
    let size = descriptor.column_size;
    match (descriptor.type_name.as_str(), size) {
        (TINYINT, _) => PortableType::byte(),
        (SMALLINT, _) => PortableType::short(),
        (INT, _) => PortableType::integer(),
        (BIGINT, _) => PortableType::long(),
        (FLOAT, _) => PortableType::float(),
        (DOUBLE, _) => PortableType::double(),
        (DECIMAL | NUMERIC, Some(precision)) => PortableType::Decimal {
            precision,
            scale: descriptor.scale.unwrap_or(0),
        },
        (CHAR, Some(length)) => PortableType::FixedChar { length },
        (VARCHAR, Some(length)) => PortableType::VarChar { length },
        (TEXT, _) => PortableType::StringUnbounded,
        (DATE, _) => PortableType::Date,
        (TIMESTAMP, _) => PortableType::Timestamp { has_time_zone: true },
        (TIME, _) => PortableType::Time,
        (DATETIME, _) => PortableType::Timestamp { has_time_zone: false },
        (BLOB | LONGBLOB, _) => PortableType::Binary,
        // Sized names reported without a size cannot be represented exactly.
        (name, _) => PortableType::external(name),
    }
}

pub fn from_portable(data_type: &PortableType) -> Result<String, CatalogError> {
    let name = match data_type {
        PortableType::Byte { signed: true } => TINYINT.to_string(),
        PortableType::Short { signed: true } => SMALLINT.to_string(),
        PortableType::Integer { signed: true } => INT.to_string(),
        PortableType::Long { signed: true } => BIGINT.to_string(),
        PortableType::Float { signed: true } => FLOAT.to_string(),
        PortableType::Double { signed: true } => DOUBLE.to_string(),
        PortableType::Decimal { precision, scale } => format!("{}({},{})", DECIMAL, precision, scale),
        PortableType::FixedChar { length } => format!("{}({})", CHAR, length),
        PortableType::VarChar { length } => format!("{}({})", VARCHAR, length),
        PortableType::StringUnbounded => TEXT.to_string(),
        PortableType::Binary => LONGBLOB.to_string(),
        PortableType::Date => DATE.to_string(),
        PortableType::Time => TIME.to_string(),
        PortableType::Timestamp { has_time_zone: true } => TIMESTAMP.to_string(),
        PortableType::Timestamp { has_time_zone: false } => DATETIME.to_string(),
        PortableType::External { raw_name } => raw_name.clone(),
        PortableType::Byte { signed: false }
        | PortableType::Short { signed: false }
        | PortableType::Integer { signed: false }
        | PortableType::Long { signed: false }
        | PortableType::Float { signed: false }
        | PortableType::Double { signed: false }
        | PortableType::Boolean => {
            return Err(CatalogError::UnsupportedType(format!(
                "Couldn't convert type {} to GBase type",
                data_type.simple_string()
            )));
        }
    };
    Ok(name)
}
