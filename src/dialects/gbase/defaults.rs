use super::types::*;
use crate::dialects::base::DialectCapability;
use crate::dialects::defaults::{self, strip_quotes};
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, PortableType};

/// GBase reports no expression defaults, so `is_expression` is not consulted.
pub fn from_sql(
    capability: &DialectCapability,
    descriptor: &DialectTypeDescriptor,
    raw: Option<&str>,
    nullable: bool,
) -> DefaultValueExpression {
    if let Some(resolved) = defaults::resolve_absent(raw, nullable, &capability.sql.null_keyword) {
        return resolved;
    }

    let value = strip_quotes(raw.unwrap_or_default());
    let text = value.as_str();

    let parsed = match descriptor.type_name.as_str() {
        TINYINT => defaults::signed::<i8>(text, PortableType::byte()),
        SMALLINT => defaults::signed::<i16>(text, PortableType::short()),
        INT => defaults::signed::<i32>(text, PortableType::integer()),
        BIGINT => defaults::signed::<i64>(text, PortableType::long()),
        FLOAT => defaults::float(text, PortableType::float()),
        DOUBLE => defaults::double(text, PortableType::double()),
        DECIMAL | NUMERIC => defaults::decimal(text, descriptor),
        CHAR => descriptor
            .column_size
            .and_then(|length| defaults::string(text, PortableType::FixedChar { length })),
        VARCHAR | TEXT => defaults::string(text, PortableType::StringUnbounded),
        BLOB | LONGBLOB => defaults::binary(text),
        DATE => defaults::date(text, capability),
        TIME => defaults::time(text, capability),
        TIMESTAMP => defaults::timestamp(text, true, capability),
        DATETIME => defaults::timestamp(text, false, capability),
        _ => None,
    };

    parsed.unwrap_or(DefaultValueExpression::Unparsed { raw: value })
}
