use super::types::*;
use crate::dialects::base::DialectCapability;
use crate::dialects::defaults::{self, strip_quotes};
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, PortableType};

/// Phoenix has no expression defaults, so `is_expression` is not consulted.
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
        UNSIGNED_TINYINT => defaults::unsigned::<u8>(text, PortableType::Byte { signed: false }),
        SMALLINT => defaults::signed::<i16>(text, PortableType::short()),
        UNSIGNED_SMALLINT => defaults::unsigned::<u16>(text, PortableType::Short { signed: false }),
        INTEGER => defaults::signed::<i32>(text, PortableType::integer()),
        UNSIGNED_INT => defaults::unsigned::<u32>(text, PortableType::Integer { signed: false }),
        BIGINT => defaults::signed::<i64>(text, PortableType::long()),
        UNSIGNED_LONG => defaults::unsigned::<u64>(text, PortableType::Long { signed: false }),
        FLOAT => defaults::float(text, PortableType::float()),
        UNSIGNED_FLOAT => defaults::float(text, PortableType::Float { signed: false }),
        DOUBLE => defaults::double(text, PortableType::double()),
        UNSIGNED_DOUBLE => defaults::double(text, PortableType::Double { signed: false }),
        DECIMAL => defaults::decimal(text, descriptor),
        // A quoted empty date is how Phoenix reports a NULL date default.
        DATE | UNSIGNED_DATE if text.is_empty() => Some(DefaultValueExpression::NullLiteral),
        DATE | UNSIGNED_DATE => defaults::date(text, capability),
        TIME | UNSIGNED_TIME => defaults::time(text, capability),
        TIMESTAMP => defaults::timestamp(text, true, capability),
        UNSIGNED_TIMESTAMP => defaults::timestamp(text, false, capability),
        CHAR => descriptor
            .column_size
            .and_then(|length| defaults::string(text, PortableType::FixedChar { length })),
        VARCHAR => defaults::string(text, PortableType::StringUnbounded),
        BINARY | VARBINARY => defaults::binary(text),
        _ => None,
    };

    parsed.unwrap_or(DefaultValueExpression::Unparsed { raw: value })
}
