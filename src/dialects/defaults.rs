//! Default-value codec pieces shared by the dialects.

use crate::dialects::base::DialectCapability;
use crate::error::CatalogError;
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, LiteralValue, PortableType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Render a portable default as DEFAULT clause text.
pub fn render(
    capability: &DialectCapability,
    value: &DefaultValueExpression,
) -> Result<Option<String>, CatalogError> {
    let rendered = match value {
        DefaultValueExpression::NotSet => return Ok(None),
        DefaultValueExpression::NullLiteral => capability.sql.null_keyword.clone(),
        DefaultValueExpression::CurrentTimestamp => capability.sql.current_timestamp.clone(),
        DefaultValueExpression::Function { raw } => format!("({})", raw),
        DefaultValueExpression::Unparsed { raw } => quote(raw),
        DefaultValueExpression::Literal { data_type, value } => {
            render_literal(capability, data_type, value)?
        }
    };
    Ok(Some(rendered))
}

fn render_literal(
    capability: &DialectCapability,
    data_type: &PortableType,
    value: &LiteralValue,
) -> Result<String, CatalogError> {
    let text = match value {
        LiteralValue::Int(v) => v.to_string(),
        LiteralValue::UInt(v) => v.to_string(),
        LiteralValue::Float(v) => v.to_string(),
        LiteralValue::Double(v) => v.to_string(),
        LiteralValue::Decimal(v) => v.to_string(),
        LiteralValue::Boolean(v) => v.to_string(),
        LiteralValue::String(v) => v.clone(),
        LiteralValue::Binary(v) => String::from_utf8_lossy(v).into_owned(),
        LiteralValue::Date(v) => v.format(&capability.formats.date).to_string(),
        LiteralValue::Time(v) => v.format(&capability.formats.time).to_string(),
        LiteralValue::Timestamp(v) => v.format(&capability.formats.timestamp).to_string(),
    };

    let numeric_value = matches!(
        value,
        LiteralValue::Int(_)
            | LiteralValue::UInt(_)
            | LiteralValue::Float(_)
            | LiteralValue::Double(_)
            | LiteralValue::Decimal(_)
    );

    if data_type.is_numeric() {
        if !numeric_value {
            return Err(CatalogError::UnsupportedDefaultValue(format!(
                "{} literal for {} column",
                text, data_type
            )));
        }
        return Ok(text);
    }

    Ok(quote(&text))
}

/// Single-quoted literal with `''` escapes; the inverse of `strip_quotes`.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Outcome of the empty/NULL checks that precede typed parsing.
pub fn resolve_absent(raw: Option<&str>, nullable: bool, null_keyword: &str) -> Option<DefaultValueExpression> {
    match raw {
        None | Some("") => Some(if nullable {
            DefaultValueExpression::NullLiteral
        } else {
            DefaultValueExpression::NotSet
        }),
        Some(text) if nullable && text == null_keyword => Some(DefaultValueExpression::NullLiteral),
        Some(_) => None,
    }
}

/// Remove one pair of surrounding single quotes, undoing `''` escapes.
pub fn strip_quotes(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].replace("''", "'")
    } else {
        raw.to_string()
    }
}

pub fn signed<T>(text: &str, data_type: PortableType) -> Option<DefaultValueExpression>
where
    T: FromStr + Into<i64>,
{
    let value: T = text.trim().parse().ok()?;
    Some(DefaultValueExpression::literal(data_type, LiteralValue::Int(value.into())))
}

pub fn unsigned<T>(text: &str, data_type: PortableType) -> Option<DefaultValueExpression>
where
    T: FromStr + Into<u64>,
{
    let value: T = text.trim().parse().ok()?;
    Some(DefaultValueExpression::literal(data_type, LiteralValue::UInt(value.into())))
}

pub fn float(text: &str, data_type: PortableType) -> Option<DefaultValueExpression> {
    let value: f32 = text.trim().parse().ok()?;
    Some(DefaultValueExpression::literal(data_type, LiteralValue::Float(value)))
}

pub fn double(text: &str, data_type: PortableType) -> Option<DefaultValueExpression> {
    let value: f64 = text.trim().parse().ok()?;
    Some(DefaultValueExpression::literal(data_type, LiteralValue::Double(value)))
}

/// Some backends report a zero default with a truncated fraction (`0.`).
pub fn normalize_decimal(text: &str) -> &str {
    if text == "0." { "0.0" } else { text }
}

/// Parse a decimal literal and fit it to the column's precision and scale.
/// Values wider than the precision come back as `None`.
pub fn decimal(text: &str, descriptor: &DialectTypeDescriptor) -> Option<DefaultValueExpression> {
    let precision = descriptor.column_size?;
    let scale = descriptor.scale.unwrap_or(0);

    let mut value = Decimal::from_str(normalize_decimal(text.trim())).ok()?;
    // Rounds half away from zero when the text carries more fraction digits.
    value.rescale(scale);
    if value.mantissa().unsigned_abs().to_string().len() > precision as usize {
        return None;
    }

    Some(DefaultValueExpression::literal(
        PortableType::Decimal { precision, scale },
        LiteralValue::Decimal(value),
    ))
}

pub fn string(text: &str, data_type: PortableType) -> Option<DefaultValueExpression> {
    Some(DefaultValueExpression::literal(data_type, LiteralValue::String(text.to_string())))
}

pub fn binary(text: &str) -> Option<DefaultValueExpression> {
    Some(DefaultValueExpression::literal(
        PortableType::Binary,
        LiteralValue::Binary(text.as_bytes().to_vec()),
    ))
}

pub fn date(text: &str, capability: &DialectCapability) -> Option<DefaultValueExpression> {
    let value = NaiveDate::parse_from_str(text, &capability.formats.date).ok()?;
    Some(DefaultValueExpression::literal(PortableType::Date, LiteralValue::Date(value)))
}

pub fn time(text: &str, capability: &DialectCapability) -> Option<DefaultValueExpression> {
    let value = NaiveTime::parse_from_str(text, &capability.formats.time).ok()?;
    Some(DefaultValueExpression::literal(PortableType::Time, LiteralValue::Time(value)))
}

/// Timestamp literal, or the current-timestamp sentinel for the dialect's keyword.
pub fn timestamp(
    text: &str,
    has_time_zone: bool,
    capability: &DialectCapability,
) -> Option<DefaultValueExpression> {
    if text.eq_ignore_ascii_case(&capability.sql.current_timestamp) {
        return Some(DefaultValueExpression::CurrentTimestamp);
    }
    let value = NaiveDateTime::parse_from_str(text, &capability.formats.timestamp).ok()?;
    Some(DefaultValueExpression::literal(
        PortableType::Timestamp { has_time_zone },
        LiteralValue::Timestamp(value),
    ))
}
