use crate::model::types::PortableType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Value carried by a typed default literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Binary(Vec<u8>),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

/// Column default value in the portable model.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValueExpression {
    /// No DEFAULT clause is emitted.
    #[default]
    NotSet,
    NullLiteral,
    /// Rendered as the backend's current-timestamp keyword.
    CurrentTimestamp,
    Literal {
        data_type: PortableType,
        value: LiteralValue,
    },
    /// Backend function call text, emitted in parentheses.
    Function { raw: String },
    /// Backend default text that could not be interpreted as a typed literal.
    Unparsed { raw: String },
}

impl DefaultValueExpression {
    pub fn literal(data_type: PortableType, value: LiteralValue) -> Self {
        DefaultValueExpression::Literal { data_type, value }
    }

    pub fn integer(value: i32) -> Self {
        Self::literal(PortableType::integer(), LiteralValue::Int(value.into()))
    }

    pub fn long(value: i64) -> Self {
        Self::literal(PortableType::long(), LiteralValue::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(PortableType::StringUnbounded, LiteralValue::String(value.into()))
    }

    pub fn function(raw: impl Into<String>) -> Self {
        DefaultValueExpression::Function { raw: raw.into() }
    }

    pub fn unparsed(raw: impl Into<String>) -> Self {
        DefaultValueExpression::Unparsed { raw: raw.into() }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, DefaultValueExpression::NotSet)
    }
}
