use super::{defaults, types};
use crate::dialects::base::{DatabaseDialect, DialectCapability};
use crate::error::CatalogError;
use crate::model::{DefaultValueExpression, DialectTypeDescriptor, PortableType};
use std::sync::OnceLock;

static CAPABILITY: OnceLock<DialectCapability> = OnceLock::new();

pub struct PhoenixDialect {
    capability: &'static DialectCapability,
}

impl PhoenixDialect {
    pub fn new() -> Self {
        let capability = CAPABILITY.get_or_init(|| {
            let config_str = include_str!("dialect.toml");
            toml::from_str(config_str).expect("Failed to parse Phoenix dialect config")
        });

        Self { capability }
    }
}

impl Default for PhoenixDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDialect for PhoenixDialect {
    fn capability(&self) -> &DialectCapability {
        self.capability
    }

    fn to_portable_type(&self, descriptor: &DialectTypeDescriptor) -> PortableType {
        types::to_portable(descriptor)
    }

    fn from_portable_type(&self, data_type: &PortableType) -> Result<String, CatalogError> {
        types::from_portable(data_type)
    }

    fn default_from_sql(
        &self,
        descriptor: &DialectTypeDescriptor,
        raw: Option<&str>,
        _is_expression: bool,
        nullable: bool,
    ) -> DefaultValueExpression {
        defaults::from_sql(self.capability, descriptor, raw, nullable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LiteralValue;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dialect() -> PhoenixDialect {
        PhoenixDialect::new()
    }

    #[test]
    fn test_capability_loads() {
        let d = dialect();
        assert_eq!(d.name(), "phoenix");
        assert!(!d.capability().features.supports_comments);
        assert!(d.capability().sql.named_primary_key);
        assert!(d.capability().sql.qualify_table_name);
        assert!(d.capability().sql.auto_increment_keyword.is_none());
        assert!(d.capability().introspection.table_comment.is_none());
        assert_eq!(d.schema_binding_sql("sales"), None);
    }

    #[test]
    fn test_type_round_trip() {
        let d = dialect();
        for data_type in [
            PortableType::byte(),
            PortableType::Byte { signed: false },
            PortableType::short(),
            PortableType::Short { signed: false },
            PortableType::integer(),
            PortableType::Integer { signed: false },
            PortableType::long(),
            PortableType::Long { signed: false },
            PortableType::float(),
            PortableType::Float { signed: false },
            PortableType::double(),
            PortableType::Double { signed: false },
            PortableType::decimal(10, 2),
            PortableType::FixedChar { length: 8 },
            PortableType::StringUnbounded,
            PortableType::Binary,
            PortableType::Boolean,
            PortableType::Date,
            PortableType::Time,
            PortableType::Timestamp { has_time_zone: true },
            PortableType::Timestamp { has_time_zone: false },
            PortableType::external("ARRAY"),
        ] {
            let rendered = d.from_portable_type(&data_type).unwrap();
            let parsed = d.to_portable_type(&DialectTypeDescriptor::parse(&rendered));
            assert_eq!(parsed, data_type, "rendered as {}", rendered);
        }
    }

    #[test]
    fn test_varchar_collapses_to_unbounded_string() {
        let d = dialect();
        let rendered = d.from_portable_type(&PortableType::VarChar { length: 32 }).unwrap();
        assert_eq!(
            d.to_portable_type(&DialectTypeDescriptor::parse(&rendered)),
            PortableType::StringUnbounded
        );
    }

    #[test]
    fn test_default_literal_round_trip() {
        let d = dialect();
        let descriptor = DialectTypeDescriptor::new(types::INTEGER);
        let rendered = d.default_to_sql(&DefaultValueExpression::integer(5)).unwrap();
        assert_eq!(
            d.default_from_sql(&descriptor, rendered.as_deref(), false, false),
            DefaultValueExpression::integer(5)
        );
    }

    #[test]
    fn test_unsigned_defaults() {
        let d = dialect();
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::UNSIGNED_INT), Some("4000000000"), false, false),
            DefaultValueExpression::literal(PortableType::Integer { signed: false }, LiteralValue::UInt(4_000_000_000))
        );
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::UNSIGNED_TINYINT), Some("-1"), false, false),
            DefaultValueExpression::unparsed("-1")
        );
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::UNSIGNED_LONG), Some("18446744073709551615"), false, false),
            DefaultValueExpression::literal(PortableType::Long { signed: false }, LiteralValue::UInt(u64::MAX))
        );
    }

    #[test]
    fn test_empty_defaults() {
        let d = dialect();
        let descriptor = DialectTypeDescriptor::new(types::VARCHAR);
        assert_eq!(
            d.default_from_sql(&descriptor, None, false, true),
            DefaultValueExpression::NullLiteral
        );
        assert_eq!(
            d.default_from_sql(&descriptor, Some(""), false, false),
            DefaultValueExpression::NotSet
        );
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::DATE), Some("''"), false, false),
            DefaultValueExpression::NullLiteral
        );
    }

    #[test]
    fn test_decimal_and_timestamp_defaults() {
        let d = dialect();
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::sized(types::DECIMAL, 10, Some(2)), Some("0."), false, false),
            DefaultValueExpression::literal(
                PortableType::decimal(10, 2),
                LiteralValue::Decimal(Decimal::from_str("0.0").unwrap())
            )
        );
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::UNSIGNED_TIMESTAMP), Some("CURRENT_TIMESTAMP"), false, false),
            DefaultValueExpression::CurrentTimestamp
        );
        assert_eq!(
            d.default_from_sql(&DialectTypeDescriptor::new(types::INTEGER), Some("not-a-number"), false, false),
            DefaultValueExpression::unparsed("not-a-number")
        );
    }

    #[test]
    fn test_exception_conversion() {
        let d = dialect();
        assert!(matches!(d.to_catalog_error(722, "m"), CatalogError::SchemaNotFound(_)));
        assert!(matches!(d.to_catalog_error(721, "m"), CatalogError::SchemaAlreadyExists(_)));
        assert!(matches!(d.to_catalog_error(1012, "m"), CatalogError::TableNotFound(_)));
        assert!(matches!(d.to_catalog_error(1145, "m"), CatalogError::TableNotFound(_)));
        assert!(matches!(d.to_catalog_error(1013, "m"), CatalogError::TableAlreadyExists(_)));
        // GBase codes carry no meaning here.
        assert!(matches!(d.to_catalog_error(1049, "m"), CatalogError::Backend { code: 1049, .. }));
    }

    #[test]
    fn test_system_schemas() {
        let d = dialect();
        assert!(d.is_system_schema("SYSTEM"));
        assert!(d.is_system_schema("default"));
        assert!(d.is_system_schema("hbase"));
        assert!(!d.is_system_schema("system"));
    }
}
