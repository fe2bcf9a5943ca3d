mod common;

use catalog_bridge::model::{Distribution, DistributionStrategy, IndexType, SortDirection, SortOrder, Transform};
use catalog_bridge::{
    CatalogError, Column, CreateTableRequest, DatabaseOperations, DefaultValueExpression,
    DialectTypeDescriptor, Index, LiteralValue, PortableType, TableOperations,
};
use common::{column_row, dialect, id_column, key_row, mock, schema_row, table_row};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

#[test]
fn test_type_round_trip() {
    let gbase = dialect("gbase");
    for data_type in [
        PortableType::byte(),
        PortableType::integer(),
        PortableType::decimal(18, 4),
        PortableType::VarChar { length: 255 },
        PortableType::StringUnbounded,
        PortableType::Timestamp { has_time_zone: false },
    ] {
        let rendered = gbase.from_portable_type(&data_type).unwrap();
        assert_eq!(
            gbase.to_portable_type(&DialectTypeDescriptor::parse(&rendered)),
            data_type
        );
    }
    assert!(matches!(
        gbase.from_portable_type(&PortableType::Integer { signed: false }),
        Err(CatalogError::UnsupportedType(_))
    ));
}

#[test]
fn test_default_codec_properties() {
    let gbase = dialect("gbase");
    let int = DialectTypeDescriptor::new("INT");

    let rendered = gbase.default_to_sql(&DefaultValueExpression::integer(5)).unwrap();
    assert_eq!(
        gbase.default_from_sql(&int, rendered.as_deref(), false, false),
        DefaultValueExpression::integer(5)
    );
    assert_eq!(
        gbase.default_from_sql(&int, Some(""), false, true),
        DefaultValueExpression::NullLiteral
    );
    assert_eq!(
        gbase.default_from_sql(&int, Some(""), false, false),
        DefaultValueExpression::NotSet
    );
    assert_eq!(
        gbase.default_from_sql(&int, Some("not-a-number"), false, false),
        DefaultValueExpression::unparsed("not-a-number")
    );
    assert_eq!(
        gbase.default_from_sql(&DialectTypeDescriptor::parse("DECIMAL(10,2)"), Some("0."), false, false),
        DefaultValueExpression::literal(
            PortableType::decimal(10, 2),
            LiteralValue::Decimal(Decimal::from_str("0.0").unwrap())
        )
    );
}

#[test]
fn test_list_schemas_never_returns_reserved_names() {
    let gbase = dialect("gbase");
    let source = mock();
    source.respond(
        "SCHEMATA",
        vec![
            schema_row("information_schema"),
            schema_row("performance_schema"),
            schema_row("gbase"),
            schema_row("gclusterdb"),
            schema_row("gctmpdb"),
            schema_row("sales"),
        ],
    );

    let schemas = DatabaseOperations::new(gbase.as_ref(), &source).list_schemas().unwrap();
    assert_eq!(schemas, vec!["sales"]);
    assert!(schemas.iter().all(|s| !gbase.is_system_schema(s)));
}

#[test]
fn test_create_with_partitioning_makes_no_connection() {
    let gbase = dialect("gbase");
    let source = mock();
    let mut request = CreateTableRequest::new("events", vec![id_column()]);
    request.partitioning = vec![Transform {
        name: "day".to_string(),
        field_names: vec!["id".to_string()],
    }];

    let err = TableOperations::new(gbase.as_ref(), &source)
        .create("sales", &request)
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedOperation(_)));
    assert!(err.is_synthesis_error());
    assert_eq!(source.open_count(), 0);
    assert!(source.executed().is_empty());
}

#[test]
fn test_create_with_distribution_or_sort_orders_fails() {
    let gbase = dialect("gbase");
    let source = mock();
    let ops = TableOperations::new(gbase.as_ref(), &source);

    let mut request = CreateTableRequest::new("events", vec![id_column()]);
    request.distribution = Distribution {
        strategy: DistributionStrategy::Even,
        number: 0,
        field_names: Vec::new(),
    };
    assert!(matches!(ops.create("sales", &request), Err(CatalogError::UnsupportedOperation(_))));

    let mut request = CreateTableRequest::new("events", vec![id_column()]);
    request.sort_orders = vec![SortOrder {
        field_name: "id".to_string(),
        direction: SortDirection::Descending,
    }];
    assert!(matches!(ops.create("sales", &request), Err(CatalogError::UnsupportedOperation(_))));
    assert_eq!(source.open_count(), 0);
}

#[test]
fn test_uncovered_auto_increment_emits_no_ddl() {
    let gbase = dialect("gbase");
    let source = mock();
    let request = CreateTableRequest::new(
        "events",
        vec![id_column().auto_increment(), Column::new("name", PortableType::StringUnbounded)],
    )
    .with_indexes(vec![Index::primary("pk", &["name"])]);

    assert!(matches!(
        TableOperations::new(gbase.as_ref(), &source).create("sales", &request),
        Err(CatalogError::InvalidSchema(_))
    ));
    assert!(source.executed().is_empty());
}

#[test]
fn test_create_table_executes_in_bound_schema() {
    let gbase = dialect("gbase");
    let source = mock();
    let request = CreateTableRequest::new(
        "events",
        vec![
            id_column().auto_increment(),
            Column::new("created", PortableType::Timestamp { has_time_zone: true })
                .not_null()
                .with_default(DefaultValueExpression::CurrentTimestamp),
        ],
    )
    .with_indexes(vec![Index::primary("pk_events", &["id"])]);

    TableOperations::new(gbase.as_ref(), &source).create("sales", &request).unwrap();

    assert_eq!(source.opened_schemas(), vec![Some("sales".to_string())]);
    assert_eq!(
        source.executed(),
        vec![
            "CREATE TABLE events (\n  id BIGINT NOT NULL AUTO_INCREMENT,\n  created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\nPRIMARY KEY (id)\n);"
        ]
    );
    assert_eq!(source.close_count(), 1);
}

#[test]
fn test_create_table_translates_duplicate() {
    let gbase = dialect("gbase");
    let source = mock();
    source.fail("CREATE TABLE", 1050, "Table 'events' already exists");

    let request = CreateTableRequest::new("events", vec![id_column()]);
    assert_eq!(
        TableOperations::new(gbase.as_ref(), &source).create("sales", &request),
        Err(CatalogError::TableAlreadyExists("Table 'events' already exists".to_string()))
    );
    assert_eq!(source.open_count(), source.close_count());
}

fn respond_with_events_table(source: &catalog_bridge::executor::MockConnectionSource) {
    source
        .respond(
            "SELECT TABLE_NAME, TABLE_TYPE",
            vec![table_row("events", "BASE TABLE"), table_row("v_events", "VIEW")],
        )
        .respond(
            "information_schema.COLUMNS",
            vec![
                column_row("id", "BIGINT", Some("19"), Some("0"), false, None)
                    .with("IS_AUTOINCREMENT", Some("YES")),
                column_row("amount", "DECIMAL", Some("10"), Some("2"), true, Some("0."))
                    .with("REMARKS", Some("gross")),
                column_row("status", "VARCHAR", Some("16"), None, false, Some("new")),
                column_row("tags", "SET", None, None, true, Some("a,b")),
                column_row("created", "DATETIME", None, None, false, Some("CURRENT_TIMESTAMP")),
            ],
        )
        .respond("KEY_COLUMN_USAGE", vec![key_row("id", Some("PRIMARY"), "1")])
        .respond("TABLE_COMMENT", vec![catalog_bridge::Row::new().with("REMARKS", Some("event log"))]);
}

#[test]
fn test_load_table() {
    let gbase = dialect("gbase");
    let source = mock();
    respond_with_events_table(&source);

    let table = TableOperations::new(gbase.as_ref(), &source).load("sales", "events").unwrap();

    assert_eq!(table.comment.as_deref(), Some("event log"));
    assert_eq!(table.columns.len(), 5);

    let id = table.column("id").unwrap();
    assert_eq!(id.data_type, PortableType::long());
    assert!(!id.nullable);
    assert!(id.auto_increment);
    assert_eq!(id.default_value, DefaultValueExpression::NotSet);

    let amount = table.column("amount").unwrap();
    assert_eq!(amount.data_type, PortableType::decimal(10, 2));
    assert_eq!(amount.comment.as_deref(), Some("gross"));
    assert_eq!(
        amount.default_value,
        DefaultValueExpression::literal(
            PortableType::decimal(10, 2),
            LiteralValue::Decimal(Decimal::from_str("0.00").unwrap())
        )
    );

    assert_eq!(
        table.column("status").unwrap().default_value,
        DefaultValueExpression::string("new")
    );
    assert_eq!(table.column("tags").unwrap().data_type, PortableType::external("SET"));
    assert_eq!(
        table.column("tags").unwrap().default_value,
        DefaultValueExpression::unparsed("a,b")
    );
    assert_eq!(
        table.column("created").unwrap().default_value,
        DefaultValueExpression::CurrentTimestamp
    );

    assert_eq!(table.indexes.len(), 1);
    assert_eq!(table.indexes[0].index_type, IndexType::PrimaryKey);
    assert_eq!(table.indexes[0].field_names, vec![vec!["id".to_string()]]);
    assert_eq!(source.open_count(), source.close_count());
}

#[test]
fn test_loaded_table_regenerates_ddl() {
    let gbase = dialect("gbase");
    let source = mock();
    respond_with_events_table(&source);
    let ops = TableOperations::new(gbase.as_ref(), &source);

    let table = ops.load("sales", "events").unwrap();
    let mut request = CreateTableRequest::new("events_copy", table.columns.clone())
        .with_indexes(table.indexes.clone());
    request.comment = table.comment.clone();

    let sql = ops.generate_create_table_sql("sales", &request).unwrap();
    assert!(sql.contains("amount DECIMAL(10,2) NULL DEFAULT 0.00 COMMENT 'gross'"));
    assert!(sql.contains("tags SET NULL DEFAULT 'a,b',\n"));
    assert!(sql.contains("created DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP"));
    assert!(sql.ends_with(") COMMENT='event log';"));
}

#[test]
fn test_unparsed_default_with_embedded_quote() {
    let gbase = dialect("gbase");
    let source = mock();
    let default = gbase.default_from_sql(&DialectTypeDescriptor::new("ENUM"), Some("'x'',y'"), false, true);
    assert_eq!(default, DefaultValueExpression::unparsed("x',y"));

    let request = CreateTableRequest::new(
        "kinds",
        vec![
            Column::new("k", PortableType::external("ENUM('x'',y','z')")).with_default(default),
            Column::new("n", PortableType::integer()),
        ],
    );
    let sql = TableOperations::new(gbase.as_ref(), &source)
        .generate_create_table_sql("sales", &request)
        .unwrap();
    assert!(sql.contains("  k ENUM('x'',y','z') NULL DEFAULT 'x'',y',\n  n INT NULL"), "{}", sql);
}

#[test]
fn test_load_missing_table() {
    let gbase = dialect("gbase");
    let source = mock();
    source.respond("SELECT TABLE_NAME, TABLE_TYPE", vec![table_row("v_events", "VIEW")]);

    assert_eq!(
        TableOperations::new(gbase.as_ref(), &source).load("sales", "v_events"),
        Err(CatalogError::TableNotFound("sales.v_events".to_string()))
    );
}

#[test]
fn test_list_tables_filters_views() {
    let gbase = dialect("gbase");
    let source = mock();
    source.respond(
        "SELECT TABLE_NAME, TABLE_TYPE",
        vec![
            table_row("events", "BASE TABLE"),
            table_row("v_events", "VIEW"),
            table_row("users", "BASE TABLE"),
        ],
    );
    let ops = TableOperations::new(gbase.as_ref(), &source);

    assert_eq!(ops.list_tables("sales").unwrap(), vec!["events", "users"]);
    assert!(ops.table_exists("sales", "users").unwrap());
    assert!(!ops.table_exists("sales", "v_events").unwrap());
}

#[test]
fn test_drop_table() {
    let gbase = dialect("gbase");
    let source = mock();
    let ops = TableOperations::new(gbase.as_ref(), &source);

    assert!(ops.drop_table("sales", "events").unwrap());
    assert_eq!(source.executed(), vec!["DROP TABLE events;"]);

    source.fail("DROP TABLE ghost", 1051, "Unknown table 'ghost'");
    assert!(!ops.drop_table("sales", "ghost").unwrap());
}

#[test]
fn test_schema_lifecycle() {
    let gbase = dialect("gbase");
    let source = mock();
    source.respond("SCHEMATA", vec![schema_row("sales")]);
    let ops = DatabaseOperations::new(gbase.as_ref(), &source);

    ops.create_schema("sales", None, &BTreeMap::new()).unwrap();
    assert_eq!(ops.load_schema("sales").unwrap(), "sales");
    assert!(ops.drop_schema("sales", false).unwrap());

    assert_eq!(
        source.executed().first().map(String::as_str),
        Some("CREATE SCHEMA IF NOT EXISTS sales")
    );
    assert_eq!(source.executed().last().map(String::as_str), Some("DROP SCHEMA sales"));
}

#[test]
fn test_unknown_backend_code_is_carried() {
    let gbase = dialect("gbase");
    let source = mock();
    source.fail("SCHEMATA", 2013, "Lost connection to server");

    assert_eq!(
        DatabaseOperations::new(gbase.as_ref(), &source).list_schemas(),
        Err(CatalogError::Backend {
            code: 2013,
            message: "Lost connection to server".to_string()
        })
    );
}
