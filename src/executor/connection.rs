use log::{debug, error, info};
use odbc_api::{
    Connection as OdbcHandle, ConnectionOptions, Cursor, Environment, Error as OdbcError,
    ResultSetMetadata, buffers::TextRowSet,
};

/// Failure reported by the connection collaborator, keeping the backend's
/// native error code for the dialect's exception converter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { code: i32, message: String },

    #[error("Query execution failed: {message}")]
    QueryFailed { code: i32, message: String },
}

impl ConnectionError {
    pub fn query_failed(code: i32, message: impl Into<String>) -> Self {
        ConnectionError::QueryFailed {
            code,
            message: message.into(),
        }
    }

    pub fn connection_failed(code: i32, message: impl Into<String>) -> Self {
        ConnectionError::ConnectionFailed {
            code,
            message: message.into(),
        }
    }

    /// Native backend error code, 0 when the driver reported none.
    pub fn code(&self) -> i32 {
        match self {
            ConnectionError::ConnectionFailed { code, .. } => *code,
            ConnectionError::QueryFailed { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ConnectionError::ConnectionFailed { message, .. } => message,
            ConnectionError::QueryFailed { message, .. } => message,
        }
    }
}

fn native_code(e: &OdbcError) -> i32 {
    match e {
        OdbcError::Diagnostics { record, .. } => record.native_error,
        _ => 0,
    }
}

fn query_failed(e: OdbcError) -> ConnectionError {
    ConnectionError::query_failed(native_code(&e), e.to_string())
}

/// One row of a result set, addressed by column label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by collaborators and tests to assemble rows.
    pub fn with(mut self, column: &str, value: Option<&str>) -> Self {
        self.push(column.to_string(), value.map(str::to_string));
        self
    }

    pub fn push(&mut self, column: String, value: Option<String>) {
        self.values.push((column, value));
    }

    /// Value of a column by case-insensitive label; `None` for SQL NULL or
    /// a missing column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn get_u32(&self, column: &str) -> Option<u32> {
        self.get(column).and_then(|v| v.trim().parse().ok())
    }

    /// Reads JDBC-style flags: `1`, `true`, `YES`.
    pub fn get_flag(&self, column: &str) -> bool {
        matches!(
            self.get(column).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("1" | "true" | "yes" | "y")
        )
    }
}

/// An open backend connection. Released when dropped.
pub trait Connection {
    fn execute_update(&mut self, sql: &str) -> Result<u64, ConnectionError>;

    fn execute_query(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError>;
}

/// Hands out connections; pooling and credentials live behind this trait.
pub trait ConnectionSource {
    /// Open a connection, bound to `schema` when the backend needs that.
    fn open(&self, schema: Option<&str>) -> Result<Box<dyn Connection + '_>, ConnectionError>;
}

/// ODBC-backed connection source.
pub struct ConnectionManager {
    environment: Environment,
    connection_string: String,
    login_timeout_sec: u32,
    schema_binding: Option<SchemaBinding>,
}

/// Renders the statement that binds a fresh session to a schema.
pub type SchemaBinding = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

impl ConnectionManager {
    pub fn new(connection_string: &str) -> Result<Self, ConnectionError> {
        let environment = Environment::new()
            .map_err(|e| ConnectionError::connection_failed(native_code(&e), e.to_string()))?;
        Ok(Self {
            environment,
            connection_string: connection_string.to_string(),
            login_timeout_sec: 0,
            schema_binding: None,
        })
    }

    pub fn with_login_timeout(mut self, seconds: u32) -> Self {
        self.login_timeout_sec = seconds;
        self
    }

    /// Run the statement produced by `binding` after connecting whenever a
    /// schema is requested, e.g. `USE <schema>`.
    pub fn with_schema_binding<F>(mut self, binding: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.schema_binding = Some(Box::new(binding));
        self
    }

    fn connect(&self) -> Result<OdbcHandle<'_>, ConnectionError> {
        debug!(
            "Connecting to database with connection string length: {}",
            self.connection_string.len()
        );

        let options = ConnectionOptions {
            login_timeout_sec: (self.login_timeout_sec > 0).then_some(self.login_timeout_sec),
            ..ConnectionOptions::default()
        };

        self.environment
            .connect_with_connection_string(&self.connection_string, options)
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                ConnectionError::connection_failed(native_code(&e), e.to_string())
            })
    }
}

impl ConnectionSource for ConnectionManager {
    fn open(&self, schema: Option<&str>) -> Result<Box<dyn Connection + '_>, ConnectionError> {
        let mut connection = OdbcConnection {
            connection: self.connect()?,
        };

        let binding = schema.zip(self.schema_binding.as_ref()).and_then(|(schema, bind)| bind(schema));
        if let Some(sql) = binding {
            connection.execute_update(&sql)?;
        }

        info!("Successfully connected to database");
        Ok(Box::new(connection))
    }
}

pub struct OdbcConnection<'env> {
    connection: OdbcHandle<'env>,
}

impl Connection for OdbcConnection<'_> {
    fn execute_update(&mut self, sql: &str) -> Result<u64, ConnectionError> {
        debug!("Executing SQL statement: {}", sql);

        let mut prepared = self.connection.prepare(sql).map_err(query_failed)?;
        let _ = prepared.execute(()).map_err(|e| {
            error!("Statement execution failed: {}", e);
            query_failed(e)
        })?;
        let affected = prepared.row_count().map_err(query_failed)?.unwrap_or(0);

        debug!("Statement affected {} rows", affected);
        Ok(affected as u64)
    }

    fn execute_query(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError> {
        debug!("Querying rows: {}", sql);

        let mut prepared = self.connection.prepare(sql).map_err(query_failed)?;
        let Some(mut cursor) = prepared.execute(()).map_err(query_failed)? else {
            debug!("Query returned no cursor");
            return Ok(Vec::new());
        };

        let names: Vec<String> = cursor
            .column_names()
            .map_err(query_failed)?
            .collect::<Result<_, _>>()
            .map_err(query_failed)?;

        let mut buffer = TextRowSet::for_cursor(100, &mut cursor, Some(4096)).map_err(query_failed)?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffer).map_err(query_failed)?;
        let mut results = Vec::new();

        while let Some(row_set) = row_set_cursor.fetch().map_err(query_failed)? {
            for row_index in 0..row_set.num_rows() {
                let mut row = Row::new();
                for (col_index, name) in names.iter().enumerate() {
                    let value = row_set
                        .at(col_index, row_index)
                        .map(|v| String::from_utf8_lossy(v).to_string());
                    row.push(name.clone(), value);
                }
                results.push(row);
            }
        }

        debug!("Query returned {} rows", results.len());
        Ok(results)
    }
}
