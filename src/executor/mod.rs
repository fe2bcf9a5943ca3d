pub mod connection;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use connection::{
    Connection, ConnectionError, ConnectionManager, ConnectionSource, Row, SchemaBinding,
};
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockConnectionSource;
