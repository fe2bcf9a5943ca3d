//! In-memory connection source that records statements and replays canned
//! result sets.

use crate::executor::connection::{Connection, ConnectionError, ConnectionSource, Row};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MockState {
    opened: Vec<Option<String>>,
    closed: usize,
    statements: Vec<String>,
    responses: Vec<(String, Vec<Row>)>,
    failures: Vec<(String, ConnectionError)>,
    open_failure: Option<ConnectionError>,
}

#[derive(Default)]
pub struct MockConnectionSource {
    state: Mutex<MockState>,
}

impl MockConnectionSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queries containing `fragment` return `rows`. The first registered
    /// match wins; unmatched queries return no rows.
    pub fn respond(&self, fragment: &str, rows: Vec<Row>) -> &Self {
        self.state().responses.push((fragment.to_string(), rows));
        self
    }

    /// Statements containing `fragment` fail with the given native code.
    pub fn fail(&self, fragment: &str, code: i32, message: &str) -> &Self {
        self.state()
            .failures
            .push((fragment.to_string(), ConnectionError::query_failed(code, message)));
        self
    }

    pub fn fail_open(&self, code: i32, message: &str) -> &Self {
        self.state().open_failure = Some(ConnectionError::connection_failed(code, message));
        self
    }

    /// Every statement sent so far, queries and updates alike.
    pub fn executed(&self) -> Vec<String> {
        self.state().statements.clone()
    }

    pub fn opened_schemas(&self) -> Vec<Option<String>> {
        self.state().opened.clone()
    }

    pub fn open_count(&self) -> usize {
        self.state().opened.len()
    }

    pub fn close_count(&self) -> usize {
        self.state().closed
    }

    fn record(&self, sql: &str) -> Result<(), ConnectionError> {
        let mut state = self.state();
        state.statements.push(sql.to_string());
        match state.failures.iter().find(|(fragment, _)| sql.contains(fragment.as_str())) {
            Some((_, err)) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl ConnectionSource for MockConnectionSource {
    fn open(&self, schema: Option<&str>) -> Result<Box<dyn Connection + '_>, ConnectionError> {
        let mut state = self.state();
        if let Some(err) = state.open_failure.clone() {
            return Err(err);
        }
        state.opened.push(schema.map(str::to_string));
        Ok(Box::new(MockConnection { source: self }))
    }
}

struct MockConnection<'a> {
    source: &'a MockConnectionSource,
}

impl Connection for MockConnection<'_> {
    fn execute_update(&mut self, sql: &str) -> Result<u64, ConnectionError> {
        self.source.record(sql)?;
        Ok(0)
    }

    fn execute_query(&mut self, sql: &str) -> Result<Vec<Row>, ConnectionError> {
        self.source.record(sql)?;
        let state = self.source.state();
        Ok(state
            .responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

impl Drop for MockConnection<'_> {
    fn drop(&mut self) {
        self.source.state().closed += 1;
    }
}
