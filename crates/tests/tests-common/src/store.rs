//! A fake store that records what it was asked to run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use query_engine_execution::store::Store;
use query_engine_execution::{ResultRow, StoreError};

pub struct RecordingStore {
    calls: AtomicUsize,
    statements: Mutex<Vec<String>>,
    response: Result<Vec<ResultRow>, StoreError>,
}

impl RecordingStore {
    /// Answers every statement with `rows`.
    pub fn returning(rows: Vec<ResultRow>) -> Arc<Self> {
        Arc::new(RecordingStore {
            calls: AtomicUsize::new(0),
            statements: Mutex::new(vec![]),
            response: Ok(rows),
        })
    }

    /// Fails every statement with `error`.
    pub fn failing(error: StoreError) -> Arc<Self> {
        Arc::new(RecordingStore {
            calls: AtomicUsize::new(0),
            statements: Mutex::new(vec![]),
            response: Err(error),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.statements.lock().unwrap().push(sql.to_string());
        self.response.clone()
    }
}
