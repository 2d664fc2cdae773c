//! A bridge that answers every question the same way.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use materials_explorer::bridge::{BridgeError, SqlGenerator};

pub struct FixedGenerator {
    answer: Result<String, BridgeError>,
    calls: AtomicUsize,
}

impl FixedGenerator {
    pub fn answering(sql: &str) -> Arc<Self> {
        Arc::new(FixedGenerator {
            answer: Ok(sql.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: BridgeError) -> Arc<Self> {
        Arc::new(FixedGenerator {
            answer: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlGenerator for FixedGenerator {
    async fn generate(&self, _question: &str) -> Result<String, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}
