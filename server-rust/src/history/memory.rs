use super::{HistoryStore, JokeRecord, HISTORY_LIMIT};
use crate::HistoryResult;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// History kept in process memory. Lost on restart.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<JokeRecord>>,
}

impl InMemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub fn records(&self) -> Vec<JokeRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JokeRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, email: &str, joke_text: &str) -> HistoryResult<()> {
        self.lock().push(JokeRecord::new(email, joke_text));
        Ok(())
    }

    async fn fetch_recent(&self, email: &str) -> HistoryResult<Vec<String>> {
        Ok(self
            .lock()
            .iter()
            .rev()
            .filter(|record| record.email == email)
            .take(HISTORY_LIMIT)
            .map(|record| record.joke_text.clone())
            .collect())
    }
}
