//! Per-user joke history.
//!
//! Records are append-only. Reads return the newest jokes first, capped at
//! [`HISTORY_LIMIT`].
mod memory;
mod mongo;

use crate::HistoryResult;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryHistoryStore;
pub use mongo::MongoHistoryStore;

/// Maximum number of jokes returned by [`HistoryStore::fetch_recent`].
pub const HISTORY_LIMIT: usize = 10;

/// One stored joke, as laid out in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeRecord {
    pub email: String,
    #[serde(rename = "jokeText")]
    pub joke_text: String,
}

impl JokeRecord {
    pub fn new(email: impl Into<String>, joke_text: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            joke_text: joke_text.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one record for `email`.
    async fn append(&self, email: &str, joke_text: &str) -> HistoryResult<()>;

    /// Joke texts stored for exactly `email`, most recent first, at most
    /// [`HISTORY_LIMIT`] of them.
    async fn fetch_recent(&self, email: &str) -> HistoryResult<Vec<String>>;
}
