use crate::{history::HistoryStore, page::Pages};
use joke_sdk::JokeGenerator;
use std::sync::Arc;

/// Shared, read-only handles built once before the first request.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn JokeGenerator>,
    pub history: Arc<dyn HistoryStore>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn JokeGenerator>,
        history: Arc<dyn HistoryStore>,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            generator,
            history,
            pages: Arc::new(Pages::new()?),
        })
    }
}
