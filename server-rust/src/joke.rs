//! One joke request, from form fields to the composed page body.
use crate::{history::HistoryStore, state::AppState};
use joke_sdk::{Generation, JokeRequest};
use serde::Deserialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Shown when the generator could not produce an answer at all.
pub const GENERATION_FAILED_TEXT: &str =
    "Error: could not fetch a joke right now. Try again later.";

/// Fields posted by the joke form. Absent fields are empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JokeForm {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "jokeType")]
    pub joke_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeText {
    Generated(Generation),
    Failed,
}

impl JokeText {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(generation) => generation.display_text(),
            Self::Failed => GENERATION_FAILED_TEXT,
        }
    }

    #[must_use]
    pub fn persistable_text(&self) -> Option<&str> {
        match self {
            Self::Generated(generation) => generation.persistable_text(),
            Self::Failed => None,
        }
    }
}

/// What the page shows for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeBody {
    pub joke: JokeText,
    /// `None` for anonymous requests. `Some` (possibly empty) when an email
    /// was given, most recent joke first.
    pub history: Option<Vec<String>>,
}

pub struct ToldJoke {
    pub body: JokeBody,
    /// The detached history write, if one was started. Dropping the handle
    /// does not cancel it.
    pub pending_write: Option<JoinHandle<()>>,
}

/// Fetch history and generate a joke concurrently, then record the joke for
/// the user without waiting on the write.
pub async fn tell_joke(state: &AppState, form: JokeForm) -> ToldJoke {
    let JokeForm { email, joke_type } = form;
    let request = JokeRequest::new(joke_type);
    debug!(email = %email, style = request.style(), "joke requested");

    let history = async {
        if email.is_empty() {
            None
        } else {
            Some(load_history(state.history.as_ref(), &email).await)
        }
    };
    let (history, generation) = tokio::join!(history, state.generator.generate(request));

    let joke = match generation {
        Ok(generation) => {
            if generation == Generation::RateLimited {
                warn!("joke generation was rate limited");
            }
            JokeText::Generated(generation)
        }
        Err(error) => {
            error!(%error, transport = error.is_transport(), "joke generation failed");
            JokeText::Failed
        }
    };

    let pending_write = match joke.persistable_text() {
        Some(text) if !email.is_empty() => Some(spawn_append(
            Arc::clone(&state.history),
            email,
            text.to_string(),
        )),
        _ => None,
    };

    ToldJoke {
        body: JokeBody { joke, history },
        pending_write,
    }
}

async fn load_history(store: &dyn HistoryStore, email: &str) -> Vec<String> {
    match store.fetch_recent(email).await {
        Ok(history) => history,
        Err(error) => {
            warn!(%error, "could not load joke history, showing none");
            Vec::new()
        }
    }
}

fn spawn_append(store: Arc<dyn HistoryStore>, email: String, joke_text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.append(&email, &joke_text).await {
            Ok(()) => debug!(email = %email, "joke added to history"),
            Err(error) => error!(%error, "failed to add joke to history"),
        }
    })
}
