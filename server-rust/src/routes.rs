use crate::{
    joke::{tell_joke, JokeForm},
    state::AppState,
    AppError,
};
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/joke", post(joke_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.index(None)?))
}

async fn joke_handler(
    State(state): State<AppState>,
    Form(form): Form<JokeForm>,
) -> Result<Html<String>, AppError> {
    let told = tell_joke(&state, form).await;
    // The history write finishes on its own after the response is sent.
    drop(told.pending_write);
    Ok(Html(state.pages.index(Some(&told.body))?))
}
