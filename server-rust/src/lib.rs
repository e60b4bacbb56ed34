pub mod cli;
pub mod config;
pub mod console;
mod errors;
pub mod history;
pub mod joke;
pub mod page;
pub mod routes;
pub mod state;

pub use errors::*;
pub use joke::{tell_joke, JokeBody, JokeForm, JokeText, ToldJoke};
pub use state::AppState;
