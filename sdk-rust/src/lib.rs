mod client_utils;
pub mod cohere;
mod errors;
mod generator;
pub mod joke_sdk_test;
mod opentelemetry;
mod types;

pub use errors::*;
pub use generator::JokeGenerator;
pub use types::*;
