use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed, timed out, or its body could not
    /// be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a body that is not JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response from the provider was unexpected. (e.g. an empty content
    /// array in a Cohere chat response)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

impl GenerationError {
    /// Whether the failure happened before a well-formed response was read.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
