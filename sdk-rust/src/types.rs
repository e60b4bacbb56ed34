use std::fmt;

/// Style used when the caller leaves the style blank.
pub const DEFAULT_STYLE: &str = "funny";

/// Text shown in place of a joke when the provider answers without content.
pub const RATE_LIMITED_TEXT: &str = "Error: rate limited. Slow down jokester!";

/// A request for a single joke in a given style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRequest {
    style: String,
}

impl JokeRequest {
    /// Blank styles are normalized to [`DEFAULT_STYLE`].
    #[must_use]
    pub fn new(style: impl Into<String>) -> Self {
        let style = style.into();
        let style = if style.trim().is_empty() {
            DEFAULT_STYLE.to_string()
        } else {
            style
        };
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &str {
        &self.style
    }

    /// The single user turn sent to the model.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Generate a random joke with the following style: {}. Do not explain the joke. Just \
             give me the joke with no words in front. Do not use any slurs.",
            self.style
        )
    }
}

impl Default for JokeRequest {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE)
    }
}

/// Outcome of a generation that reached the provider and got a well-formed
/// answer back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Joke(String),
    /// The provider answered without any message content. Cohere does this
    /// when the key is being throttled.
    RateLimited,
}

impl Generation {
    #[must_use]
    pub fn joke(text: impl Into<String>) -> Self {
        Self::Joke(text.into())
    }

    /// Text to show to the user.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Joke(text) => text,
            Self::RateLimited => RATE_LIMITED_TEXT,
        }
    }

    /// Returns the joke text if it is worth keeping in a user's history.
    /// A model echoing the sentinel text is not.
    #[must_use]
    pub fn persistable_text(&self) -> Option<&str> {
        match self {
            Self::Joke(text) if text != RATE_LIMITED_TEXT => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
