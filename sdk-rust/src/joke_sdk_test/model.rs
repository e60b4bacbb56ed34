use std::{collections::VecDeque, sync::Mutex};

use crate::{Generation, GenerationError, GenerationResult, JokeGenerator, JokeRequest};

/// Result for a mocked `generate` call.
/// It can either be a generation outcome or an error to return.
pub enum MockGenerateResult {
    Generation(Generation),
    Error(GenerationError),
}

impl MockGenerateResult {
    /// Construct a result that yields the provided joke text.
    pub fn joke(text: impl Into<String>) -> Self {
        Self::Generation(Generation::joke(text))
    }

    /// Construct a result that yields the rate limited outcome.
    pub fn rate_limited() -> Self {
        Self::Generation(Generation::RateLimited)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: GenerationError) -> Self {
        Self::Error(error)
    }
}

impl From<Generation> for MockGenerateResult {
    fn from(generation: Generation) -> Self {
        Self::Generation(generation)
    }
}

impl From<GenerationResult<Generation>> for MockGenerateResult {
    fn from(result: GenerationResult<Generation>) -> Self {
        match result {
            Ok(generation) => Self::Generation(generation),
            Err(error) => Self::Error(error),
        }
    }
}

#[derive(Default)]
struct MockJokeGeneratorState {
    mocked_results: VecDeque<MockGenerateResult>,
    tracked_requests: Vec<JokeRequest>,
}

/// A mock joke generator for testing that tracks requests and yields
/// predefined outcomes.
pub struct MockJokeGenerator {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockJokeGeneratorState>,
}

impl Default for MockJokeGenerator {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-model".to_string(),
            state: Mutex::new(MockJokeGeneratorState::default()),
        }
    }
}

impl MockJokeGenerator {
    /// Construct a new mock generator instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the model identifier returned by the mock.
    pub fn set_model_id<S: Into<String>>(&mut self, model_id: S) {
        self.model_id = model_id.into();
    }

    /// Enqueue one or more mocked results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockGenerateResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockGenerateResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Retrieve the tracked requests accumulated so far.
    pub fn tracked_requests(&self) -> Vec<JokeRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.clear();
        state.tracked_requests.clear();
    }
}

#[async_trait::async_trait]
impl JokeGenerator for MockJokeGenerator {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, request: JokeRequest) -> GenerationResult<Generation> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.push(request);

        let result = state.mocked_results.pop_front().ok_or_else(|| {
            GenerationError::Invariant(self.provider, "no mocked generate results available".into())
        })?;

        match result {
            MockGenerateResult::Generation(generation) => Ok(generation),
            MockGenerateResult::Error(error) => Err(error),
        }
    }
}
