use crate::{Generation, GenerationResult, JokeRequest};

#[async_trait::async_trait]
pub trait JokeGenerator: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, request: JokeRequest) -> GenerationResult<Generation>;
}
