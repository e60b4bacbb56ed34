use crate::{Generation, GenerationResult, JokeRequest};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct GenerationSpan {
    span: Span,
    start_time: Instant,
    temperature: f64,
    outcome: Option<&'static str>,
}

impl GenerationSpan {
    pub fn new(provider: &str, model_id: &str, temperature: f64, request: &JokeRequest) -> Self {
        let span = info_span!("joke_sdk.generate", style = request.style());
        span.set_attribute("gen_ai.operation.name", "chat");
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());
        span.set_attribute("joke_sdk.style", request.style().to_string());

        Self {
            span,
            start_time: Instant::now(),
            temperature,
            outcome: None,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_generation(&mut self, generation: &Generation) {
        self.outcome = Some(match generation {
            Generation::Joke(_) => "joke",
            Generation::RateLimited => "rate_limited",
        });
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.outcome = Some("error");
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        self.span
            .set_attribute("gen_ai.request.temperature", self.temperature);
        self.span
            .set_attribute("joke_sdk.duration", self.start_time.elapsed().as_secs_f64());
        if let Some(outcome) = self.outcome {
            self.span.set_attribute("joke_sdk.outcome", outcome);
        }
    }
}

pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    temperature: f64,
    request: JokeRequest,
    f: F,
) -> GenerationResult<Generation>
where
    F: FnOnce(JokeRequest) -> Fut,
    Fut: std::future::Future<Output = GenerationResult<Generation>>,
{
    let mut span = GenerationSpan::new(provider, model_id, temperature, &request);
    let result = span.instrument_future(f(request)).await;

    match &result {
        Ok(generation) => span.on_generation(generation),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
