use crate::{
    client_utils,
    cohere::api::{ChatMessage, ChatRequest, ChatResponse, ChatRole},
    Generation, GenerationError, GenerationResult, JokeGenerator, JokeRequest,
};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};
use std::time::Duration;

const PROVIDER: &str = "cohere";
pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_MODEL_ID: &str = "command-r-plus-08-2024";
pub const DEFAULT_TEMPERATURE: f64 = 0.95;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CHAT_PATH: &str = "/v2/chat";

pub struct CohereModel {
    model_id: String,
    api_key: String,
    base_url: String,
    temperature: f64,
    client: Client,
}

#[derive(Clone, Default)]
pub struct CohereModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub model_id: Option<String>,
    pub temperature: Option<f64>,
    /// Upper bound for one round trip. Ignored when `client` is given.
    pub timeout: Option<Duration>,
    pub client: Option<Client>,
}

impl CohereModel {
    /// Build a model. Fails only if the HTTP client cannot be constructed.
    pub fn new(options: CohereModelOptions) -> GenerationResult<Self> {
        let CohereModelOptions {
            base_url,
            api_key,
            model_id,
            temperature,
            timeout,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = match client {
            Some(client) => client,
            None => Client::builder()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()?,
        };

        Ok(Self {
            model_id: model_id.unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            api_key,
            base_url,
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            client,
        })
    }

    fn request_headers(&self) -> GenerationResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                GenerationError::InvalidInput(format!(
                    "Invalid Cohere API key header value: {error}"
                ))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn chat_request(&self, request: &JokeRequest) -> ChatRequest {
        ChatRequest {
            model: self.model_id.clone(),
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: request.prompt(),
            }],
            temperature: self.temperature,
        }
    }
}

#[async_trait::async_trait]
impl JokeGenerator for CohereModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, request: JokeRequest) -> GenerationResult<Generation> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id,
            self.temperature,
            request,
            |request| async move {
                let payload = self.chat_request(&request);
                let headers = self.request_headers()?;

                let (status, response): (_, ChatResponse) = client_utils::send_json(
                    &self.client,
                    &format!("{}{CHAT_PATH}", self.base_url),
                    &payload,
                    headers,
                )
                .await?;

                map_chat_response(status, &response)
            },
        )
        .await
    }
}

fn map_chat_response(
    status: reqwest::StatusCode,
    response: &ChatResponse,
) -> GenerationResult<Generation> {
    let Some(content) = response.content() else {
        tracing::warn!(
            status = status.as_u16(),
            response_id = response.id.as_deref(),
            "cohere response has no message content, treating as rate limited"
        );
        return Ok(Generation::RateLimited);
    };

    let first = content.first().ok_or_else(|| {
        GenerationError::Invariant(PROVIDER, "message content is empty".to_string())
    })?;

    let text = first.text.as_ref().ok_or_else(|| {
        GenerationError::Invariant(
            PROVIDER,
            format!("first content item of type '{}' has no text", first.kind),
        )
    })?;

    Ok(Generation::Joke(text.clone()))
}
