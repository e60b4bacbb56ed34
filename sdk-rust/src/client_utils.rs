use crate::GenerationError;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response body as JSON.
///
/// The status code is returned alongside the body instead of being turned
/// into an error: providers put meaningful JSON in 4xx bodies and callers
/// decide what an absent field means.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<(StatusCode, R), GenerationError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice::<R>(&bytes)?;
    Ok((status, body))
}
