use super::TextGenerator;
use crate::configuration::GenerativeSettings;
use crate::connectors::ConnectorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &GenerativeSettings, api_key: String) -> Result<Self, ConnectorError> {
        if api_key.trim().is_empty() {
            return Err(ConnectorError::NotConfigured(format!("{API_KEY_ENV} is empty")));
        }
        if settings.model.trim().is_empty() {
            return Err(ConnectorError::NotConfigured("generative.model is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|err| ConnectorError::NotConfigured(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    /// Reads the key from the environment, never from the configuration file.
    pub fn from_env(settings: &GenerativeSettings) -> Result<Self, ConnectorError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ConnectorError::NotConfigured(format!("{API_KEY_ENV} is not set")))?;
        Self::new(settings, api_key)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, ConnectorError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or_else(|| ConnectorError::InvalidResponse("no candidates returned".to_string()))?;

    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.is_empty() {
        return Err(ConnectorError::InvalidResponse(
            "first candidate has no text".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[tracing::instrument(name = "Generate text.", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, ConnectorError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Generative API returned an error");
            return Err(ConnectorError::from_status(status, body));
        }

        let response: GenerateResponse = response.json().await?;
        extract_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(endpoint: String) -> GenerativeSettings {
        GenerativeSettings {
            endpoint,
            model: "gemini-test".to_string(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Say hi"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "Hi"}, {"text": " there"}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(server.uri()), "test-key".to_string()).unwrap();
        let text = client.generate("Say hi").await.unwrap();

        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(server.uri()), "bad-key".to_string()).unwrap();
        let err = client.generate("Say hi").await.unwrap_err();

        assert!(matches!(err, ConnectorError::Unauthorized(body) if body.contains("not valid")));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&settings(server.uri()), "test-key".to_string()).unwrap();
        let err = client.generate("Say hi").await.unwrap_err();

        assert!(matches!(err, ConnectorError::InvalidResponse(_)));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let result = GeminiClient::new(&settings("http://localhost".to_string()), " ".to_string());
        assert!(matches!(result, Err(ConnectorError::NotConfigured(_))));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client =
            GeminiClient::new(&settings("http://localhost/v1beta/".to_string()), "k".to_string())
                .unwrap();
        assert_eq!(
            client.url(),
            "http://localhost/v1beta/models/gemini-test:generateContent"
        );
    }
}
