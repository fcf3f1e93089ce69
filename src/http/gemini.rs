use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{AdviceService, AdviceUnavailable, UnavailableCause};
use crate::config::AdviceConfig;

pub const SYSTEM_INSTRUCTION: &str = "You are Numus AI, the DJ of a streaming service \
whose catalog is generated with Suno.ai. Only talk about music: recommend styles, genres, \
moods, eras and prompt ideas for generating songs. Keep answers short and use markdown \
lists for suggestions. Politely steer any other topic back to music.";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

fn build_request(query: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: query }],
        }],
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, AdviceUnavailable> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AdviceUnavailable::new(
            UnavailableCause::EmptyResponse,
            "model returned no text",
        ));
    }
    Ok(text)
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AdviceConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdviceService for GeminiClient {
    async fn advise(&self, query: &str) -> Result<String, AdviceUnavailable> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdviceUnavailable::new(
                UnavailableCause::MissingCredential,
                "set GEMINI_API_KEY or store a key in the system keyring",
            )
        })?;

        info!(endpoint = self.endpoint.as_str(), "advice_request");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&build_request(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "advice_request_rejected");
            return Err(AdviceUnavailable::new(
                UnavailableCause::from_status(status.as_u16()),
                body,
            ));
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AdviceUnavailable::new(UnavailableCause::MalformedResponse, e.to_string())
        })?;
        let text = extract_text(parsed)?;
        info!(chars = text.len(), "advice_received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_carries_instruction_and_query() {
        let body = serde_json::to_value(build_request("lofi beats")).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
                "contents": [{ "role": "user", "parts": [{ "text": "lofi beats" }] }]
            })
        );
    }

    #[test]
    fn text_parts_of_first_candidate_are_joined() {
        let response = parse(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Try " }, { "text": "**vaporwave**" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(extract_text(response).unwrap(), "Try **vaporwave**");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let err = extract_text(parse(json!({ "promptFeedback": { "blockReason": "OTHER" } })))
            .unwrap_err();
        assert_eq!(err.cause, UnavailableCause::EmptyResponse);
    }

    #[test]
    fn whitespace_text_is_empty_response() {
        let err = extract_text(parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  \n" }] } }]
        })))
        .unwrap_err();
        assert_eq!(err.cause, UnavailableCause::EmptyResponse);
    }

    #[test]
    fn endpoint_is_built_from_config() {
        let config = AdviceConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://example.test/v1beta/".to_string(),
        };
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let config = AdviceConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        };
        let err = GeminiClient::new(&config).advise("synthwave").await.unwrap_err();
        assert_eq!(err.cause, UnavailableCause::MissingCredential);
    }
}
