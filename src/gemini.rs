use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::StudyError;

/// Thin client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: base64_data.into(),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, StudyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        log::info!(
            "Gemini client: {} at {}",
            config.gemini_model,
            config.gemini_base_url
        );

        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    /// JSON-mode generation constrained by `schema`, deserialised into `T`.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        schema: serde_json::Value,
        temperature: f32,
    ) -> Result<T, StudyError> {
        let request = GenerateRequest {
            contents: vec![Content { role: "user", parts }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: Some("application/json"),
                response_schema: Some(schema),
            },
        };
        let text = self.send(&request).await?;
        Ok(serde_json::from_str(strip_code_fence(&text))?)
    }

    pub async fn generate_text(&self, prompt: String, temperature: f32) -> Result<String, StudyError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::text(prompt)],
            }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: None,
                response_schema: None,
            },
        };
        self.send(&request).await
    }

    async fn send(&self, request: &GenerateRequest) -> Result<String, StudyError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StudyError::Api {
                status: status.as_u16(),
                message: api_error_message(&message),
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(StudyError::EmptyResponse)
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(500).collect())
}

/// JSON mode sometimes still wraps the payload in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_the_rest_field_names() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::inline_data("application/pdf", "QUJD"),
                    Part::text("Summarize"),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                response_mime_type: Some("application/json"),
                response_schema: Some(json!({"type": "OBJECT"})),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "application/pdf", "data": "QUJD"}},
                        {"text": "Summarize"}
                    ]
                }],
                "generationConfig": {
                    "temperature": 0.5,
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn text_only_config_omits_json_mode() {
        let config = GenerationConfig {
            temperature: 0.7,
            response_mime_type: None,
            response_schema: None,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("responseMimeType").is_none());
        assert!(value.get("responseSchema").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn blocked_or_blank_responses_have_no_text() {
        let blocked: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(blocked.text().is_none());

        let blank: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]}))
                .unwrap();
        assert!(blank.text().is_none());
    }

    #[test]
    fn error_bodies_are_reduced_to_the_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(api_error_message(body), "Quota exceeded");
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence(" {\"a\":1} "), "{\"a\":1}");
    }
}
