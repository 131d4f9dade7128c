//! Google Gemini `generateContent` transport.
//!
//! The API key travels in the `x-goog-api-key` header rather than the query
//! string so it never shows up in request URLs or transport error messages.

use crate::error::LlmError;
use crate::llm::{
    build_provider_client, sanitize_api_error,
    traits::GenerationTransport,
    types::{GenerationRequest, GenerationResponse, TurnRole},
};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

const PROVIDER: &str = "Gemini";

pub struct GeminiTransport {
    base_url: String,
    client: Client,
}

impl GeminiTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_provider_client(),
        }
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        )
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        TurnRole::User => "user",
                        TurnRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        let system_instruction = (!request.system_instruction.is_empty()).then(|| Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request.sampling.temperature,
                top_p: request.sampling.top_p,
                top_k: request.sampling.top_k,
            },
        }
    }

    /// Concatenate the text parts of the first candidate, if there are any.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts = &response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts;

        let text = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        (!text.is_empty()).then_some(text)
    }

    async fn call_api(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> anyhow::Result<GenerationResponse> {
        let body = Self::build_request(request);
        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                message: sanitize_api_error(&error_text),
            }
            .into());
        }

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            let message = sanitize_api_error(&err.message);
            return Err(match err.code {
                Some(code) => LlmError::Status {
                    provider: PROVIDER.to_string(),
                    status: code,
                    message,
                },
                None => LlmError::Request {
                    provider: PROVIDER.to_string(),
                    message,
                },
            }
            .into());
        }

        Ok(GenerationResponse {
            text: Self::extract_text(&result),
        })
    }
}

impl GenerationTransport for GeminiTransport {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GenerationResponse>> + Send + 'a>> {
        Box::pin(async move { self.call_api(credential, request).await })
    }
}
