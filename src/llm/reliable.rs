use super::classify::classify_failure;
use super::credentials::CredentialSource;
use super::traits::GenerationTransport;
use super::types::{GenerationRequest, Turn};
use crate::config::{Config, GenerationConfig, ReliabilityConfig};
use crate::persona::contains_emotion_tag;
use crate::prompt::SystemInstructionBuilder;
use crate::session::types::{Message, Persona};
use std::sync::Arc;
use std::time::Duration;

/// Reply used when the service answers without any text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "I'm processing this... [NEUTRAL]";

/// Persona-aware generation with bounded, doubling backoff on transient
/// failures (rate limits and overload).
pub struct GenerationClient {
    transport: Box<dyn GenerationTransport>,
    credentials: Arc<dyn CredentialSource>,
    instructions: SystemInstructionBuilder,
    model: String,
    sampling: GenerationConfig,
    max_attempts: u32,
    initial_backoff_ms: u64,
}

impl GenerationClient {
    pub fn new(
        transport: Box<dyn GenerationTransport>,
        credentials: Arc<dyn CredentialSource>,
        model: impl Into<String>,
        sampling: GenerationConfig,
        reliability: ReliabilityConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            transport,
            credentials,
            instructions: SystemInstructionBuilder::new()?,
            model: model.into(),
            sampling,
            max_attempts: reliability.max_attempts.max(1),
            initial_backoff_ms: reliability.initial_backoff_ms,
        })
    }

    pub fn from_config(
        config: &Config,
        transport: Box<dyn GenerationTransport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> anyhow::Result<Self> {
        Self::new(
            transport,
            credentials,
            config.model.clone(),
            config.generation,
            config.reliability,
        )
    }

    /// Delay before the attempt following the 0-based `attempt_index`.
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt_index);
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }

    /// Assemble the request for `new_user_text` on top of the prior `history`.
    pub fn build_request(
        &self,
        persona: &Persona,
        history: &[Message],
        new_user_text: &str,
    ) -> anyhow::Result<GenerationRequest> {
        let system_instruction = self.instructions.build(persona, new_user_text)?;
        let turns = history
            .iter()
            .map(Turn::from)
            .chain(std::iter::once(Turn::user(new_user_text)))
            .collect();

        Ok(GenerationRequest {
            model: self.model.clone(),
            turns,
            system_instruction,
            sampling: self.sampling,
        })
    }

    /// Generate the persona's reply, tagged with an emotion marker.
    ///
    /// On failure the last observed error is returned unchanged.
    pub async fn generate(
        &self,
        persona: &Persona,
        history: &[Message],
        new_user_text: &str,
    ) -> anyhow::Result<String> {
        let request = self.build_request(persona, history, new_user_text)?;
        let response = self.send_with_retry(&request).await?;

        let mut text = response
            .text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_string());
        if !contains_emotion_tag(&text) {
            text.push_str(" [NEUTRAL]");
        }
        Ok(text)
    }

    async fn send_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> anyhow::Result<super::types::GenerationResponse> {
        let transport_name = self.transport.name();
        let mut attempt = 0;

        loop {
            // Re-read on every attempt so a rotated key takes effect immediately.
            let credential = self.credentials.resolve();

            match self.transport.generate(&credential, request).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!(
                            transport = transport_name,
                            attempt = attempt + 1,
                            "Generation recovered after retries"
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let class = classify_failure(&e);
                    let attempts_left = attempt + 1 < self.max_attempts;

                    if !class.is_transient() || !attempts_left {
                        tracing::error!(
                            transport = transport_name,
                            attempt = attempt + 1,
                            max_attempts = self.max_attempts,
                            class = %class,
                            "Generation failed: {e}"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        transport = transport_name,
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        class = %class,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Generation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
