use super::types::{GenerationRequest, GenerationResponse};
use std::future::Future;
use std::pin::Pin;

/// Black-box access to a remote text-generation service.
///
/// Implementations perform exactly one call per invocation; retries live in
/// [`GenerationClient`](super::GenerationClient). Failures must carry a
/// human-readable description, since retry classification reads it.
pub trait GenerationTransport: Send + Sync {
    /// Transport identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GenerationResponse>> + Send + 'a>>;
}
