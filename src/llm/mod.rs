// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod classify;
pub mod credentials;
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Retry layer ─────────────────────────────────────────────────────────────
pub mod reliable;

// ── Transports ──────────────────────────────────────────────────────────────
pub mod gemini;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use classify::{FailureClass, classify_failure};
pub use credentials::{CredentialSource, EnvCredentialSource};
pub use gemini::GeminiTransport;
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use reliable::{EMPTY_REPLY_PLACEHOLDER, GenerationClient};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::GenerationTransport;
pub use types::{GenerationRequest, GenerationResponse, Turn, TurnRole};
