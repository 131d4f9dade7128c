use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `PersonaChat`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PersonaChatError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Generation ────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Report ──────────────────────────────────────────────────────────
    #[error("report: {0}")]
    Report(#[from] ReportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Generation errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("prompt template failed: {0}")]
    Template(String),
}

// ─── Report errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("render failed: {0}")]
    Render(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PersonaChatError>;
