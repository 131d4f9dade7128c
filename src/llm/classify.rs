//! Retry classification for generation failures.
//!
//! All knowledge of which failures are transient lives here. Structured
//! status codes are used when the error chain carries one; otherwise the
//! lower-cased error description is matched against the substrings the
//! service is known to use.

use crate::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureClass {
    /// Rate limit or exhausted quota (`429`, "quota").
    RateLimited,
    /// Temporary server trouble (`503`, "overloaded").
    Overloaded,
    /// Anything else; never retried.
    Fatal,
}

impl FailureClass {
    pub fn is_transient(self) -> bool {
        matches!(self, FailureClass::RateLimited | FailureClass::Overloaded)
    }
}

fn class_for_status(code: u16) -> Option<FailureClass> {
    match code {
        429 => Some(FailureClass::RateLimited),
        503 => Some(FailureClass::Overloaded),
        _ => None,
    }
}

fn status_code(err: &anyhow::Error) -> Option<u16> {
    err.chain().find_map(|cause| {
        if let Some(LlmError::Status { status, .. }) = cause.downcast_ref::<LlmError>() {
            return Some(*status);
        }
        cause
            .downcast_ref::<reqwest::Error>()
            .and_then(reqwest::Error::status)
            .map(|status| status.as_u16())
    })
}

/// Classify a failed generation attempt.
pub fn classify_failure(err: &anyhow::Error) -> FailureClass {
    if let Some(class) = status_code(err).and_then(class_for_status) {
        return class;
    }

    let description = format!("{err:#}").to_lowercase();
    if description.contains("429") || description.contains("quota") {
        FailureClass::RateLimited
    } else if description.contains("503") || description.contains("overloaded") {
        FailureClass::Overloaded
    } else {
        FailureClass::Fatal
    }
}
