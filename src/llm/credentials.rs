/// Source of the API credential, consulted before every generation attempt.
///
/// Resolution never fails: a missing credential is the empty string and the
/// remote call reports the problem.
pub trait CredentialSource: Send + Sync {
    fn resolve(&self) -> String;
}

impl<F> CredentialSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn resolve(&self) -> String {
        self()
    }
}

/// Reads the credential from the process environment on every call, so a key
/// rotated while the process runs is picked up by the next attempt.
///
/// Lookup order:
/// 1. `PERSONACHAT_API_KEY`
/// 2. `API_KEY`
/// 3. `GEMINI_API_KEY`
/// 4. the `api_key` from the config file
pub struct EnvCredentialSource {
    fallback: Option<String>,
}

impl EnvCredentialSource {
    const VARS: [&'static str; 3] = ["PERSONACHAT_API_KEY", "API_KEY", "GEMINI_API_KEY"];

    pub fn new(fallback: Option<String>) -> Self {
        Self { fallback }
    }
}

impl CredentialSource for EnvCredentialSource {
    fn resolve(&self) -> String {
        Self::VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .or_else(|| self.fallback.clone())
            .unwrap_or_default()
    }
}
