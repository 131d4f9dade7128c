use crate::config::Config;

pub fn render_status(config: &Config, credential: &str) -> String {
    let generation = &config.generation;
    let reliability = &config.reliability;

    let lines = [
        "◆ PersonaChat Status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Model       {}", config.model),
        format!("  Endpoint    {}", config.api_base_url),
        format!(
            "  API key     {}",
            if credential.trim().is_empty() {
                "missing (set PERSONACHAT_API_KEY, API_KEY or GEMINI_API_KEY)"
            } else {
                "configured"
            }
        ),
        format!(
            "  Sampling    temperature={:.2}, top_p={:.2}, top_k={}",
            generation.temperature, generation.top_p, generation.top_k
        ),
        format!(
            "  Retries     max_attempts={}, initial_backoff={}ms",
            reliability.max_attempts, reliability.initial_backoff_ms
        ),
        format!("  Reports     {}", config.report.output_dir.display()),
    ];

    lines.join("\n")
}
