use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("PERSONACHAT_MODEL")
            && !model.is_empty()
        {
            self.model = model;
        }

        if let Ok(base_url) = std::env::var("PERSONACHAT_API_BASE_URL")
            && !base_url.is_empty()
        {
            self.api_base_url = base_url;
        }

        if let Ok(temp_str) = std::env::var("PERSONACHAT_TEMPERATURE")
            && !temp_str.is_empty()
        {
            match temp_str.parse::<f64>() {
                Ok(temp) if (0.0..=2.0).contains(&temp) => self.generation.temperature = temp,
                _ => tracing::warn!(
                    value = %temp_str,
                    "Ignoring PERSONACHAT_TEMPERATURE: expected a number between 0.0 and 2.0"
                ),
            }
        }

        if let Ok(dir) = std::env::var("PERSONACHAT_REPORT_DIR")
            && !dir.is_empty()
        {
            self.report.output_dir = PathBuf::from(dir);
        }
    }
}
