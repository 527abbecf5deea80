use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; capabilities that depend on a missing one are
/// reported as unavailable at startup rather than failing the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub ocr_enabled: bool,
    pub pdftotext_bin: String,
    pub pdftoppm_bin: String,
    pub tesseract_bin: String,
    pub ner_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub polish_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let anthropic_api_key = optional_env("ANTHROPIC_API_KEY");
        let polish_default = anthropic_api_key.is_some();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            ocr_enabled: bool_env("OCR_ENABLED", true)?,
            pdftotext_bin: optional_env("PDFTOTEXT_BIN").unwrap_or_else(|| "pdftotext".into()),
            pdftoppm_bin: optional_env("PDFTOPPM_BIN").unwrap_or_else(|| "pdftoppm".into()),
            tesseract_bin: optional_env("TESSERACT_BIN").unwrap_or_else(|| "tesseract".into()),
            ner_url: optional_env("NER_URL"),
            anthropic_api_key,
            polish_enabled: bool_env("POLISH_ENABLED", polish_default)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            ocr_enabled: true,
            pdftotext_bin: "pdftotext".to_string(),
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
            ner_url: None,
            anthropic_api_key: None,
            polish_enabled: false,
        }
    }
}

/// Reads a variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bool_env(key: &str, default: bool) -> Result<bool> {
    match optional_env(key) {
        None => Ok(default),
        Some(v) => parse_bool(&v)
            .with_context(|| format!("Environment variable '{key}' must be true/false, got '{v}'")),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_default_config_has_no_optional_backends() {
        let config = Config::default();
        assert!(config.ner_url.is_none());
        assert!(config.anthropic_api_key.is_none());
        assert!(!config.polish_enabled);
        assert!(config.ocr_enabled);
    }
}
