use std::env;
use secrecy::SecretString;

pub const DEFAULT_GENERATION_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    /// `None` leaves the generation service unconfigured; requests then fail
    /// with `ServiceUnavailable`.
    pub generation_api_key: Option<SecretString>,
    pub generation_api_base: String,
    pub generation_model: String,
    pub session_ttl_minutes: i64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            generation_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            generation_api_base: env::var("GENERATION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GENERATION_API_BASE.to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(60),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
        }
    }

    pub fn generation_configured(&self) -> bool {
        self.generation_api_key.is_some()
    }

    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            generation_api_key: None,
            generation_api_base: DEFAULT_GENERATION_API_BASE.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            session_ttl_minutes: 60,
            cors_allowed_origin: None,
        }
    }
}
