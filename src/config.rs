pub const API_KEY_VAR: &str = "AI_GATEWAY_API_KEY";
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
/// Vision-capable model used for every analysis.
pub const ANALYSIS_MODEL: &str = "google/gemini-2.5-pro";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway_api_key: Option<String>,
    pub gateway_url: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { gateway_api_key: None, gateway_url: DEFAULT_GATEWAY_URL.to_string(), port: 8080 }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment. A missing key is not
    /// an error here; each analysis request reports it instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            gateway_api_key: lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()),
            gateway_url: lookup("AI_GATEWAY_URL").filter(|u| !u.is_empty()).unwrap_or(defaults.gateway_url),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.gateway_api_key = Some(key.into());
        self
    }

    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Short prefix of the key for startup logs.
    pub fn masked_api_key(&self) -> String {
        match &self.gateway_api_key {
            Some(key) => format!("{}...", key.chars().take(6).collect::<String>()),
            None => "<unset>".to_string(),
        }
    }
}
