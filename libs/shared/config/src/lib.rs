use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub storage_path: String,
    pub reminder_poll_interval_secs: u64,
    pub reminder_startup_delay_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("API_URL_BASE")
                .unwrap_or_else(|_| {
                    warn!("API_URL_BASE not set, using empty value");
                    String::new()
                }),
            storage_path: env::var("CLIENT_STORAGE_PATH")
                .unwrap_or_else(|_| {
                    warn!("CLIENT_STORAGE_PATH not set, using default");
                    "cuida_facil_storage.json".to_string()
                }),
            reminder_poll_interval_secs: env::var("REMINDER_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            reminder_startup_delay_secs: env::var("REMINDER_STARTUP_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}
