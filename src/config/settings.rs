use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub preferences: PreferencesConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Currency assumed for callers that have not set the `currency` cookie.
    pub default_currency: String,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        // App config
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "spendlens".to_string());
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Server config
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parse_server_port(&env::var("SERVER_PORT").unwrap_or_else(|_| "8080".to_string()))?;

        // CORS origins
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        // Server URL
        let server_url = env::var("SERVER_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

        // Display preferences
        let default_currency = env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "USD".to_string());

        Ok(AppSettings {
            app: AppConfig {
                name: app_name,
                environment,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
                cors_origins,
                url: server_url,
            },
            preferences: PreferencesConfig { default_currency },
        })
    }
}

fn parse_server_port(raw: &str) -> Result<u16, AppError> {
    raw.parse::<u16>()
        .map_err(|_| AppError::Configuration("SERVER_PORT must be a valid port number".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_port_is_configuration_error() {
        // Tested through the parse helper so no test mutates process-wide
        // environment variables.
        let err = parse_server_port("eighty-eighty").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("SERVER_PORT"));

        assert_eq!(parse_server_port("8080").unwrap(), 8080);
    }

    #[test]
    fn test_settings_have_sane_defaults() {
        // No required variables: an empty environment must still produce a
        // usable config.
        let settings = AppSettings::from_env().unwrap();
        assert_eq!(settings.preferences.default_currency, "USD");
        assert!(!settings.server.cors_origins.is_empty());
    }
}
