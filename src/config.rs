use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_WEBHOOK_SECRET: &str = "whsec_dev";
pub const DEFAULT_UNLOCK_PASSCODE: &str = "DMTUTOR070207";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub unlock_passcode: SecretString,
    pub payment_webhook_secret: SecretString,
    pub payment_webhook_tolerance_secs: i64,
    /// Question generation is disabled when no key is set.
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub question_bank_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "permit-tutor-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            unlock_passcode: SecretString::from(
                env::var("UNLOCK_PASSCODE").unwrap_or_else(|_| DEFAULT_UNLOCK_PASSCODE.to_string()),
            ),
            payment_webhook_secret: SecretString::from(
                env::var("PAYMENT_WEBHOOK_SECRET")
                    .unwrap_or_else(|_| DEFAULT_WEBHOOK_SECRET.to_string()),
            ),
            payment_webhook_tolerance_secs: env::var("PAYMENT_WEBHOOK_TOLERANCE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            question_bank_path: env::var("QUESTION_BANK_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn question_generation_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Rejects secrets that were left at their development defaults.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ConfigurationError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ConfigurationError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if self.payment_webhook_secret.expose_secret() == DEFAULT_WEBHOOK_SECRET {
            return Err(AppError::ConfigurationError(
                "PAYMENT_WEBHOOK_SECRET is using the default value".to_string(),
            ));
        }

        if self.unlock_passcode.expose_secret().is_empty() {
            return Err(AppError::ConfigurationError(
                "UNLOCK_PASSCODE must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "permit-tutor-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            unlock_passcode: SecretString::from(DEFAULT_UNLOCK_PASSCODE.to_string()),
            payment_webhook_secret: SecretString::from("whsec_test".to_string()),
            payment_webhook_tolerance_secs: 300,
            openai_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            question_bank_path: None,
        }
    }
}
