use secrecy::SecretString;
use std::env;

/// Compiled-in development fallback. Anything deployed with this secret can
/// have its tokens forged; `validate_for_production` refuses to start with it.
const DEFAULT_TOKEN_SECRET: &str = "academy-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub token_secret: SecretString,
    pub token_expiry_hours: i64,
    pub upload_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "academy-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            token_secret: SecretString::from(
                env::var("TOKEN_SECRET").unwrap_or_else(|_| DEFAULT_TOKEN_SECRET.to_string()),
            ),
            // Tokens are valid for a fixed 7 days.
            token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(168),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
        }
    }

    /// Validate that production-critical configuration is set.
    /// Panics if the signing secret is still the compiled-in default.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let secret = self.token_secret.expose_secret();

        if secret == DEFAULT_TOKEN_SECRET {
            panic!(
                "FATAL: TOKEN_SECRET is using the default value! Set TOKEN_SECRET to a secure random string."
            );
        }

        if secret.len() < 32 {
            panic!(
                "FATAL: TOKEN_SECRET is too short ({}). Must be at least 32 characters.",
                secret.len()
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "academy-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            token_secret: SecretString::from("test_token_secret_key".to_string()),
            token_expiry_hours: 168,
            upload_dir: std::env::temp_dir()
                .join("academy-test-uploads")
                .to_string_lossy()
                .into_owned(),
        }
    }
}
