//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign access tokens
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl JwtConfig {
    /// Create a JWT configuration with a specific secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Whether the secret is still the development default
    pub fn uses_default_secret(&self) -> bool {
        self.secret == default_secret()
    }
}

fn default_secret() -> String {
    String::from("development-only-otp-secret")
}

fn default_token_ttl_seconds() -> i64 {
    86_400 // 24 hours
}
