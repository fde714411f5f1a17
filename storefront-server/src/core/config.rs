//! Server configuration
//!
//! All settings are overridable via environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 5000 | HTTP API port |
//! | DATA_DIR | ./data | Embedded database directory |
//! | LOG_DIR | (unset) | Optional directory for rolling log files |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | JWT_SECRET | (dev fallback) | Shared HS256 secret |
//! | GATEWAY_KEY_ID | (empty) | Payment gateway key id |
//! | GATEWAY_KEY_SECRET | (empty) | Payment gateway key secret |
//! | GATEWAY_API_BASE | https://api.razorpay.com/v1 | Gateway REST base URL |
//! | GATEWAY_CURRENCY | USD | Default checkout currency |
//! | GATEWAY_TIMEOUT_MS | 30000 | Gateway request timeout |

use crate::auth::JwtConfig;

/// Payment gateway settings. The key secret is carried here and passed
/// explicitly into the verification flow; nothing reads it from the
/// ambient environment at call time.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub api_base: String,
    pub currency: String,
    pub request_timeout_ms: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            key_id: std::env::var("GATEWAY_KEY_ID").unwrap_or_default(),
            key_secret: std::env::var("GATEWAY_KEY_SECRET").unwrap_or_default(),
            api_base: std::env::var("GATEWAY_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into()),
            currency: std::env::var("GATEWAY_CURRENCY").unwrap_or_else(|_| "USD".into()),
            request_timeout_ms: std::env::var("GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Embedded database directory
    pub data_dir: String,
    /// Optional rolling log file directory
    pub log_dir: Option<String>,
    /// JWT validation configuration
    pub jwt: JwtConfig,
    /// Payment gateway configuration
    pub gateway: GatewayConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults where unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env(),
            gateway: GatewayConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
