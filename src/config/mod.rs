use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_max_pool_size: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub seed_endpoint_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            mongodb_uri: env::var("MONGODB_URI")?,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "dashboard".to_string()),
            mongodb_max_pool_size: env::var("MONGODB_MAX_POOL_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            seed_endpoint_enabled: env::var("SEED_ENDPOINT_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

/// Interpret common truthy spellings; anything else is false.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
