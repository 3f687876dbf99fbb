use std::{env, fmt};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "triptales";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => {
                write!(f, "{} has an invalid value: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings read from the environment (and `.env` in debug builds).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub jwt_secret: String,
    /// Base used for share links. Falls back to the request's scheme and host.
    pub public_base_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw.clone()))?,
            Err(_) => PORT,
        };
        let mongo_uri = env::var("MONGODB_URI").map_err(|_| ConfigError::Missing("MONGODB_URI"))?;
        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| DATABASE.to_string());
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        if let Some(base) = &public_base_url {
            url::Url::parse(base)
                .map_err(|_| ConfigError::Invalid("PUBLIC_BASE_URL", base.clone()))?;
        }

        Ok(Self {
            host,
            port,
            mongo_uri,
            database,
            jwt_secret,
            public_base_url,
        })
    }

    /// Settings for in-process use where no Mongo connection is made.
    pub fn local(jwt_secret: &str) -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: String::new(),
            database: DATABASE.to_string(),
            jwt_secret: jwt_secret.to_string(),
            public_base_url: None,
        }
    }
}
