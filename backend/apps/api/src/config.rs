//! Server configuration from the environment

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use auth::{AuthConfig, StoreConfig};
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";

/// Everything the binary reads at startup
#[derive(Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_origins: Vec<String>,
    /// Built front-end to serve next to the API
    pub static_dir: Option<PathBuf>,
    pub store: StoreConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let static_dir = env::var("STATIC_DIR").ok().map(PathBuf::from);

        let mut store = StoreConfig::default();
        if let Ok(url) = env::var("DATABASE_URL") {
            store.database_url = url;
        }
        if let Ok(raw) = env::var("DATABASE_MAX_CONNECTIONS") {
            store.max_connections = raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?;
        }
        if let Ok(raw) = env::var("DATABASE_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("DATABASE_TIMEOUT_SECS is not a number: {raw}"))?;
            store.acquire_timeout = Duration::from_secs(secs);
            store.operation_timeout = Duration::from_secs(secs);
        }

        let mut auth = AuthConfig::default();
        if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
            let pepper = general_purpose::STANDARD
                .decode(pepper_b64.trim())
                .context("PASSWORD_PEPPER must be base64")?;
            auth = auth.with_pepper(pepper);
        }

        Ok(Self {
            port,
            frontend_origins,
            static_dir,
            store,
            auth,
        })
    }
}
