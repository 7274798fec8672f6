//! Environment configuration
//!
//! All configuration is supplied out-of-process. A missing `MONGO_URI` is
//! logged at error severity but does not halt startup: the service runs
//! in degraded mode and every store operation fails until it is
//! configured.

use crate::upload::CloudinaryCredentials;

/// Default listen port when `PORT` is unset.
const DEFAULT_PORT: u16 = 3002;

/// Default database name when `MONGO_DATABASE` is unset.
const DEFAULT_DATABASE: &str = "menu_service";

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (`MONGO_URI`)
    pub mongo_uri: Option<String>,

    /// Database name (`MONGO_DATABASE`)
    pub mongo_database: String,

    /// Listen port (`PORT`)
    pub port: u16,

    /// Image provider credentials (`CLOUDINARY_CLOUD_NAME`,
    /// `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`); uploads fail when
    /// any of the three is absent
    pub cloudinary: Option<CloudinaryCredentials>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let mongo_uri = env_var("MONGO_URI");
        if mongo_uri.is_none() {
            tracing::error!("MONGO_URI is not set; all database operations will fail");
        }

        let cloudinary = match (
            env_var("CLOUDINARY_CLOUD_NAME"),
            env_var("CLOUDINARY_API_KEY"),
            env_var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => {
                tracing::warn!("Cloudinary credentials are not fully set; image uploads will fail");
                None
            }
        };

        Self {
            mongo_uri,
            mongo_database: env_var("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into()),
            port: parse_port(env_var("PORT")),
            cloudinary,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_port(value: Option<String>) -> u16 {
    value
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
