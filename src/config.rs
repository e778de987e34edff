use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_STORE_TIMEOUT_MS: &str = "2000";
const DEFAULT_JWT_SECRET: &str = "cookbook-development-secret";

#[derive(Error, Debug)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Base URL prepended to image paths in responses.
    pub public_url: String,
    /// Snapshot directory; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub recipe_seed: Option<PathBuf>,
    pub upload_dir: PathBuf,
    pub store_timeout: Duration,
    pub jwt_secret: String,
    pub google_client_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_timeout_ms: u64 = try_load(&lookup, "COOKBOOK_STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS)?;

        let jwt_secret = optional(&lookup, "JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using an insecure development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let google_client_id = optional(&lookup, "GOOGLE_CLIENT_ID");
        if google_client_id.is_none() {
            info!("GOOGLE_CLIENT_ID not set, federated sign-in disabled");
        }

        Ok(Self {
            bind_addr: try_load(&lookup, "COOKBOOK_BIND", DEFAULT_BIND)?,
            public_url: try_load::<String, _>(&lookup, "COOKBOOK_PUBLIC_URL", DEFAULT_PUBLIC_URL)?
                .trim_end_matches('/')
                .to_string(),
            data_dir: optional(&lookup, "COOKBOOK_DATA_DIR").map(PathBuf::from),
            recipe_seed: optional(&lookup, "COOKBOOK_RECIPE_SEED").map(PathBuf::from),
            upload_dir: try_load(&lookup, "COOKBOOK_UPLOAD_DIR", DEFAULT_UPLOAD_DIR)?,
            store_timeout: Duration::from_millis(store_timeout_ms),
            jwt_secret,
            google_client_id,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            data_dir: None,
            recipe_seed: None,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            store_timeout: Duration::from_millis(2000),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            google_client_id: None,
        }
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = optional(lookup, key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.public_url, "http://localhost:3000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.store_timeout, Duration::from_millis(2000));
        assert!(config.data_dir.is_none());
        assert!(config.google_client_id.is_none());
        assert!(!config.jwt_secret.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("COOKBOOK_BIND", "127.0.0.1:8080"),
            ("COOKBOOK_PUBLIC_URL", "https://recipes.example.org/"),
            ("COOKBOOK_DATA_DIR", "/var/lib/cookbook"),
            ("COOKBOOK_STORE_TIMEOUT_MS", "250"),
            ("JWT_SECRET", "s3cret"),
            ("GOOGLE_CLIENT_ID", "client.apps.googleusercontent.com"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.public_url, "https://recipes.example.org");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/cookbook")));
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(
            config.google_client_id.as_deref(),
            Some("client.apps.googleusercontent.com")
        );
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let result = Config::from_lookup(lookup(&[("COOKBOOK_STORE_TIMEOUT_MS", "soon")]));

        let error = result.unwrap_err();
        assert_eq!(error.key, "COOKBOOK_STORE_TIMEOUT_MS");
        assert_eq!(error.value, "soon");
    }
}
