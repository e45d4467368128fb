use crate::constants::{
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TRACKER_BASE_URL, DEFAULT_TRACKER_TIMEOUT,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub tracker: TrackerApiConfig,
    pub server: ServerConfig,
}

/// Remote tracking backend every session client is bound to.
#[derive(Debug, Deserialize, Clone)]
pub struct TrackerApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"tracker\":{},\"server\":{}}}",
            self.tracker, self.server
        )
    }
}

impl fmt::Display for TrackerApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"host\":\"{}\",\"port\":{}}}", self.host, self.port)
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            tracker: TrackerApiConfig {
                base_url: get_env_or_default(
                    "TRACKER_BASE_URL",
                    String::from(DEFAULT_TRACKER_BASE_URL),
                ),
                timeout: get_env_or_default("TRACKER_TIMEOUT", DEFAULT_TRACKER_TIMEOUT),
            },
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", String::from(DEFAULT_SERVER_HOST)),
                port: get_env_or_default("SERVER_PORT", DEFAULT_SERVER_PORT),
            },
        }
    }
}
