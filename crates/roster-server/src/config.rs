use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub db_readers: usize,
    pub worker_threads: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            host: lookup("ROSTER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "ROSTER_PORT", 3000)?,
            db_path: lookup("ROSTER_DB_PATH")
                .unwrap_or_else(|| "roster.db".into())
                .into(),
            db_readers: parse_or(&lookup, "ROSTER_DB_READERS", 4)?,
            worker_threads: parse_or(&lookup, "ROSTER_WORKER_THREADS", 8)?,
        };

        if config.worker_threads == 0 {
            bail!("ROSTER_WORKER_THREADS must be at least 1");
        }
        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}
