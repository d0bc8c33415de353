//! read retry configuration from a file or the environment

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::Error;
use crate::retry::{ExponentialBackoff, RetryPolicy};

pub enum ConfigLocation {
    File(String),
    Env,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub multiplier: f64,
    pub jitter_fraction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            multiplier: 2.0,
            jitter_fraction: 0.1,
        }
    }
}

impl Config {
    pub fn from_values(
        max_attempts: u32,
        initial_backoff_ms: u64,
        max_backoff_ms: u64,
        multiplier: f64,
        jitter_fraction: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff_ms,
            max_backoff_ms,
            multiplier,
            jitter_fraction,
        }
    }

    pub fn from_file(path: &str) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn from_env() -> Result<Self, Error> {
        let defaults = Self::default();
        Ok(Self {
            max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            initial_backoff_ms: env_or("RETRY_INITIAL_BACKOFF_MS", defaults.initial_backoff_ms)?,
            max_backoff_ms: env_or("RETRY_MAX_BACKOFF_MS", defaults.max_backoff_ms)?,
            multiplier: env_or("RETRY_MULTIPLIER", defaults.multiplier)?,
            jitter_fraction: env_or("RETRY_JITTER_FRACTION", defaults.jitter_fraction)?,
        })
    }

    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
            self.multiplier,
            self.jitter_fraction,
        )
    }

    pub fn into_policy(self) -> RetryPolicy {
        RetryPolicy::exponential(self.max_attempts, self.backoff())
    }
}

pub fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    match loc {
        ConfigLocation::File(path) => Config::from_file(&path),
        ConfigLocation::Env => Config::from_env(),
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(Error::Config(format!("Unreadable {key} env var: {e}"))),
    }
}
