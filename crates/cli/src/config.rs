// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime configuration from flags, the environment and `.env`.
//!
//! # Environment Variables
//!
//! - `BREWBOX_API_URL` - API base URL (default: `http://localhost:5196/api`)
//! - `BREWBOX_SESSION_FILE` - Session file (default: `$HOME/.brewbox/session.json`)
//! - `BREWBOX_POLL_INTERVAL_SECS` - Seconds between order polls (default: 180)
//! - `BREWBOX_HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 30)
//! - `RUST_LOG` - Log filter, overridden by `--log-level` (default: `warn`)

use std::path::PathBuf;
use std::time::Duration;

use brewbox_api::DEFAULT_API_URL;
use clap::Args;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_LOG_FILTER: &str = "warn";
const SESSION_DIR: &str = ".brewbox";
const SESSION_FILE: &str = "session.json";
const FALLBACK_SESSION_FILE: &str = ".brewbox-session.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Base URL of the BrewBox API
    #[arg(long, global = true, env = "BREWBOX_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File the session is kept in
    #[arg(long, global = true, env = "BREWBOX_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `brewbox_api=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Seconds between order polls in `watch`
    #[arg(long, global = true, env = "BREWBOX_POLL_INTERVAL_SECS", default_value_t = 180)]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "BREWBOX_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Url,
    pub session_file: PathBuf,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Resolves the configuration from parsed flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an http(s) URL or an interval
    /// is zero.
    pub fn from_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, std::env::var_os("HOME").map(PathBuf::from))
    }

    fn resolve(args: &GlobalArgs, home: Option<PathBuf>) -> Result<Self, ConfigError> {
        let api_url: Url = parse_api_url(&args.api_url)?;
        let session_file: PathBuf = args
            .session_file
            .clone()
            .unwrap_or_else(|| default_session_file(home));

        Ok(Self {
            api_url,
            session_file,
            poll_interval: positive_secs("BREWBOX_POLL_INTERVAL_SECS", args.poll_interval_secs)?,
            http_timeout: positive_secs("BREWBOX_HTTP_TIMEOUT_SECS", args.http_timeout_secs)?,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: String::from("scheme must be http or https"),
        });
    }
    Ok(url)
}

fn default_session_file(home: Option<PathBuf>) -> PathBuf {
    home.map_or_else(
        || PathBuf::from(FALLBACK_SESSION_FILE),
        |home| home.join(SESSION_DIR).join(SESSION_FILE),
    )
}

fn positive_secs(name: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            reason: String::from("must be greater than zero"),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Builds the log filter: `--log-level`, then `RUST_LOG`, then `warn`.
///
/// # Errors
///
/// Returns an error if `--log-level` is not a valid filter.
pub fn log_filter(level: Option<&str>) -> Result<EnvFilter, ConfigError> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}
