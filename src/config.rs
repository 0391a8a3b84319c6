use actix_web::http::Uri;
use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Unset means records live in process memory only.
    pub database_url: Option<String>,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    pub api_prefix: String,

    // Rate limiting, 0 disables it
    pub rate_per_min: u32,

    pub environment: String,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: None,
            allowed_origins: Vec::new(),
            api_prefix: "/api".to_string(),
            rate_per_min: 1000,
            environment: "development".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

/// An origin is `scheme://host[:port]` with an http(s) scheme and nothing after it.
fn parse_origin(origin: &str) -> Result<String> {
    let uri: Uri = origin
        .parse()
        .with_context(|| format!("ALLOWED_ORIGINS has an invalid origin: {:?}", origin))?;

    let is_http = matches!(uri.scheme_str(), Some("http" | "https"));
    let bare = uri.path() == "/" && uri.query().is_none() && !origin.ends_with('/');
    if !is_http || uri.host().is_none() || !bare {
        bail!(
            "ALLOWED_ORIGINS has an invalid origin: {:?} (expected scheme://host[:port])",
            origin
        );
    }
    Ok(origin.to_string())
}

fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(parse_origin)
        .collect()
}

impl Config {
    /// Read settings from the environment; `.env` should already be loaded.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            allowed_origins: match env::var("ALLOWED_ORIGINS") {
                Ok(raw) => parse_origins(&raw)?,
                Err(_) => Vec::new(),
            },
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_per_min: parse_var("RATE_PER_MIN", defaults.rate_per_min)?,
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
