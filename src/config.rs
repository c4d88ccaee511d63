// src/config.rs

use anyhow::{Context, Result};
use std::{env, time::Duration};
use url::Url;

/// Runtime settings, read from the environment by the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint that receives source text and answers with diagnostics.
    pub validate_url: Url,
    pub request_timeout: Duration,
    /// Extra attempts after a transport failure. Zero means a single request.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further attempt.
    pub retry_backoff: Duration,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_url: Url::parse("http://localhost:8080/validate")
                .expect("default validation URL should parse"),
            request_timeout: Duration::from_secs(10),
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `VTL_VALIDATE_URL`, `VTL_VALIDATE_TIMEOUT_MS`,
    /// `VTL_VALIDATE_RETRIES`, `VTL_VALIDATE_BACKOFF_MS` and `LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(url) = lookup("VTL_VALIDATE_URL") {
            cfg.validate_url =
                Url::parse(&url).with_context(|| format!("parsing VTL_VALIDATE_URL {:?}", url))?;
        }
        if let Some(ms) = lookup("VTL_VALIDATE_TIMEOUT_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("parsing VTL_VALIDATE_TIMEOUT_MS {:?}", ms))?;
            cfg.request_timeout = Duration::from_millis(ms);
        }
        if let Some(n) = lookup("VTL_VALIDATE_RETRIES") {
            cfg.max_retries = n
                .parse()
                .with_context(|| format!("parsing VTL_VALIDATE_RETRIES {:?}", n))?;
        }
        if let Some(ms) = lookup("VTL_VALIDATE_BACKOFF_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("parsing VTL_VALIDATE_BACKOFF_MS {:?}", ms))?;
            cfg.retry_backoff = Duration::from_millis(ms);
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            cfg.log_filter = level;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.validate_url.as_str(), "http://localhost:8080/validate");
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.max_retries, 0);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("VTL_VALIDATE_URL", "https://vtl.example.org/api/validate"),
            ("VTL_VALIDATE_TIMEOUT_MS", "250"),
            ("VTL_VALIDATE_RETRIES", "2"),
            ("VTL_VALIDATE_BACKOFF_MS", "10"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.validate_url.host_str(), Some("vtl.example.org"));
        assert_eq!(cfg.request_timeout, Duration::from_millis(250));
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.retry_backoff, Duration::from_millis(10));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_bad_values_carry_context() {
        let err = Config::from_lookup(lookup_from(&[("VTL_VALIDATE_RETRIES", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("VTL_VALIDATE_RETRIES"));

        assert!(Config::from_lookup(lookup_from(&[("VTL_VALIDATE_URL", "not a url")])).is_err());
    }
}
