//! Runtime configuration from environment variables.
//!
//! | Variable            | Default                                                    |
//! |---------------------|------------------------------------------------------------|
//! | `PORT`              | 3000                                                       |
//! | `NOMINATIM_URL`     | https://nominatim.openstreetmap.org/search                 |
//! | `SOILGRIDS_URL`     | https://rest.isric.org/soilgrids/v2.0/properties/query     |
//! | `SOILGRIDS_ALT_URL` | https://rest.soilgrids.org/soilgrids/v2.0/properties/query |
//! | `HTTP_TIMEOUT_SECS` | 20                                                         |
//! | `CACHE_TTL_SECS`    | 300                                                        |
//! | `USER_AGENT`        | soil_intel/<version>                                       |

use std::time::Duration;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_SOILGRIDS_URL: &str = "https://rest.isric.org/soilgrids/v2.0/properties/query";
pub const DEFAULT_SOILGRIDS_ALT_URL: &str =
    "https://rest.soilgrids.org/soilgrids/v2.0/properties/query";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub nominatim_url: String,
    pub soilgrids_url: String,
    pub soilgrids_alt_url: String,
    pub http_timeout: Duration,
    pub cache_ttl: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            soilgrids_url: DEFAULT_SOILGRIDS_URL.to_string(),
            soilgrids_alt_url: DEFAULT_SOILGRIDS_ALT_URL.to_string(),
            http_timeout: Duration::from_secs(20),
            cache_ttl: Duration::from_secs(300),
            user_agent: format!("soil_intel/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            nominatim_url: text("NOMINATIM_URL", defaults.nominatim_url),
            soilgrids_url: text("SOILGRIDS_URL", defaults.soilgrids_url),
            soilgrids_alt_url: text("SOILGRIDS_ALT_URL", defaults.soilgrids_alt_url),
            http_timeout: secs("HTTP_TIMEOUT_SECS", defaults.http_timeout),
            cache_ttl: secs("CACHE_TTL_SECS", defaults.cache_ttl),
            user_agent: text("USER_AGENT", defaults.user_agent),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  NOMINATIM_URL: {}", self.nominatim_url);
        tracing::info!("  SOILGRIDS_URL: {}", self.soilgrids_url);
        tracing::info!("  SOILGRIDS_ALT_URL: {}", self.soilgrids_alt_url);
        tracing::info!("  HTTP_TIMEOUT_SECS: {}", self.http_timeout.as_secs());
        tracing::info!("  CACHE_TTL_SECS: {}", self.cache_ttl.as_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("SOILGRIDS_URL", "http://127.0.0.1:9000/query"),
            ("CACHE_TTL_SECS", "60"),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.soilgrids_url, "http://127.0.0.1:9000/query");
        assert_eq!(cfg.cache_ttl, Duration::from_secs(60));
        assert_eq!(cfg.nominatim_url, DEFAULT_NOMINATIM_URL);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("HTTP_TIMEOUT_SECS", "-5"),
            ("CACHE_TTL_SECS", "0"),
            ("USER_AGENT", "   "),
        ]));
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.http_timeout, Duration::from_secs(20));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(300));
        assert!(cfg.user_agent.starts_with("soil_intel/"));
    }
}
