use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_GROUPS_LATENCY_MS: u64 = 500;
const DEFAULT_EMPLOYEES_LATENCY_MS: u64 = 800;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    /// Simulated provider delay for `/api/employee-groups`.
    pub groups_latency: Duration,
    /// Simulated provider delay for `/api/employees`.
    pub employees_latency: Duration,
    /// Where `browse` finds the provider endpoints.
    pub directory_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:5173".into()],
            groups_latency: Duration::from_millis(DEFAULT_GROUPS_LATENCY_MS),
            employees_latency: Duration::from_millis(DEFAULT_EMPLOYEES_LATENCY_MS),
            directory_base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
                .collect::<Vec<_>>(),
            None => defaults.cors_allowed_origins,
        };

        let groups_latency = latency(&lookup, "GROUPS_LATENCY_MS")?
            .unwrap_or(defaults.groups_latency);
        let employees_latency = latency(&lookup, "EMPLOYEES_LATENCY_MS")?
            .unwrap_or(defaults.employees_latency);

        let directory_base_url = lookup("DIRECTORY_BASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.directory_base_url);

        Ok(Self {
            cors_allowed_origins,
            groups_latency,
            employees_latency,
            directory_base_url,
        })
    }
}

fn latency(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let millis = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid {key}: expected milliseconds, got `{raw}`"))?;
    Ok(Some(Duration::from_millis(millis)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.groups_latency, Duration::from_millis(500));
        assert_eq!(config.employees_latency, Duration::from_millis(800));
        assert_eq!(config.directory_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn env_overrides_are_parsed() {
        let config = config_from(&[
            ("CORS_ALLOWED_ORIGINS", "https://a.test, ,https://b.test"),
            ("GROUPS_LATENCY_MS", "0"),
            ("EMPLOYEES_LATENCY_MS", " 25 "),
            ("DIRECTORY_BASE_URL", "http://directory.internal:9000"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.test", "https://b.test"]
        );
        assert!(config.groups_latency.is_zero());
        assert_eq!(config.employees_latency, Duration::from_millis(25));
        assert_eq!(config.directory_base_url, "http://directory.internal:9000");
    }

    #[test]
    fn malformed_latency_is_an_error() {
        let err = config_from(&[("EMPLOYEES_LATENCY_MS", "slow")]).unwrap_err();
        assert!(err.to_string().contains("EMPLOYEES_LATENCY_MS"));
    }
}
