//! Configuration management for cloudctl
//!
//! The configuration file holds a set of named contexts, each pointing at an
//! API endpoint together with the token to use for it. It is read from the
//! path in `CLOUDCTL_CONFIG` or from `~/.config/cloudctl/config.yaml`.
//!
//! ```yaml
//! currentContext: prod
//! contexts:
//!   prod:
//!     url: https://api.example.com
//!     token: ${CLOUDCTL_PROD_TOKEN}
//!   dev:
//!     url: http://localhost:8080
//! ```
//!
//! The file is stored as written. When a context is resolved, its values
//! support environment variable expansion:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset

use anyhow::Context as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};
use thiserror::Error;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "CLOUDCTL_CONFIG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("context '{0}' is not defined in the configuration")]
    UnknownContext(String),

    #[error("no API URL configured: pass --api-url, set CLOUDCTL_URL or define a context")]
    MissingUrl,
}

/// Contents of the configuration file
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Context used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Named API endpoints
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextConfig>,
}

/// One API endpoint with its credentials
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Endpoint and token after merging flags, environment and file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub name: Option<String>,
    pub url: String,
    pub token: Option<String>,
}

impl Config {
    /// Resolve the effective endpoint.
    ///
    /// Explicit `url`/`token` (from flags or their env vars) override the
    /// values of the selected context. The context is `name` if given,
    /// otherwise `currentContext`. Placeholders in the context values are
    /// expanded here, never in the stored file.
    pub fn resolve(
        &self,
        name: Option<&str>,
        url: Option<&str>,
        token: Option<&str>,
    ) -> Result<ResolvedContext, ConfigError> {
        let selected = name.or(self.current_context.as_deref());
        let ctx = match selected {
            Some(n) => match self.contexts.get(n) {
                Some(ctx) => Some(ctx),
                // a dangling currentContext is fine as long as the flags are complete
                None if name.is_some() || url.is_none() => {
                    return Err(ConfigError::UnknownContext(n.to_string()))
                }
                None => None,
            },
            None => None,
        };

        let url = url
            .map(str::to_string)
            .or_else(|| ctx.map(|c| expand_env_placeholders(&c.url)))
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        let token = token
            .map(str::to_string)
            .or_else(|| ctx.and_then(|c| c.token.as_deref().map(expand_env_placeholders)))
            .filter(|t| !t.is_empty());

        Ok(ResolvedContext {
            name: ctx.and(selected.map(str::to_string)),
            url,
            token,
        })
    }
}

pub fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("cloudctl/config.yaml");
            p
        })
}

/// Load the configuration, returning an empty one if the file is missing.
///
/// `${VAR}` placeholders are kept verbatim so the result can be saved back
/// without writing secrets to disk.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    let cfg: Config = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing configuration {}", path.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(cfg)?;
    fs::write(path, data).with_context(|| format!("writing configuration {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved configuration");
    Ok(())
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?-)([^}]*))?\}")
            .unwrap_or_else(|e| unreachable!("placeholder pattern is valid: {e}"))
    })
}

pub fn expand_env_placeholders(input: &str) -> String {
    placeholder_regex()
        .replace_all(input, |caps: &regex::Captures| {
            let var = env::var(&caps[1]).ok();
            let op = caps.get(2).map_or("", |m| m.as_str());
            let default = caps.get(3).map_or("", |m| m.as_str());

            match (var, op) {
                (Some(v), "") => v,
                (Some(v), ":-") if !v.is_empty() => v,
                (Some(v), "-") => v,
                (_, ":-") | (None, "-") => default.to_string(),
                _ => String::new(),
            }
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut contexts = BTreeMap::new();
        contexts.insert(
            "prod".to_string(),
            ContextConfig {
                url: "https://api.example.com".to_string(),
                token: Some("prod-token".to_string()),
            },
        );
        contexts.insert(
            "dev".to_string(),
            ContextConfig {
                url: "http://localhost:8080".to_string(),
                token: None,
            },
        );
        Config {
            current_context: Some("prod".to_string()),
            contexts,
        }
    }

    #[test]
    fn test_resolve_current_context() {
        let ctx = sample().resolve(None, None, None).unwrap();
        assert_eq!(ctx.name.as_deref(), Some("prod"));
        assert_eq!(ctx.url, "https://api.example.com");
        assert_eq!(ctx.token.as_deref(), Some("prod-token"));
    }

    #[test]
    fn test_resolve_named_context() {
        let ctx = sample().resolve(Some("dev"), None, None).unwrap();
        assert_eq!(ctx.url, "http://localhost:8080");
        assert_eq!(ctx.token, None);
    }

    #[test]
    fn test_flags_override_context() {
        let ctx = sample()
            .resolve(None, Some("http://other"), Some("t"))
            .unwrap();
        assert_eq!(ctx.url, "http://other");
        assert_eq!(ctx.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_unknown_context() {
        let err = sample().resolve(Some("staging"), None, None).unwrap_err();
        assert_eq!(err, ConfigError::UnknownContext("staging".to_string()));
    }

    #[test]
    fn test_missing_url() {
        let err = Config::default().resolve(None, None, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingUrl);
    }

    #[test]
    fn test_resolve_expands_placeholders() {
        env::set_var("CLOUDCTL_TEST_RESOLVE_TOKEN", "from-env");
        let mut cfg = sample();
        cfg.contexts.insert(
            "env".to_string(),
            ContextConfig {
                url: "${CLOUDCTL_TEST_RESOLVE_URL:-http://fallback}".to_string(),
                token: Some("${CLOUDCTL_TEST_RESOLVE_TOKEN}".to_string()),
            },
        );
        let ctx = cfg.resolve(Some("env"), None, None).unwrap();
        assert_eq!(ctx.url, "http://fallback");
        assert_eq!(ctx.token.as_deref(), Some("from-env"));
        // the stored value is untouched
        assert_eq!(
            cfg.contexts["env"].token.as_deref(),
            Some("${CLOUDCTL_TEST_RESOLVE_TOKEN}")
        );
    }

    #[test]
    fn test_load_keeps_placeholders() {
        env::set_var("CLOUDCTL_TEST_LOAD_TOKEN", "s3cr3t");
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "contexts:\n  prod:\n    url: https://api.example.com\n    token: ${CLOUDCTL_TEST_LOAD_TOKEN}\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(
            cfg.contexts["prod"].token.as_deref(),
            Some("${CLOUDCTL_TEST_LOAD_TOKEN}")
        );
        save_config(&cfg, &path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("${CLOUDCTL_TEST_LOAD_TOKEN}"), "{raw}");
        assert!(!raw.contains("s3cr3t"), "{raw}");
    }

    #[test]
    fn test_expand_env_placeholders() {
        env::set_var("CLOUDCTL_TEST_TOKEN", "secret");
        env::remove_var("CLOUDCTL_TEST_UNSET");
        assert_eq!(
            expand_env_placeholders("token: ${CLOUDCTL_TEST_TOKEN}"),
            "token: secret"
        );
        assert_eq!(
            expand_env_placeholders("url: ${CLOUDCTL_TEST_UNSET:-http://localhost}"),
            "url: http://localhost"
        );
        assert_eq!(expand_env_placeholders("x: ${CLOUDCTL_TEST_UNSET}"), "x: ");
    }
}
