//! Server configuration.
//!
//! Settings come from an optional `config.toml`, layered over stock defaults.
//! Every key is optional; a file only needs the values it changes:
//!
//! ```toml
//! [server]
//! address = "0.0.0.0:8080"
//! ```
//!
//! Command-line flags override the file (see `main.rs`). Unknown keys are
//! rejected to catch typos early.

use crate::entry::EntryOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration, every section filled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub site: SiteInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Where entries and static assets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory of `<date>.md` files.
    pub entries_dir: PathBuf,
    /// Root for everything the router doesn't handle itself.
    pub static_dir: PathBuf,
    /// Entry list ordering.
    pub order: EntryOrder,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            entries_dir: PathBuf::from("content/daily"),
            static_dir: PathBuf::from("static"),
            order: EntryOrder::default(),
        }
    }
}

/// Site identity, shown in page chrome and used for the legacy host redirect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Appended to every page title and shown in the header.
    pub name: String,
    /// Decommissioned hostname. Any request for it is redirected permanently.
    pub legacy_host: String,
    /// Where legacy host requests are sent.
    pub canonical_origin: String,
    /// Linked from the listing page intro.
    pub repository_url: String,
    pub contact_email: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Caterpillar".to_string(),
            legacy_host: "caterpillar.deno.dev".to_string(),
            canonical_origin: "https://capi.hannobraun.com/".to_string(),
            repository_url: "https://github.com/hannobraun/caterpillar".to_string(),
            contact_email: "hello@hannobraun.com".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate values that deserialize fine but can't work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        let host = &self.site.legacy_host;
        if host.contains("://") || host.contains('/') {
            return Err(ConfigError::Validation(
                "site.legacy_host must be a bare hostname".into(),
            ));
        }
        let origin = &self.site.canonical_origin;
        if !(origin.starts_with("https://") || origin.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.canonical_origin must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }

    /// The listen address, parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "server.address is not a valid socket address: {}",
                self.server.address
            ))
        })
    }
}

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`. Tables merge key by key;
/// anything else in `overlay` replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load the config file at `path`, merged over stock defaults.
///
/// A missing file is not an error: the defaults are returned. The result is
/// not validated here, so command-line overrides can still replace bad
/// values; call [`SiteConfig::validate`] once they are applied.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: SiteConfig = merged.try_into()?;
    Ok(config)
}

/// A fully commented `config.toml` showing every key with its default.
///
/// Printed by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daily Thoughts Configuration
# ============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

[server]
# Address to listen on.
address = "127.0.0.1:8000"

[content]
# Directory of entries, one `YYYY-MM-DD.md` file per entry.
entries_dir = "content/daily"
# Static files (stylesheet, media) served for any path the router
# doesn't handle itself.
static_dir = "static"
# Entry list order:
#   "newest-first" - sorted by date, newest at the top
#   "filesystem"   - whatever order the directory listing returns
order = "newest-first"

[site]
# Shown in the page header and appended to every title.
name = "Caterpillar"
# Requests for this host are permanently redirected to canonical_origin.
legacy_host = "caterpillar.deno.dev"
canonical_origin = "https://capi.hannobraun.com/"
# Linked from the intro on the listing page.
repository_url = "https://github.com/hannobraun/caterpillar"
contact_email = "hello@hannobraun.com"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8000");
        assert_eq!(config.content.entries_dir, PathBuf::from("content/daily"));
        assert_eq!(config.content.order, EntryOrder::NewestFirst);
        assert_eq!(config.site.legacy_host, "caterpillar.deno.dev");
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.server.address, defaults.server.address);
        assert_eq!(parsed.content.entries_dir, defaults.content.entries_dir);
        assert_eq!(parsed.content.static_dir, defaults.content.static_dir);
        assert_eq!(parsed.content.order, defaults.content.order);
        assert_eq!(parsed.site.name, defaults.site.name);
        assert_eq!(parsed.site.canonical_origin, defaults.site.canonical_origin);
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
[content]
order = "filesystem"
"#,
        )
        .unwrap();
        assert_eq!(config.content.order, EntryOrder::Filesystem);
        assert_eq!(config.content.static_dir, PathBuf::from("static"));
        assert_eq!(config.site.name, "Caterpillar");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[server]
adress = "0.0.0.0:80"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn merge_keeps_unrelated_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[site]\nname = \"Notes\"").unwrap();
        let merged: SiteConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(merged.site.name, "Notes");
        assert_eq!(merged.site.legacy_host, "caterpillar.deno.dev");
        assert_eq!(merged.server.address, "127.0.0.1:8000");
    }

    #[test]
    fn load_config_without_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8000");
    }

    #[test]
    fn load_config_reads_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server]\naddress = \"0.0.0.0:9000\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server\naddress = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_leaves_bad_values_for_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server]\naddress = \"localhost\"\n").unwrap();
        let mut config = load_config(&path).unwrap();
        assert!(config.validate().is_err());

        config.server.address = "127.0.0.1:9000".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_address() {
        let mut config = SiteConfig::default();
        config.server.address = "localhost".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_legacy_host_with_scheme() {
        let mut config = SiteConfig::default();
        config.site.legacy_host = "https://caterpillar.deno.dev".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_origin_without_scheme() {
        let mut config = SiteConfig::default();
        config.site.canonical_origin = "capi.hannobraun.com".to_string();
        assert!(config.validate().is_err());
    }
}
