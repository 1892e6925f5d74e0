//! Configuration management for CareLink using the prefer crate.
//!
//! Precedence, lowest first: built-in defaults, config file, environment,
//! command-line flags.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use settings::{Settings, GOOGLE_MAPS_API_KEY_ENV};

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Prefer the environment for this; accepted here for local setups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_api_key: Option<String>,
    /// Preference file path, or "memory".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overpass_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overpass_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_geolocation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_geocode_url: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover and load a `carelink` config file from the standard locations.
    /// Falls back to an empty config when none is found or it fails to parse.
    pub async fn load() -> Self {
        match prefer::load("carelink").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path (TOML or JSON by extension).
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, String> {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("json") {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(ref key) = self.google_maps_api_key {
            settings.google_maps_api_key = Some(key.clone());
        }
        if let Some(ref prefs) = self.preferences {
            settings.preferences_path = if prefs == "memory" {
                None
            } else {
                Some(self.resolve_path(prefs))
            };
        }
        if let Some(ref ua) = self.user_agent {
            settings.user_agent = Some(ua.clone());
        }
        if let Some(ref url) = self.places_base_url {
            settings.places_base_url = url.clone();
        }
        if let Some(ref url) = self.overpass_url {
            settings.overpass_url = url.clone();
        }
        if let Some(secs) = self.overpass_timeout_secs {
            settings.overpass_timeout_secs = secs;
        }
        if let Some(ref url) = self.ip_geolocation_url {
            settings.ip_geolocation_url = url.clone();
        }
        if let Some(ref url) = self.reverse_geocode_url {
            settings.reverse_geocode_url = url.clone();
        }
    }

    /// Resolve a path relative to the config file's directory.
    /// Absolute and `~/` paths are returned expanded.
    pub fn resolve_path(&self, path_str: &str) -> PathBuf {
        let path = PathBuf::from(shellexpand::tilde(path_str).into_owned());
        if path.is_absolute() {
            return path;
        }
        match self.source_path.as_ref().and_then(|p| p.parent()) {
            Some(base) => base.join(path),
            None => path,
        }
    }
}

/// Defaults, then the discovered config file, then the environment.
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings.with_env_overrides()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toml_config() {
        let config = Config::parse(
            "port = 8081\noverpass_url = \"http://localhost:12345/api\"\npreferences = \"memory\"\n",
            Path::new("carelink.toml"),
        )
        .unwrap();
        assert_eq!(config.port, Some(8081));

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.port, 8081);
        assert_eq!(settings.overpass_url, "http://localhost:12345/api");
        assert!(settings.preferences_path.is_none());
    }

    #[test]
    fn parse_json_config() {
        let config =
            Config::parse(r#"{"host": "0.0.0.0"}"#, Path::new("carelink.json")).unwrap();
        assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = Config::parse("port = \"nope\"", Path::new("carelink.toml")).unwrap_err();
        assert!(err.starts_with("Failed to parse TOML config"));
    }

    #[test]
    fn relative_paths_follow_config_file() {
        let config = Config {
            source_path: Some(PathBuf::from("/etc/carelink/carelink.toml")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_path("prefs.json"),
            PathBuf::from("/etc/carelink/prefs.json")
        );
        assert_eq!(config.resolve_path("/var/prefs.json"), PathBuf::from("/var/prefs.json"));
    }

    #[tokio::test]
    async fn load_from_path_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carelink.toml");
        std::fs::write(&path, "port = 9000\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.port, Some(9000));
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }
}
