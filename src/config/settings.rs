//! Resolved runtime settings.

use std::path::PathBuf;

use crate::currency::{DEFAULT_IP_GEOLOCATION_URL, DEFAULT_REVERSE_GEOCODE_URL};
use crate::facilities::{DEFAULT_OVERPASS_URL, DEFAULT_PLACES_BASE_URL};

/// Environment variable holding the Google Maps API key.
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the API server binds to.
    pub host: String,
    /// Port the API server listens on.
    pub port: u16,
    /// Google Maps API key. The Places endpoints answer 500 without it.
    pub google_maps_api_key: Option<String>,
    /// Currency preference file. None keeps the preference in memory.
    pub preferences_path: Option<PathBuf>,
    /// User agent for outbound requests.
    pub user_agent: Option<String>,
    /// Google Places web service root.
    pub places_base_url: String,
    /// Overpass interpreter endpoint.
    pub overpass_url: String,
    /// Client-side bound on Overpass requests, in seconds.
    pub overpass_timeout_secs: u64,
    /// Reverse-IP geolocation endpoint.
    pub ip_geolocation_url: String,
    /// Reverse-geocoding endpoint.
    pub reverse_geocode_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            google_maps_api_key: None,
            preferences_path: default_preferences_path(),
            user_agent: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            overpass_timeout_secs: 30,
            ip_geolocation_url: DEFAULT_IP_GEOLOCATION_URL.to_string(),
            reverse_geocode_url: DEFAULT_REVERSE_GEOCODE_URL.to_string(),
        }
    }
}

/// `~/.config/carelink/preferences.json`, when a config dir exists.
fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carelink").join("preferences.json"))
}

impl Settings {
    /// Apply environment variable overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = get(GOOGLE_MAPS_API_KEY_ENV) {
            self.google_maps_api_key = Some(key);
        }
        if let Some(host) = get("CARELINK_HOST") {
            self.host = host;
        }
        if let Some(port) = get("CARELINK_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid CARELINK_PORT: {}", port),
            }
        }
        if let Some(path) = get("CARELINK_PREFERENCES") {
            self.preferences_path = if path == "memory" {
                None
            } else {
                Some(PathBuf::from(shellexpand::tilde(&path).into_owned()))
            };
        }
        if let Some(ua) = get("CARELINK_USER_AGENT") {
            self.user_agent = Some(ua);
        }
        if let Some(url) = get("CARELINK_OVERPASS_URL") {
            self.overpass_url = url;
        }
        self
    }

    /// Whether the Google Places endpoints can be served.
    pub fn has_places_key(&self) -> bool {
        self.google_maps_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::default().with_overrides_from(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_have_no_places_key() {
        let settings = overrides(&[]);
        assert!(!settings.has_places_key());
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.overpass_url, DEFAULT_OVERPASS_URL);
    }

    #[test]
    fn env_sets_key_and_port() {
        let settings = overrides(&[(GOOGLE_MAPS_API_KEY_ENV, "abc"), ("CARELINK_PORT", "8080")]);
        assert!(settings.has_places_key());
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn blank_key_is_ignored() {
        let settings = overrides(&[(GOOGLE_MAPS_API_KEY_ENV, "   ")]);
        assert!(!settings.has_places_key());
    }

    #[test]
    fn invalid_port_keeps_default() {
        assert_eq!(overrides(&[("CARELINK_PORT", "http")]).port, 3000);
    }

    #[test]
    fn memory_preferences() {
        let settings = overrides(&[("CARELINK_PREFERENCES", "memory")]);
        assert!(settings.preferences_path.is_none());
        let settings = overrides(&[("CARELINK_PREFERENCES", "/tmp/prefs.json")]);
        assert_eq!(settings.preferences_path, Some(PathBuf::from("/tmp/prefs.json")));
    }
}
