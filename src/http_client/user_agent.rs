//! User agent handling for outbound requests.

/// Default user agent. Nominatim and Overpass both reject anonymous clients.
pub const USER_AGENT: &str = "CareLink/0.1 (healthcare marketplace; facility lookup)";

/// Resolve user agent from config value.
/// - None or empty => default CareLink user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config.map(str::trim) {
        None | Some("") => USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}
