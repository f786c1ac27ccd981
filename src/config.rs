use log::warn;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 200;

pub const ADDR_VAR: &str = "NOTES_VIEWER_ADDR";
pub const MAX_UPLOAD_VAR: &str = "NOTES_VIEWER_MAX_UPLOAD_MB";

/// Server settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: default_addr(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl ServerConfig {
    /// Resolve settings from the process arguments and environment.
    pub fn from_env() -> Self {
        let args: Vec<String> = env::args().collect();
        Self::from_sources(&args, |key| env::var(key).ok())
    }

    /// Resolve settings from explicit sources
    ///
    /// The bind address comes from the first positional argument, then the
    /// `NOTES_VIEWER_ADDR` variable, then `127.0.0.1:3000`. The upload limit
    /// comes from `NOTES_VIEWER_MAX_UPLOAD_MB`. Invalid values are logged and
    /// replaced by the defaults.
    ///
    /// # Arguments
    /// * `args` - Command line, including the program name
    /// * `lookup` - Environment lookup
    pub fn from_sources(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ServerConfig::default();

        let addr = args.get(1).cloned().or_else(|| lookup(ADDR_VAR));
        if let Some(addr) = addr {
            match addr.parse() {
                Ok(parsed) => config.addr = parsed,
                Err(_) => warn!("Invalid bind address '{}', using {}", addr, DEFAULT_ADDR),
            }
        }

        if let Some(limit) = lookup(MAX_UPLOAD_VAR) {
            let bytes = limit
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|mb| *mb > 0)
                .and_then(|mb| mb.checked_mul(1024 * 1024));
            match bytes {
                Some(bytes) => config.max_upload_bytes = bytes,
                None => warn!(
                    "Invalid {} '{}', using {} MB",
                    MAX_UPLOAD_VAR, limit, DEFAULT_MAX_UPLOAD_MB
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let config = ServerConfig::from_sources(&args(&["notes-viewer"]), vars(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.max_upload_bytes, 200 * 1024 * 1024);
    }

    #[test]
    fn argument_beats_environment() {
        let config = ServerConfig::from_sources(
            &args(&["notes-viewer", "0.0.0.0:8080"]),
            vars(&[(ADDR_VAR, "127.0.0.1:9000")]),
        );
        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn environment_sets_address_and_limit() {
        let config = ServerConfig::from_sources(
            &args(&["notes-viewer"]),
            vars(&[(ADDR_VAR, "127.0.0.1:9000"), (MAX_UPLOAD_VAR, "5")]),
        );
        assert_eq!(config.addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ServerConfig::from_sources(
            &args(&["notes-viewer", "not-an-address"]),
            vars(&[(MAX_UPLOAD_VAR, "lots")]),
        );
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn oversized_limit_falls_back_to_default() {
        let huge = (usize::MAX / 1024).to_string();
        for limit in [huge.as_str(), "0"] {
            let config = ServerConfig::from_sources(
                &args(&["notes-viewer"]),
                vars(&[(MAX_UPLOAD_VAR, limit)]),
            );
            assert_eq!(config.max_upload_bytes, ServerConfig::default().max_upload_bytes);
        }
    }
}
