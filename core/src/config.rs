//! Runtime configuration for the client and the coordinator.
//!
//! Both structs have defaults matching the public jsonplaceholder service and
//! can be overridden from the environment (`POSTS_BASE_URL`,
//! `POSTS_BACK_NAVIGATION`). Hosts with their own config layer construct the
//! structs directly.

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const BASE_URL_ENV: &str = "POSTS_BASE_URL";
pub const BACK_NAVIGATION_ENV: &str = "POSTS_BACK_NAVIGATION";

/// Where the posts API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self {
                base_url: url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// Behavior switches for `ViewCoordinator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinatorConfig {
    /// Allow the Detail -> List transition. Off by default: the list/detail
    /// flow is single-use unless a host opts in.
    pub back_navigation: bool,
}

impl CoordinatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let back_navigation = lookup(BACK_NAVIGATION_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { back_navigation }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_defaults_to_jsonplaceholder() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn client_reads_base_url_override() {
        let config = ClientConfig::from_lookup(|key| {
            (key == BASE_URL_ENV).then(|| " http://127.0.0.1:3000 ".to_string())
        });
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn back_navigation_is_off_by_default() {
        assert!(!CoordinatorConfig::from_lookup(|_| None).back_navigation);
        assert!(!CoordinatorConfig::default().back_navigation);
    }

    #[test]
    fn back_navigation_flag_values() {
        for (raw, expected) in [("1", true), ("TRUE", true), ("on", true), ("0", false), ("nope", false)] {
            let config = CoordinatorConfig::from_lookup(|_| Some(raw.to_string()));
            assert_eq!(config.back_navigation, expected, "{raw}");
        }
    }
}
