//! Harness configuration
//!
//! All scenario tunables live in an explicit [`HarnessConfig`] value rather
//! than inline literals. Scenario binaries take no arguments; overrides come
//! from `YTOOLS_*` environment variables.

use serde::{Deserialize, Serialize};

/// Browser viewport dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Configuration shared by every scenario.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base origin of the application under test.
    pub base_url: String,

    /// Default timeout for selector and condition waits.
    pub default_timeout_ms: u64,

    /// Whether the browser runs headless.
    pub headless: bool,

    /// Directory screenshots are written to.
    pub evidence_dir: std::path::PathBuf,

    /// Directory scenario fixtures are written to.
    pub fixture_dir: std::path::PathBuf,

    /// Viewport for new sessions.
    pub viewport: Viewport,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            default_timeout_ms: 5000,
            headless: true,
            evidence_dir: std::path::PathBuf::from("verification"),
            fixture_dir: std::path::PathBuf::from("verification"),
            viewport: Viewport::default(),
        }
    }
}

impl HarnessConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `YTOOLS_BASE_URL`, `YTOOLS_TIMEOUT_MS`,
    /// `YTOOLS_HEADED` (set to `1` to show the browser),
    /// `YTOOLS_EVIDENCE_DIR`, `YTOOLS_FIXTURE_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("YTOOLS_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(ms) = std::env::var("YTOOLS_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.default_timeout_ms = ms;
        }
        if std::env::var("YTOOLS_HEADED").as_deref() == Ok("1") {
            config.headless = false;
        }
        if let Ok(dir) = std::env::var("YTOOLS_EVIDENCE_DIR") {
            config.evidence_dir = dir.into();
        }
        if let Ok(dir) = std::env::var("YTOOLS_FIXTURE_DIR") {
            config.fixture_dir = dir.into();
        }

        config
    }

    /// Resolve a path against the base origin. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Session options derived from this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            headless: self.headless,
            viewport: self.viewport,
            permissions: Vec::new(),
            accept_downloads: true,
        }
    }
}

/// Options for one isolated browser context.
///
/// Serialized verbatim as the sidecar launch spec, hence the camelCase
/// field names on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    pub headless: bool,
    pub viewport: Viewport,
    pub permissions: Vec<String>,
    pub accept_downloads: bool,
}

impl SessionOptions {
    /// Grant a browser capability (e.g. `"camera"`) to the context.
    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.push(permission.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.default_timeout_ms, 5000);
        assert!(config.headless);
        assert_eq!(config.evidence_dir, std::path::PathBuf::from("verification"));
    }

    #[test]
    fn test_url_join() {
        let config = HarnessConfig::default();
        assert_eq!(config.url("/wishlist"), "http://localhost:3000/wishlist");
        assert_eq!(config.url("wishlist"), "http://localhost:3000/wishlist");
        assert_eq!(
            config.url("https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_url_join_trailing_slash() {
        let config = HarnessConfig {
            base_url: "http://localhost:3000/".to_string(),
            ..HarnessConfig::default()
        };
        assert_eq!(config.url("/deeplink"), "http://localhost:3000/deeplink");
    }

    #[test]
    fn test_session_options_permissions() {
        let options = HarnessConfig::default()
            .session_options()
            .with_permission("camera");
        assert_eq!(options.permissions, vec!["camera".to_string()]);
        assert!(options.accept_downloads);
    }

    #[test]
    fn test_session_options_wire_shape() {
        let options = HarnessConfig::default().session_options();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["headless"], true);
        assert_eq!(json["acceptDownloads"], true);
        assert_eq!(json["viewport"]["width"], 1280);
    }
}
