//! Evidence recorder
//!
//! Screenshot artifacts captured at scenario checkpoints, for post-hoc human
//! review. On an unhandled failure the runner records one final image under
//! an `error_*` name, so failure evidence never overwrites a checkpoint.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::HarnessResult;
use crate::session::Session;

/// Failure-evidence name for a scenario.
fn failure_name(scenario: &str) -> String {
    format!("error_{scenario}")
}

/// Writes checkpoint and failure screenshots into one directory.
#[derive(Debug, Clone)]
pub struct Evidence {
    dir: PathBuf,
}

impl Evidence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a named capture lands.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// Capture a screenshot at a checkpoint. The directory is created
    /// first, so a missing parent never fails the capture.
    pub async fn capture(
        &self,
        session: &Session,
        name: &str,
        full_page: bool,
    ) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        session.screenshot(&path, full_page).await?;
        info!(path = %path.display(), "evidence captured");
        Ok(path)
    }

    /// Best-effort failure capture just before teardown. Never propagates:
    /// the scenario's own error is the one worth reporting.
    pub async fn capture_failure(&self, session: &Session, scenario: &str) {
        match self.capture(session, &failure_name(scenario), true).await {
            Ok(path) => info!(path = %path.display(), "failure evidence captured"),
            Err(e) => warn!("failure evidence capture failed: {e}"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_name_is_distinct() {
        assert_eq!(failure_name("wishlist_import"), "error_wishlist_import");
    }

    #[test]
    fn test_path_for() {
        let evidence = Evidence::new("verification");
        assert_eq!(
            evidence.path_for("home_typography"),
            PathBuf::from("verification/home_typography.png")
        );
    }
}
