//! Browser session
//!
//! One [`Session`] wraps one sidecar process with one isolated browser
//! context and one page, used exclusively by one scenario. Every primitive
//! suspends the calling scenario until the browser acknowledges; waits carry
//! a bounded timeout, plain interactions rely on the transport default.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{HarnessConfig, SessionOptions};
use crate::driver::{Driver, DriverCmd, WaitState};
use crate::error::{HarnessError, HarnessResult};

/// Redirect policy: a client-side redirect counts as landed when the final
/// URL contains the expected fragment. Loose substring match, never exact
/// path equality, because redirect targets may carry query or hash segments.
pub fn redirect_landed(final_url: &str, expected: &str) -> bool {
    final_url.contains(expected)
}

/// A file download intercepted by the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub suggested_filename: String,
    pub path: String,
}

/// A native dialog intercepted by the session.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogInfo {
    pub kind: String,
    pub message: String,
}

/// One isolated browser context plus page.
///
/// Cheap to clone; all clones share the same underlying sidecar. The
/// scenario runner releases it exactly once on every exit path, and the
/// sidecar process is additionally killed on drop as a backstop.
#[derive(Clone)]
pub struct Session {
    driver: Arc<Driver>,
    config: HarnessConfig,
}

impl Session {
    /// Start the sidecar browser and hand back a ready session.
    ///
    /// No retries: a launch failure surfaces immediately as
    /// [`HarnessError::SessionStartup`].
    pub async fn acquire(config: &HarnessConfig, options: SessionOptions) -> HarnessResult<Self> {
        let driver = Driver::spawn(&options).await?;
        info!(
            headless = options.headless,
            permissions = ?options.permissions,
            "browser session acquired"
        );
        Ok(Self {
            driver: Arc::new(driver),
            config: config.clone(),
        })
    }

    /// Release the session. Safe to call once per scenario; the runner owns
    /// this on every exit path.
    pub async fn close(&self) -> HarnessResult<()> {
        debug!("closing browser session");
        self.driver.shutdown().await
    }

    // -- navigation ---------------------------------------------------------

    /// Navigate and return the URL the page settled on, read only after the
    /// navigation (including client-side redirects) has gone network-idle.
    pub async fn navigate(&self, path_or_url: &str) -> HarnessResult<String> {
        let url = self.config.url(path_or_url);
        let value = self.driver.call(DriverCmd::Goto { url: url.clone() }).await?;
        let final_url = value["finalUrl"]
            .as_str()
            .unwrap_or(url.as_str())
            .to_string();
        info!(requested = %url, landed = %final_url, "navigated");
        Ok(final_url)
    }

    // -- waits --------------------------------------------------------------

    /// Wait for an element to become visible, with the default timeout.
    pub async fn wait_for_selector(&self, selector: &str) -> HarnessResult<()> {
        self.wait_for_selector_with(selector, WaitState::Visible, self.config.default_timeout_ms)
            .await
    }

    pub async fn wait_for_selector_with(
        &self,
        selector: &str,
        state: WaitState,
        timeout_ms: u64,
    ) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::WaitForSelector {
                selector: selector.to_string(),
                state,
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    /// Wait until an in-page boolean expression holds, with the default
    /// timeout. Use when no stable selector exists for a dynamic state.
    pub async fn wait_for_condition(&self, expression: &str) -> HarnessResult<()> {
        self.wait_for_condition_with(expression, self.config.default_timeout_ms)
            .await
    }

    pub async fn wait_for_condition_with(
        &self,
        expression: &str,
        timeout_ms: u64,
    ) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::WaitForFunction {
                expression: expression.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    /// Fixed delay. Last resort for states the application signals in no
    /// observable way (fixed animation durations); prefer the condition and
    /// selector waits.
    pub async fn sleep(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// First candidate selector that matches at least one element.
    ///
    /// For controls whose accessible title depends on which locale loaded:
    /// probe the title selector first, then an icon-class fallback.
    pub async fn resolve_selector(&self, candidates: &[&str]) -> HarnessResult<String> {
        for candidate in candidates {
            if self.count(candidate).await? > 0 {
                return Ok((*candidate).to_string());
            }
        }
        Err(HarnessError::ElementNotFound {
            selector: candidates.join(" | "),
        })
    }

    // -- interactions -------------------------------------------------------

    pub async fn click(&self, selector: &str) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::Click {
                selector: selector.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn fill(&self, selector: &str, value: &str) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::Fill {
                selector: selector.to_string(),
                value: value.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn press(&self, selector: Option<&str>, key: &str) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::Press {
                selector: selector.map(str::to_string),
                key: key.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn upload_file(&self, selector: &str, path: &Path) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::SetInputFiles {
                selector: selector.to_string(),
                path: path.to_string_lossy().into_owned(),
            })
            .await?;
        Ok(())
    }

    // -- inspection ---------------------------------------------------------

    pub async fn count(&self, selector: &str) -> HarnessResult<usize> {
        let value = self
            .driver
            .call(DriverCmd::Count {
                selector: selector.to_string(),
            })
            .await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    pub async fn text_content(&self, selector: &str) -> HarnessResult<Option<String>> {
        let value = self
            .driver
            .call(DriverCmd::TextContent {
                selector: selector.to_string(),
            })
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    pub async fn inner_html(&self, selector: &str) -> HarnessResult<String> {
        let value = self
            .driver
            .call(DriverCmd::InnerHtml {
                selector: selector.to_string(),
            })
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn attribute(
        &self,
        selector: &str,
        name: &str,
    ) -> HarnessResult<Option<String>> {
        let value = self
            .driver
            .call(DriverCmd::GetAttribute {
                selector: selector.to_string(),
                name: name.to_string(),
            })
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    /// Computed style of the first matching element. Reads the rendered
    /// value, which a declared class name is not a reliable proxy for.
    pub async fn computed_style(&self, selector: &str, property: &str) -> HarnessResult<String> {
        let value = self
            .driver
            .call(DriverCmd::ComputedStyle {
                selector: selector.to_string(),
                property: property.to_string(),
            })
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Evaluate a JSON-valued expression (or zero-argument function) in the
    /// page.
    pub async fn evaluate(&self, expression: &str) -> HarnessResult<Value> {
        self.driver
            .call(DriverCmd::Evaluate {
                expression: expression.to_string(),
            })
            .await
    }

    pub async fn scroll_to_bottom(&self) -> HarnessResult<()> {
        self.evaluate("() => window.scrollTo(0, document.body.scrollHeight)")
            .await?;
        Ok(())
    }

    pub async fn screenshot(&self, path: &Path, full_page: bool) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::Screenshot {
                path: path.to_string_lossy().into_owned(),
                full_page,
            })
            .await?;
        Ok(())
    }

    // -- side-effect capture ------------------------------------------------

    /// Click a trigger and resolve the download it starts. The listener is
    /// attached before the click, so the event cannot be missed.
    pub async fn await_download(&self, trigger_selector: &str) -> HarnessResult<DownloadInfo> {
        let value = self
            .driver
            .call(DriverCmd::ExpectDownload {
                selector: trigger_selector.to_string(),
                timeout_ms: self.config.default_timeout_ms,
            })
            .await?;
        let info: DownloadInfo = serde_json::from_value(value)?;
        info!(filename = %info.suggested_filename, "download captured");
        Ok(info)
    }

    /// Click a trigger and resolve the native dialog it raises, accepting or
    /// dismissing it as configured. An unhandled dialog would block the page
    /// indefinitely.
    pub async fn await_dialog(
        &self,
        trigger_selector: &str,
        accept: bool,
    ) -> HarnessResult<DialogInfo> {
        let value = self
            .driver
            .call(DriverCmd::ExpectDialog {
                selector: trigger_selector.to_string(),
                accept,
                timeout_ms: self.config.default_timeout_ms,
            })
            .await?;
        let info: DialogInfo = serde_json::from_value(value)?;
        info!(kind = %info.kind, message = %info.message, "dialog captured");
        Ok(info)
    }

    /// Install a persistent auto-accept (or auto-dismiss) dialog policy for
    /// the rest of the session.
    pub async fn accept_dialogs(&self) -> HarnessResult<()> {
        self.driver
            .call(DriverCmd::SetDialogPolicy { accept: true })
            .await?;
        Ok(())
    }

    // -- storage back door --------------------------------------------------

    /// Seed one record into the application's client-side keyed record
    /// store (IndexedDB). A privileged test-only path, not an application
    /// API; the page must already be on the application origin.
    pub async fn put_record(
        &self,
        db: &str,
        version: u32,
        store: &str,
        record: &Value,
    ) -> HarnessResult<()> {
        let record_json = serde_json::to_string(record)?;
        let expression = format!(
            r#"() => new Promise((resolve, reject) => {{
                const request = indexedDB.open('{db}', {version});
                request.onerror = () => reject(request.error);
                request.onsuccess = (event) => {{
                    const db = event.target.result;
                    const tx = db.transaction(['{store}'], 'readwrite');
                    tx.objectStore('{store}').put({record_json});
                    tx.oncomplete = () => resolve(true);
                    tx.onerror = () => reject(tx.error);
                }};
            }})"#
        );
        self.evaluate(&expression).await?;
        debug!(db, store, "record seeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_landed_substring_policy() {
        assert!(redirect_landed("http://localhost:3000/ireducer", "/ireducer"));
        assert!(redirect_landed(
            "http://localhost:3000/ireducer?from=legacy#top",
            "/ireducer"
        ));
        assert!(!redirect_landed(
            "http://localhost:3000/image-reducer",
            "/ireducer"
        ));
    }

    #[test]
    fn test_download_info_wire_shape() {
        let value = serde_json::json!({
            "suggestedFilename": "myapp---x-1700000000000.png",
            "path": "/tmp/downloads/abc"
        });
        let info: DownloadInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.suggested_filename, "myapp---x-1700000000000.png");
    }
}
