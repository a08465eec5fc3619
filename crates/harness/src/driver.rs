//! Browser driver sidecar
//!
//! The harness drives a real browser through a long-lived Node.js process
//! running the embedded Playwright sidecar script ([`DRIVER_JS`]). Commands
//! and responses are JSON lines over the child's stdin/stdout, correlated by
//! auto-incrementing id.
//!
//! This module handles:
//! - Sidecar process spawn and the ready handshake
//! - Command id generation and request/response correlation
//! - Mapping driver faults onto the harness error taxonomy
//! - Graceful shutdown (close command, then SIGTERM, then kill)

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::config::SessionOptions;
use crate::error::{HarnessError, HarnessResult};

/// Playwright sidecar, shipped inside the binary and written to a scratch
/// directory at session start.
const DRIVER_JS: &str = include_str!("driver.js");

/// How long the sidecar gets to launch the browser and report ready.
const READY_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a graceful close may take before escalating to signals.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Element wait states understood by the sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    Present,
    Visible,
    Hidden,
}

/// A command sent to the sidecar.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DriverCmd {
    Goto {
        url: String,
    },
    WaitForSelector {
        selector: String,
        state: WaitState,
        timeout_ms: u64,
    },
    WaitForFunction {
        expression: String,
        timeout_ms: u64,
    },
    Click {
        selector: String,
    },
    Fill {
        selector: String,
        value: String,
    },
    Press {
        selector: Option<String>,
        key: String,
    },
    SetInputFiles {
        selector: String,
        path: String,
    },
    Count {
        selector: String,
    },
    TextContent {
        selector: String,
    },
    InnerHtml {
        selector: String,
    },
    GetAttribute {
        selector: String,
        name: String,
    },
    ComputedStyle {
        selector: String,
        property: String,
    },
    Evaluate {
        expression: String,
    },
    Screenshot {
        path: String,
        full_page: bool,
    },
    ExpectDownload {
        selector: String,
        timeout_ms: u64,
    },
    ExpectDialog {
        selector: String,
        accept: bool,
        timeout_ms: u64,
    },
    SetDialogPolicy {
        accept: bool,
    },
    Close,
}

impl DriverCmd {
    /// The selector (or expression) a fault on this command refers to.
    fn subject(&self) -> Option<&str> {
        match self {
            DriverCmd::WaitForSelector { selector, .. }
            | DriverCmd::Click { selector }
            | DriverCmd::Fill { selector, .. }
            | DriverCmd::SetInputFiles { selector, .. }
            | DriverCmd::Count { selector }
            | DriverCmd::TextContent { selector }
            | DriverCmd::InnerHtml { selector }
            | DriverCmd::GetAttribute { selector, .. }
            | DriverCmd::ComputedStyle { selector, .. }
            | DriverCmd::ExpectDownload { selector, .. }
            | DriverCmd::ExpectDialog { selector, .. } => Some(selector),
            DriverCmd::Press {
                selector: Some(selector),
                ..
            } => Some(selector),
            DriverCmd::WaitForFunction { expression, .. } => Some(expression),
            _ => None,
        }
    }

    /// The bounded timeout this command carries, if any.
    fn timeout_ms(&self) -> Option<u64> {
        match self {
            DriverCmd::WaitForSelector { timeout_ms, .. }
            | DriverCmd::WaitForFunction { timeout_ms, .. }
            | DriverCmd::ExpectDownload { timeout_ms, .. }
            | DriverCmd::ExpectDialog { timeout_ms, .. } => Some(*timeout_ms),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct DriverRequest {
    id: u64,
    #[serde(flatten)]
    cmd: DriverCmd,
}

/// A response line from the sidecar.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverResponse {
    pub id: u64,
    pub ok: bool,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub error: Option<DriverFault>,
}

/// Failure detail attached to a non-ok response.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverFault {
    pub kind: FaultKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    NotFound,
    Timeout,
    Internal,
}

/// First line the sidecar emits: either ready or a fatal launch failure.
#[derive(Debug, Deserialize)]
struct Handshake {
    event: String,
    #[serde(default)]
    message: Option<String>,
}

/// Map a sidecar fault onto the harness taxonomy, using the command's
/// subject and timeout for the typed variants.
fn map_fault(fault: DriverFault, subject: Option<String>, timeout_ms: Option<u64>) -> HarnessError {
    match (fault.kind, subject) {
        (FaultKind::NotFound, Some(selector)) => HarnessError::ElementNotFound { selector },
        (FaultKind::Timeout, Some(selector)) => HarnessError::WaitTimeout {
            selector,
            elapsed_ms: timeout_ms.unwrap_or(0),
        },
        _ => HarnessError::Driver(fault.message),
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<DriverResponse>>>>;

/// Handle to a running sidecar process.
pub struct Driver {
    child: Mutex<Child>,
    stdin: Mutex<ChildStdin>,
    pending: Pending,
    next_id: AtomicU64,
    _reader: tokio::task::JoinHandle<()>,
    /// Keeps the scratch directory holding driver.js alive for the
    /// sidecar's lifetime.
    _workdir: tempfile::TempDir,
}

impl Driver {
    /// Spawn the sidecar and wait for its ready handshake.
    ///
    /// Startup failures are fatal: there are no retries, and the error is
    /// always [`HarnessError::SessionStartup`].
    pub async fn spawn(options: &SessionOptions) -> HarnessResult<Self> {
        let workdir = tempfile::tempdir()
            .map_err(|e| HarnessError::SessionStartup(format!("scratch dir: {e}")))?;
        let script = workdir.path().join("driver.js");
        std::fs::write(&script, DRIVER_JS)
            .map_err(|e| HarnessError::SessionStartup(format!("write driver script: {e}")))?;

        let launch_spec = serde_json::to_string(options)?;

        let mut child = Command::new("node")
            .arg(&script)
            .arg(&launch_spec)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                HarnessError::SessionStartup(format!(
                    "failed to spawn node (is Playwright installed?): {e}"
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HarnessError::SessionStartup("sidecar stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HarnessError::SessionStartup("sidecar stdout unavailable".into()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "ytools_verify::sidecar", "{line}");
                }
            });
        }

        let mut lines = BufReader::new(stdout).lines();

        // Ready handshake before any command is accepted.
        let first = tokio::time::timeout(READY_TIMEOUT, lines.next_line())
            .await
            .map_err(|_| {
                HarnessError::SessionStartup(format!(
                    "sidecar not ready within {}s",
                    READY_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| HarnessError::SessionStartup(format!("sidecar stdout: {e}")))?
            .ok_or_else(|| HarnessError::SessionStartup("sidecar exited during launch".into()))?;

        let handshake: Handshake = serde_json::from_str(&first).map_err(|_| {
            HarnessError::SessionStartup(format!("unexpected sidecar greeting: {first}"))
        })?;
        match handshake.event.as_str() {
            "ready" => {}
            "fatal" => {
                return Err(HarnessError::SessionStartup(
                    handshake.message.unwrap_or_else(|| "browser launch failed".into()),
                ))
            }
            other => {
                return Err(HarnessError::SessionStartup(format!(
                    "unexpected sidecar event: {other}"
                )))
            }
        }

        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
        let pending_reader = Arc::clone(&pending);
        let reader = tokio::spawn(async move {
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let response: DriverResponse = match serde_json::from_str(&line) {
                            Ok(r) => r,
                            Err(e) => {
                                debug!("ignoring non-protocol sidecar line ({e}): {line}");
                                continue;
                            }
                        };
                        let mut pending = pending_reader.lock().await;
                        if let Some(tx) = pending.remove(&response.id) {
                            let _ = tx.send(response);
                        } else {
                            debug!(id = response.id, "response for unknown command id");
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("sidecar stdout read error: {e}");
                        break;
                    }
                }
            }
            // Dropping the senders fails every in-flight call with
            // DriverClosed.
            pending_reader.lock().await.clear();
        });

        Ok(Self {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            pending,
            next_id: AtomicU64::new(1),
            _reader: reader,
            _workdir: workdir,
        })
    }

    /// Send one command and wait for its response.
    ///
    /// Plain interactions have no harness-side timeout; wait commands carry
    /// their own bounded timeout, enforced inside the sidecar.
    pub async fn call(&self, cmd: DriverCmd) -> HarnessResult<Value> {
        let subject = cmd.subject().map(str::to_string);
        let timeout_ms = cmd.timeout_ms();

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = DriverRequest { id, cmd };
        let line = serde_json::to_string(&request)?;

        debug!(id, "sending driver command: {line}");

        // Register the response slot before writing to avoid a race with
        // the reader task.
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let write = async {
            let mut stdin = self.stdin.lock().await;
            stdin.write_all(line.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await
        };
        if write.await.is_err() {
            self.pending.lock().await.remove(&id);
            return Err(HarnessError::DriverClosed);
        }

        let response = rx.await.map_err(|_| HarnessError::DriverClosed)?;

        if response.ok {
            Ok(response.value)
        } else {
            let fault = response.error.unwrap_or(DriverFault {
                kind: FaultKind::Internal,
                message: "driver reported failure without detail".to_string(),
            });
            Err(map_fault(fault, subject, timeout_ms))
        }
    }

    /// Close the browser and stop the sidecar, escalating if it lingers.
    pub async fn shutdown(&self) -> HarnessResult<()> {
        // Best effort: the sidecar exits on its own after `close`.
        let _ = self.call(DriverCmd::Close).await;

        let mut child = self.child.lock().await;
        match tokio::time::timeout(CLOSE_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(%status, "sidecar exited");
                return Ok(());
            }
            Ok(Err(e)) => warn!("waiting for sidecar: {e}"),
            Err(_) => {
                #[cfg(unix)]
                if let Some(pid) = child.id() {
                    use nix::sys::signal::{kill, Signal};
                    use nix::unistd::Pid;
                    let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
        }

        let _ = child.kill().await;
        let _ = child.wait().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = DriverRequest {
            id: 7,
            cmd: DriverCmd::WaitForSelector {
                selector: "#reader".to_string(),
                state: WaitState::Visible,
                timeout_ms: 5000,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["cmd"], "wait_for_selector");
        assert_eq!(json["selector"], "#reader");
        assert_eq!(json["state"], "visible");
        assert_eq!(json["timeout_ms"], 5000);
    }

    #[test]
    fn test_response_parse_success() {
        let line = r#"{"id":1,"ok":true,"value":{"finalUrl":"http://localhost:3000/deeplink"}}"#;
        let response: DriverResponse = serde_json::from_str(line).unwrap();
        assert!(response.ok);
        assert_eq!(response.value["finalUrl"], "http://localhost:3000/deeplink");
        assert!(response.error.is_none());
    }

    #[test]
    fn test_response_parse_fault() {
        let line = r#"{"id":2,"ok":false,"error":{"kind":"not_found","message":"no element"}}"#;
        let response: DriverResponse = serde_json::from_str(line).unwrap();
        assert!(!response.ok);
        let fault = response.error.unwrap();
        assert_eq!(fault.kind, FaultKind::NotFound);
        assert_eq!(fault.message, "no element");
    }

    #[test]
    fn test_response_parse_null_value() {
        let line = r#"{"id":3,"ok":true,"value":null}"#;
        let response: DriverResponse = serde_json::from_str(line).unwrap();
        assert!(response.ok);
        assert!(response.value.is_null());
    }

    #[test]
    fn test_map_fault_not_found() {
        let err = map_fault(
            DriverFault {
                kind: FaultKind::NotFound,
                message: "no element".to_string(),
            },
            Some("button[title='Open']".to_string()),
            None,
        );
        match err {
            HarnessError::ElementNotFound { selector } => {
                assert_eq!(selector, "button[title='Open']")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_map_fault_timeout() {
        let err = map_fault(
            DriverFault {
                kind: FaultKind::Timeout,
                message: "timed out".to_string(),
            },
            Some("#reader video".to_string()),
            Some(10_000),
        );
        match err {
            HarnessError::WaitTimeout {
                selector,
                elapsed_ms,
            } => {
                assert_eq!(selector, "#reader video");
                assert_eq!(elapsed_ms, 10_000);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_map_fault_internal_falls_through() {
        let err = map_fault(
            DriverFault {
                kind: FaultKind::Internal,
                message: "boom".to_string(),
            },
            Some("h1".to_string()),
            None,
        );
        assert!(matches!(err, HarnessError::Driver(m) if m == "boom"));
    }

    #[test]
    fn test_subject_and_timeout_hints() {
        let cmd = DriverCmd::ExpectDownload {
            selector: "button:has-text('Download')".to_string(),
            timeout_ms: 15_000,
        };
        assert_eq!(cmd.subject(), Some("button:has-text('Download')"));
        assert_eq!(cmd.timeout_ms(), Some(15_000));

        let cmd = DriverCmd::Goto {
            url: "http://localhost:3000".to_string(),
        };
        assert_eq!(cmd.subject(), None);
        assert_eq!(cmd.timeout_ms(), None);
    }
}
