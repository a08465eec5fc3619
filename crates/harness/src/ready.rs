//! Application readiness probe
//!
//! The scripts this harness replaces synchronized on the dev server with
//! fixed sleeps. Here every scenario instead polls the base origin until it
//! responds, so startup latency never costs more than it has to and a dead
//! server fails fast with a real error.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{HarnessError, HarnessResult};

/// How long a scenario waits for the application by default.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll the base origin until it answers with a success status.
pub async fn wait_for_app(base_url: &str, timeout: Duration) -> HarnessResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match client.get(base_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                return Ok(());
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "readiness probe rejected");
            }
            Err(e) => {
                if attempts == 1 {
                    info!(url = base_url, "waiting for application...");
                }
                // Connection refused is expected while the server starts
                if !e.is_connect() {
                    warn!("readiness probe error: {e}");
                }
            }
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(HarnessError::AppUnready { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_timeout_reports_unready() {
        let err = wait_for_app("http://127.0.0.1:1", Duration::ZERO)
            .await
            .unwrap_err();
        match err {
            HarnessError::AppUnready { attempts } => assert_eq!(attempts, 0),
            other => panic!("unexpected error: {other}"),
        }
    }
}
