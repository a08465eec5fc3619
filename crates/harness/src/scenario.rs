//! Scenario runner
//!
//! One scenario is one linear flow: acquire a session, navigate, interact,
//! assert, record, tear down. The runner owns the parts the scripts it
//! replaces kept re-implementing ad hoc: the readiness poll, the guaranteed
//! release on every exit path, the on-failure evidence hook, and the final
//! report. There is no branching and no retry between steps.

use std::future::Future;
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::{HarnessConfig, SessionOptions};
use crate::error::HarnessResult;
use crate::evidence::Evidence;
use crate::probe::Probe;
use crate::ready;
use crate::session::Session;

/// Everything a scenario body needs, cheaply cloneable.
#[derive(Clone)]
pub struct Scenario {
    pub name: String,
    pub session: Session,
    pub probe: Probe,
    pub evidence: Evidence,
    pub config: HarnessConfig,
}

/// Run one scenario to completion and map the outcome onto an exit code:
/// 0 when the body returned Ok (soft-check failures included), 1 when an
/// error propagated out of the body, 2 when no session could be started.
pub async fn run<F, Fut>(
    name: &str,
    config: HarnessConfig,
    options: SessionOptions,
    body: F,
) -> ExitCode
where
    F: FnOnce(Scenario) -> Fut,
    Fut: Future<Output = HarnessResult<()>>,
{
    let start = Instant::now();
    info!(scenario = name, base_url = %config.base_url, "starting");

    if let Err(e) = ready::wait_for_app(&config.base_url, ready::DEFAULT_STARTUP_TIMEOUT).await {
        error!(scenario = name, "application not reachable: {e}");
        return ExitCode::from(2);
    }

    let session = match Session::acquire(&config, options).await {
        Ok(session) => session,
        Err(e) => {
            error!(scenario = name, "session startup failed: {e}");
            return ExitCode::from(2);
        }
    };

    let probe = Probe::new();
    let evidence = Evidence::new(&config.evidence_dir);
    let scenario = Scenario {
        name: name.to_string(),
        session: session.clone(),
        probe: probe.clone(),
        evidence: evidence.clone(),
        config,
    };

    let outcome = body(scenario).await;

    if let Err(e) = &outcome {
        error!(scenario = name, "scenario failed: {e}");
        evidence.capture_failure(&session, name).await;
    }

    // The one release, on every exit path. Kill-on-drop backs this up if
    // the graceful close itself fails.
    if let Err(e) = session.close().await {
        warn!(scenario = name, "session close: {e}");
    }

    let summary = probe.summary();
    for check in probe.results().iter().filter(|c| !c.pass) {
        warn!(check = %check.description, actual = %check.actual, "failed check");
    }
    info!(
        scenario = name,
        checks = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        duration_ms = start.elapsed().as_millis() as u64,
        "finished"
    );

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    }
}
