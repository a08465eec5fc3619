//! ytools-verify: UI scenario verification harness
//!
//! Drives the Ygor's Tools web application through a headless browser and
//! asserts on rendered DOM state, computed styles, redirects, downloads, and
//! imports. The browser is a Node.js/Playwright sidecar spoken to over a
//! JSON-lines protocol; every primitive is a blocking call from the
//! scenario's point of view.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                Scenario binary (one per flow)                │
//! │  scenario::run(name, config, options, |scn| async { .. })    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Session   navigate / waits / clicks / fills / uploads       │
//! │            downloads, dialogs, storage back door             │
//! │  Probe     soft + strict checks, recorded in order           │
//! │  Evidence  checkpoint + error_* failure screenshots          │
//! │  Fixture   importable JSON records                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Driver    JSON-lines over stdin/stdout to `node driver.js`  │
//! │            (Playwright chromium, one context, one page)      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A scenario is linear: readiness poll → acquire → (interact → assert)* →
//! record → release. The runner guarantees the release on every exit path
//! and captures failure evidence before teardown.

pub mod config;
pub mod driver;
pub mod error;
pub mod evidence;
pub mod fixture;
pub mod naming;
pub mod probe;
pub mod ready;
pub mod scenario;
pub mod session;

pub use config::{HarnessConfig, SessionOptions, Viewport};
pub use driver::WaitState;
pub use error::{HarnessError, HarnessResult};
pub use evidence::Evidence;
pub use fixture::ImportRecord;
pub use probe::{CheckResult, Probe, ProbeSummary};
pub use scenario::Scenario;
pub use session::{redirect_landed, DialogInfo, DownloadInfo, Session};

/// Initialize logging for a scenario binary. Honors `RUST_LOG`, defaulting
/// to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
