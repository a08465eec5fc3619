//! QR scanner: opens with camera access, closes again, and the opener
//! surfaces a fallback toast when a link's scheme has no handler.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig, WaitState};

const UNOPENABLE_LINK: &str = "nonexistentapp://test/fallback";

/// The toast is delayed ~1.5s by the app; give it room on top of that.
const TOAST_TIMEOUT_MS: u64 = 10_000;

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options().with_permission("camera");

    scenario::run("deeplink_scanner", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/deeplink-opener").await?;

        let scan = session
            .resolve_selector(&["button[title='Scan QR']", "button:has(.lucide-camera)"])
            .await?;
        scn.probe
            .require("scan control present", session.count(&scan).await?, |n| {
                *n > 0
            })?;

        session.click(&scan).await?;
        session.wait_for_selector("#reader").await?;

        session.click("button >> .lucide-x").await?;

        session.fill("input[type='text']", UNOPENABLE_LINK).await?;
        let open = session
            .resolve_selector(&["button[title='Open']", "button:has(.lucide-external-link)"])
            .await?;
        session.click(&open).await?;

        session
            .wait_for_selector_with(
                "text=Application not found or not installed",
                WaitState::Visible,
                TOAST_TIMEOUT_MS,
            )
            .await?;

        scn.evidence
            .capture(session, "deeplink_scanner_features", true)
            .await?;
        Ok(())
    })
    .await
}
