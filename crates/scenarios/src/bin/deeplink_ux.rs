//! Opener control choreography: action buttons are gated on a non-empty
//! input, the scan control sits leftmost, and the scanner starts its video
//! feed directly.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig, WaitState};

/// Camera startup inside the scanner can take a while in CI.
const VIDEO_TIMEOUT_MS: u64 = 10_000;

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options().with_permission("camera");

    scenario::run("deeplink_ux", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/deeplink-opener").await?;

        session
            .resolve_selector(&["button[title='Scan QR']", "button:has(.lucide-camera)"])
            .await?;
        scn.probe.require(
            "open control hidden while the input is empty",
            session.count("button[title='Open']").await?,
            |n| *n == 0,
        )?;
        scn.probe.require(
            "generate control hidden while the input is empty",
            session.count("button[title='Generate QR Code']").await?,
            |n| *n == 0,
        )?;

        session.fill("input[type='text']", "myapp://test").await?;
        session
            .wait_for_condition(
                "() => document.querySelectorAll('.flex.gap-2 button').length >= 3",
            )
            .await?;

        scn.probe.require(
            "open control appears after typing",
            session.count("button[title='Open']").await?,
            |n| *n > 0,
        )?;
        scn.probe.require(
            "generate control appears after typing",
            session.count("button[title='Generate QR Code']").await?,
            |n| *n > 0,
        )?;

        let first_control = session.inner_html(".flex.gap-2 button >> nth=0").await?;
        scn.probe
            .check("scan control is leftmost", &first_control, |html| {
                html.contains("lucide-camera")
            });

        session.click("button:has(.lucide-camera)").await?;
        session
            .wait_for_selector_with("#reader video", WaitState::Visible, VIDEO_TIMEOUT_MS)
            .await?;

        session.click("button >> .lucide-x").await?;

        Ok(())
    })
    .await
}
