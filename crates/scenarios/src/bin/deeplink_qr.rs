//! QR panel controls: Download, Share and Close must all render once a QR
//! code has been generated.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig};

const TEST_LINK: &str = "myapp://verify/test";

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("deeplink_qr", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/deeplink-opener").await?;
        session.fill("input[type='text']", TEST_LINK).await?;

        let generate = session
            .resolve_selector(&[
                "button[title='Generate QR Code']",
                "button:has(.lucide-qr-code)",
            ])
            .await?;
        session.click(&generate).await?;
        session.wait_for_selector("#qrcode-svg").await?;

        scn.probe.require(
            "download control rendered with the QR panel",
            session.count("button:has-text('Download')").await?,
            |n| *n > 0,
        )?;
        scn.probe.require(
            "share control rendered with the QR panel",
            session.count("button:has-text('Share')").await?,
            |n| *n > 0,
        )?;
        scn.probe.require(
            "close control rendered with the QR panel",
            session.count("button[title='Close']").await?,
            |n| *n > 0,
        )?;

        scn.evidence
            .capture(session, "deeplink_qr_features", true)
            .await?;
        Ok(())
    })
    .await
}
