//! Deeplink opener happy path: reach it from the home card, generate a QR
//! code, and find the link recorded in history.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig};

const TEST_LINK: &str = "myapp://verify/test";

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("deeplink_opener", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.click("a[href='/deeplink-opener']").await?;
        session
            .wait_for_condition("() => window.location.pathname.includes('/deeplink')")
            .await?;
        session.wait_for_selector("h1").await?;

        session.fill("input[type='text']", TEST_LINK).await?;

        // Accessible title first, icon class as the localization fallback.
        let generate = session
            .resolve_selector(&[
                "button[title='Generate QR Code']",
                "button:has(.lucide-qr-code)",
            ])
            .await?;
        session.click(&generate).await?;
        session.wait_for_selector("svg").await?;

        session
            .wait_for_selector(&format!("text={TEST_LINK}"))
            .await?;
        scn.probe.require(
            "generated link recorded in history",
            session.count(&format!("text={TEST_LINK}")).await?,
            |n| *n >= 1,
        )?;

        scn.evidence
            .capture(session, "deeplink_verification", true)
            .await?;
        Ok(())
    })
    .await
}
