//! Home typography via declared classes, plus the legacy-route redirects.
//!
//! The class check is advisory only: a declared class can be overridden, so
//! the computed-style scenario is the authoritative one.

use std::process::ExitCode;

use ytools_verify::{redirect_landed, scenario, HarnessConfig};

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("typography_classes", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.wait_for_selector("h1").await?;
        let h1_class = session.attribute("h1", "class").await?.unwrap_or_default();
        scn.probe
            .check("h1 declares the serif font class", &h1_class, |c| {
                c.contains("font-serif")
            });
        scn.evidence
            .capture(session, "home_typography", false)
            .await?;

        let final_url = session.navigate("/image-reducer").await?;
        scn.probe.require(
            "legacy image-reducer route forwards to /ireducer",
            final_url.as_str(),
            |u| redirect_landed(u, "/ireducer"),
        )?;
        scn.evidence
            .capture(session, "ireducer_redirect", false)
            .await?;

        let final_url = session.navigate("/deeplink-opener").await?;
        scn.probe.require(
            "legacy deeplink-opener route forwards to /deeplink",
            final_url.as_str(),
            |u| redirect_landed(u, "/deeplink"),
        )?;

        Ok(())
    })
    .await
}
