//! Home typography via computed styles, plus the legacy-route redirects.
//!
//! Reads the rendered font-family instead of trusting class names. The font
//! checks stay soft: the exact family string varies with font-loading
//! timing and the CSS variable name the framework emits.

use std::process::ExitCode;

use ytools_verify::{redirect_landed, scenario, HarnessConfig};

fn is_instrument_serif(family: &str) -> bool {
    family.contains("Instrument Serif") || family.contains("Instrument_Serif")
}

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("typography_computed", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.wait_for_selector("h1").await?;

        let h1_font = session.computed_style("h1", "font-family").await?;
        scn.probe
            .check("h1 renders in Instrument Serif", &h1_font, |f| {
                is_instrument_serif(f)
            });

        let label_count = session.count("text=Image Reducer").await?;
        scn.probe
            .check("image reducer card label present", label_count, |n| *n > 0);
        if label_count > 0 {
            let label_font = session
                .computed_style("text=Image Reducer", "font-family")
                .await?;
            scn.probe
                .check("card label renders in Instrument Serif", &label_font, |f| {
                    is_instrument_serif(f)
                });
        }

        scn.evidence
            .capture(session, "home_typography_v2", false)
            .await?;

        let final_url = session.navigate("/image-reducer").await?;
        scn.probe.require(
            "legacy image-reducer route forwards to /ireducer",
            final_url.as_str(),
            |u| redirect_landed(u, "/ireducer"),
        )?;

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
