//! Style diagnostics for the home page.
//!
//! Dumps the values the typography scenarios assert on, so a font
//! regression can be triaged from the log alone. Soft checks only.

use std::process::ExitCode;

use tracing::info;
use ytools_verify::{scenario, HarnessConfig};

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("style_debug", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.wait_for_selector("h1").await?;

        let body_class = session.attribute("body", "class").await?.unwrap_or_default();
        info!(%body_class, "body classes");

        let serif_var = session
            .computed_style("body", "--font-instrument-serif")
            .await?;
        info!(value = %serif_var, "body --font-instrument-serif");
        scn.probe.check(
            "body exposes the instrument-serif font variable",
            &serif_var,
            |v| !v.trim().is_empty(),
        );

        let h1_class = session.attribute("h1", "class").await?.unwrap_or_default();
        info!(%h1_class, "h1 classes");

        let h1_font = session.computed_style("h1", "font-family").await?;
        info!(%h1_font, "h1 computed font family");
        scn.probe
            .check("h1 resolves to a serif family", &h1_font, |f| {
                f.to_lowercase().contains("serif")
            });

        Ok(())
    })
    .await
}
