//! Home page smoke check: the app responds and the three tool cards exist.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig};

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("smoke", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.wait_for_selector("h1").await?;
        scn.probe
            .require("home renders a heading", session.count("h1").await?, |n| {
                *n >= 1
            })?;

        for (label, selector) in [
            ("wishlist", "a[href='/wishlist']"),
            ("deeplink opener", "a[href='/deeplink-opener']"),
            ("image reducer", "a[href='/image-reducer']"),
        ] {
            scn.probe.check(
                &format!("{label} card is linked from home"),
                session.count(selector).await?,
                |n| *n >= 1,
            );
        }

        scn.evidence.capture(session, "smoke_home", false).await?;
        Ok(())
    })
    .await
}
