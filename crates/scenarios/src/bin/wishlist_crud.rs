//! Wishlist end to end: create a list from the home page, open it, add an
//! item under a freshly created category.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig};

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("wishlist_crud", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/").await?;
        session.click("text=Wishlist").await?;
        session
            .wait_for_condition("() => window.location.pathname.endsWith('/wishlist')")
            .await?;

        session.click("text=New List").await?;
        session
            .fill("input[placeholder='e.g., Tech Upgrade 2024']", "My Dream Setup")
            .await?;
        session
            .fill(
                "textarea[placeholder=\"What's this list for?\"]",
                "Things I want to buy",
            )
            .await?;
        session.click("button[aria-label='Orange']").await?;
        session.click("button[type='submit']").await?;

        session.wait_for_selector("text=My Dream Setup").await?;
        session.click("text=My Dream Setup").await?;
        session
            .wait_for_condition("() => /\\/wishlist\\/.+/.test(window.location.pathname)")
            .await?;

        session.click("text=Add Item").await?;
        session
            .fill("input[placeholder='e.g., Wireless Headphones']", "Super Mouse")
            .await?;

        session.click("text=+ New Category").await?;
        session
            .fill(
                "input[placeholder='e.g., Electronics, Clothes...']",
                "Peripherals",
            )
            .await?;
        session.click("text=Save Category").await?;

        // The category modal has closed; this submit belongs to the item
        // form, not the trigger button.
        session.click("button[type='submit']").await?;

        session.wait_for_selector("text=Super Mouse").await?;
        scn.probe.require(
            "new item visible in the list detail",
            session.count("text=Super Mouse").await?,
            |n| *n >= 1,
        )?;

        scn.evidence
            .capture(session, "wishlist_detail", false)
            .await?;
        Ok(())
    })
    .await
}
