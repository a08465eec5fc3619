//! Wishlist refinements: emoji list icons, item editing affordances, and
//! the export controls at the bottom of the detail view.

use std::process::ExitCode;

use ytools_verify::{scenario, HarnessConfig};

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("wishlist_updates", config, options, |scn| async move {
        let session = &scn.session;

        session.navigate("/wishlist").await?;
        session.wait_for_selector("text=New List").await?;

        session.click("text=New List").await?;
        session
            .fill("input[placeholder='e.g., Tech Upgrade 2024']", "Emoji List")
            .await?;
        session.click("text=Emojis").await?;
        session.click("button:has-text('🎁')").await?;
        session.click("button[type='submit']").await?;

        session.wait_for_selector("text=Emoji List").await?;
        scn.evidence
            .capture(session, "wishlist_home_updated", false)
            .await?;

        session.click("text=Emoji List").await?;
        session
            .wait_for_condition("() => /\\/wishlist\\/.+/.test(window.location.pathname)")
            .await?;

        session.click("text=Add Item").await?;
        session
            .fill("input[placeholder='e.g., Wireless Headphones']", "Edit Me Item")
            .await?;

        session.click("text=+ New Category").await?;
        session
            .fill("input[placeholder='e.g., Electronics, Clothes...']", "Test Cat")
            .await?;
        session.click("button:has-text('Save Category')").await?;

        // The modal's own submit; the page also has an "Add Item" trigger.
        session.click("form button:has-text('Add Item')").await?;

        session.wait_for_selector("text=Edit Me Item").await?;

        session.scroll_to_bottom().await?;
        scn.evidence
            .capture(session, "wishlist_detail_updated", false)
            .await?;
        Ok(())
    })
    .await
}
