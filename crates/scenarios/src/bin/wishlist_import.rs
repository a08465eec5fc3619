//! JSON import round trip: seed a list through the storage back door,
//! upload a two-record fixture, and require both titles to appear exactly
//! once without a reload.

use std::process::ExitCode;

use chrono::Utc;
use ytools_verify::{fixture, scenario, HarnessConfig, ImportRecord};

const LIST_ID: &str = "test-list-import";
const LIST_TITLE: &str = "Import Test List";

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options();

    scenario::run("wishlist_import", config, options, |scn| async move {
        let session = &scn.session;

        let records = vec![
            ImportRecord::new("imported-item-1", "Imported Item 1")
                .with_url("https://example.com/1")
                .with_category("some-cat"),
            ImportRecord::new("imported-item-2", "Imported Item 2"),
        ];
        let fixture_path =
            fixture::write_import_fixture(&scn.config.fixture_dir, "import_test.json", &records)?;

        // The import flow confirms via a native dialog.
        session.accept_dialogs().await?;

        session.navigate("/wishlist").await?;

        let now = Utc::now().timestamp_millis();
        let list = serde_json::json!({
            "id": LIST_ID,
            "title": LIST_TITLE,
            "description": "Exercises the import flow",
            "color": "bg-green-500",
            "iconName": "Download",
            "createdAt": now,
            "updatedAt": now,
        });
        session.put_record("wishlist-db", 1, "lists", &list).await?;

        session.navigate(&format!("/wishlist/{LIST_ID}")).await?;
        session
            .wait_for_selector(&format!("text={LIST_TITLE}"))
            .await?;

        session
            .upload_file("input[type='file']", &fixture_path)
            .await?;

        session.wait_for_selector("text=Imported Item 1").await?;
        session.wait_for_selector("text=Imported Item 2").await?;
        for record in &records {
            scn.probe.require(
                &format!("'{}' rendered exactly once", record.title),
                session.count(&format!("text=\"{}\"", record.title)).await?,
                |n| *n == 1,
            )?;
        }

        session.scroll_to_bottom().await?;
        // Entry animation has no completion signal.
        session.sleep(1000).await;
        scn.evidence
            .capture(session, "verification_import", true)
            .await?;
        Ok(())
    })
    .await
}
