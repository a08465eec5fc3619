//! Query-parameter prefill, the download filename contract, and the share
//! control.
//!
//! The suggested filename must carry the sanitized link text; the exact
//! `<stem>-<timestamp>.png` shape stays a soft check since only the prefix
//! is deterministic.

use std::process::ExitCode;

use ytools_verify::{naming, scenario, HarnessConfig, HarnessError};

const TEST_LINK: &str = "myapp://param/test";

#[tokio::main]
async fn main() -> ExitCode {
    ytools_verify::init_logging();
    let config = HarnessConfig::from_env();
    let options = config.session_options().with_permission("camera");

    scenario::run("deeplink_share", config, options, |scn| async move {
        let session = &scn.session;

        let encoded: String = url::form_urlencoded::byte_serialize(TEST_LINK.as_bytes()).collect();
        session
            .navigate(&format!("/deeplink-opener?link={encoded}"))
            .await?;

        // The input is populated asynchronously from the query parameter.
        session
            .wait_for_condition(&format!(
                "() => {{ const i = document.querySelector('input'); return i && i.value === '{TEST_LINK}'; }}"
            ))
            .await?;

        scn.probe.require(
            "open control visible once the input is populated",
            session.count("button[title='Open']").await?,
            |n| *n > 0,
        )?;

        let generate = session
            .resolve_selector(&[
                "button[title='Generate QR Code']",
                "button:has(.lucide-qr-code)",
            ])
            .await?;
        session.click(&generate).await?;
        session.wait_for_selector("#qrcode-svg").await?;

        let download = session
            .await_download("button:has-text('Download')")
            .await?;
        let stem = naming::sanitized_stem(TEST_LINK);
        scn.probe.require(
            "download filename carries the sanitized link text",
            download.suggested_filename.as_str(),
            |f| f.contains(&stem),
        )?;
        scn.probe.check(
            "download filename is <stem>-<timestamp>.png",
            download.suggested_filename.as_str(),
            |f| naming::download_name_matches(f, TEST_LINK),
        );

        // Headless engines without the Web Share API answer the share
        // button with an alert; a browser that opens a native share sheet
        // raises no dialog at all, which is equally fine.
        match session.await_dialog("button:has-text('Share')", true).await {
            Ok(dialog) => {
                scn.probe.check(
                    "share fallback alert carries a message",
                    &dialog.message,
                    |m| !m.is_empty(),
                );
            }
            Err(HarnessError::WaitTimeout { .. }) => {}
            Err(e) => return Err(e),
        }

        Ok(())
    })
    .await
}
