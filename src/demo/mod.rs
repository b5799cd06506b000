pub mod dom;
pub mod post;
pub mod scheduler;

use crate::config::DemoConfig;
use crate::fixtures::FixtureSet;
use crate::tui::state::AppState;
use crate::tui::TuiCommand;
use anyhow::Result;
use dom::Element;
use post::Post;
use scheduler::DelayedTask;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Constant the banner timer resolves to.
pub const ASYNC_DONE: &str = "Async done.";

/// The asynchronous wait from the original page: sleeps for the configured
/// delay, then resolves to the constant string. Never resolves early.
pub async fn banner_wait(delay: Duration) -> &'static str {
    tokio::time::sleep(delay).await;
    ASYNC_DONE
}

/// Handles for the two scheduled tasks, so callers can cancel or await them.
/// The tasks are deliberately uncoordinated, as in the original page.
#[derive(Debug)]
pub struct Bootstrap {
    pub post: Post,
    pub banner_task: DelayedTask,
    pub post_task: DelayedTask,
}

/// Run the page bootstrap against the shared app state.
///
/// Order follows the original page load: display object, fixture logging,
/// banner timer, synchronous mount, post timer.
pub fn bootstrap(
    config: &DemoConfig,
    fixtures: &FixtureSet,
    state_tx: &watch::Sender<AppState>,
) -> Result<Bootstrap> {
    // (1) Display object.
    let post = Post::new(&config.post_title, &config.post_image);

    // (2) Log the three fixture values.
    log_fixtures(fixtures, state_tx);

    // (3) Banner timer: fixed wait, constant string, then log. The wait
    // itself lives in the DelayedTask; the body only sees the result.
    let banner_tx = state_tx.clone();
    let banner_task = DelayedTask::spawn(Duration::from_millis(config.banner_delay_ms), async move {
        let message = ASYNC_DONE;
        tracing::info!(message, "banner resolved");
        banner_tx.send_modify(|s| {
            s.banner = Some(message.to_string());
            s.push_log("ASYNC", message.to_string());
        });
    });

    // (4) Synchronous mount of the static UI tree.
    let mut document = state_tx.borrow().document.clone();
    document.mount(&config.mount_id, app_tree())?;
    state_tx.send_modify(|s| s.document = document);
    tracing::debug!(mount = %config.mount_id, "UI tree mounted");

    // (5) Post timer: restyle and fill the pre-existing placeholder.
    let post_tx = state_tx.clone();
    let rendered = post.to_string();
    let post_task = DelayedTask::spawn(Duration::from_millis(config.post_delay_ms), async move {
        post_tx.send_modify(|s| match s.document.select_tag_mut("pre") {
            Some(placeholder) => {
                placeholder.add_class("code");
                placeholder.set_text(&rendered);
            }
            None => tracing::warn!("placeholder <pre> not found"),
        });
        post_tx.send_modify(|s| s.push_log("DOM", "placeholder rewritten".to_string()));
    });

    Ok(Bootstrap {
        post,
        banner_task,
        post_task,
    })
}

/// Tear down the scheduled timers when the quit command arrives.
pub async fn shutdown_on_quit(mut cmd_rx: mpsc::Receiver<TuiCommand>, handles: &Bootstrap) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            TuiCommand::Quit => {
                handles.banner_task.cancel();
                handles.post_task.cancel();
                return;
            }
        }
    }
}

// The loaded values themselves are logged, as the original page does.
fn log_fixtures(fixtures: &FixtureSet, state_tx: &watch::Sender<AppState>) {
    let json = fixtures.json.to_string();
    let xml = fixtures.xml.to_string();
    let csv = fixtures.csv.to_string();
    tracing::info!(%json, "JSON fixture");
    tracing::info!(%xml, "XML fixture");
    tracing::info!(%csv, "CSV fixture");
    state_tx.send_modify(|s| {
        s.push_log("JSON", json);
        s.push_log("XML", xml);
        s.push_log("CSV", csv);
    });
}

/// The static UI tree: one container with the heading, the logo block, the
/// empty placeholder, and a section per stylesheet dialect.
pub fn app_tree() -> Element {
    Element::new("div")
        .with_class("container")
        .child(Element::new("h1").with_text("Webpack training"))
        .child(Element::new("div").with_class("logo"))
        .child(Element::new("pre"))
        .child(
            Element::new("div")
                .with_class("less-demo")
                .child(Element::new("h2").with_text("Less")),
        )
        .child(
            Element::new("div")
                .with_class("scss-demo")
                .child(Element::new("h2").with_text("Scss")),
        )
        .child(
            Element::new("div")
                .with_class("sass-demo")
                .child(Element::new("h2").with_text("Sass")),
        )
}
