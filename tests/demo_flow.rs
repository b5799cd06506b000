// Demo bootstrap under a paused clock: the two timers fire at their
// configured delays, never before, and stay independent of each other.

use packlab::config::DemoConfig;
use packlab::demo::{bootstrap, shutdown_on_quit, ASYNC_DONE};
use packlab::fixtures::{CsvTable, FixtureSet, XmlNode};
use packlab::tui::state::AppState;
use packlab::tui::TuiCommand;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

fn fixtures() -> FixtureSet {
    FixtureSet {
        json: serde_json::json!({ "title": "demo" }),
        xml: XmlNode {
            tag: "note".to_string(),
            text: String::new(),
            children: Vec::new(),
        },
        csv: CsvTable {
            header: vec!["name".to_string(), "value".to_string()],
            rows: vec![vec!["first".to_string(), "1".to_string()]],
        },
    }
}

fn demo_config() -> DemoConfig {
    DemoConfig::default()
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_rewritten_after_post_delay() {
    let config = demo_config();
    let (state_tx, state_rx) = watch::channel(AppState::new(&config.mount_id));
    let handles = bootstrap(&config, &fixtures(), &state_tx).unwrap();

    // Mounted synchronously: tree and empty placeholder present at once.
    {
        let state = state_rx.borrow();
        let pre = state.document.select_tag("pre").unwrap();
        assert!(pre.text.is_empty());
        assert!(!pre.has_class("code"));
        assert_eq!(state.document.select_tag("h1").unwrap().text, "Webpack training");
    }

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(!state_rx.borrow().document.select_tag("pre").unwrap().has_class("code"));

    tokio::time::sleep(Duration::from_millis(2)).await;
    handles.post_task.join().await;

    let state = state_rx.borrow();
    let pre = state.document.select_tag("pre").unwrap();
    assert!(pre.has_class("code"));
    assert_eq!(pre.text, handles.post.to_string());
    assert!(pre.text.contains("Webpack Post Title"));
    assert!(pre.text.contains("assets/images/icon.svg"));
}

#[tokio::test(start_paused = true)]
async fn test_banner_resolves_exactly_at_delay() {
    let config = demo_config();
    let (state_tx, state_rx) = watch::channel(AppState::new(&config.mount_id));
    let handles = bootstrap(&config, &fixtures(), &state_tx).unwrap();

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert!(state_rx.borrow().banner.is_none());

    tokio::time::sleep(Duration::from_millis(2)).await;
    handles.banner_task.join().await;

    let state = state_rx.borrow();
    assert_eq!(state.banner.as_deref(), Some(ASYNC_DONE));
    assert!(state.logs.iter().any(|l| l.message == ASYNC_DONE));
}

#[tokio::test(start_paused = true)]
async fn test_timers_are_independent() {
    // Cancelling the banner must not stop the placeholder rewrite.
    let config = demo_config();
    let (state_tx, state_rx) = watch::channel(AppState::new(&config.mount_id));
    let handles = bootstrap(&config, &fixtures(), &state_tx).unwrap();

    handles.banner_task.cancel();
    tokio::time::sleep(Duration::from_millis(2100)).await;
    handles.post_task.join().await;

    let state = state_rx.borrow();
    assert!(state.banner.is_none());
    assert!(state.document.select_tag("pre").unwrap().has_class("code"));
}

#[tokio::test(start_paused = true)]
async fn test_fixture_values_logged_before_timers() {
    let config = demo_config();
    let (state_tx, state_rx) = watch::channel(AppState::new(&config.mount_id));
    let _handles = bootstrap(&config, &fixtures(), &state_tx).unwrap();

    let state = state_rx.borrow();
    let levels: Vec<&str> = state.logs.iter().map(|l| l.level.as_str()).collect();
    assert_eq!(levels, vec!["JSON", "XML", "CSV"]);
    // The values themselves land in the log, not a summary of them.
    assert!(state.logs[0].message.contains("demo"));
    assert_eq!(state.logs[1].message, "<note></note>");
    assert_eq!(state.logs[2].message, "name,value | first,1");
}

#[tokio::test(start_paused = true)]
async fn test_quit_command_cancels_pending_timers() {
    let config = demo_config();
    let (state_tx, state_rx) = watch::channel(AppState::new(&config.mount_id));
    let handles = bootstrap(&config, &fixtures(), &state_tx).unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    cmd_tx.send(TuiCommand::Quit).await.unwrap();
    shutdown_on_quit(cmd_rx, &handles).await;

    // Well past both delays: neither timer fires after the quit.
    tokio::time::sleep(Duration::from_millis(3000)).await;
    let state = state_rx.borrow();
    assert!(state.banner.is_none());
    assert!(!state.document.select_tag("pre").unwrap().has_class("code"));
}

#[tokio::test(start_paused = true)]
async fn test_missing_mount_point_is_an_error() {
    let mut config = demo_config();
    config.mount_id = "app".to_string();
    // State built with a different mount id than the config asks for.
    let (state_tx, _state_rx) = watch::channel(AppState::new("root"));
    assert!(bootstrap(&config, &fixtures(), &state_tx).is_err());
}
