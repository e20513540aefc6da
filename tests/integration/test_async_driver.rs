//! Integration Tests for the Async Stream Driver
//!
//! These tests pump real tokio streams through a synchronizer and check
//! that frames and timers are processed in order.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::time::Duration;

use futures::stream::{self, StreamExt};
use test_utils::{frame, synchronizer, synchronizer_with};
use tokio::io::BufReader;
use tutordash_logs::models::Outcome;
use tutordash_logs::stream::{frames_from_reader, pump};
use tutordash_logs::ui::ToastPhase;
use tutordash_logs::{Config, Error, MemoryStore, ViewScope};

fn frames(chunks: &[&str]) -> Vec<String> {
    chunks.iter().map(|chunk| frame(chunk)).collect()
}

#[tokio::test]
async fn test_pump_settles_timers() {
    let (mut sync, log) = synchronizer();
    let input = stream::iter(frames(&["log-1", "$ tutor plugins install demo", "Done\n", "Success!"]));

    let report = pump(&mut sync, input).await.unwrap();

    assert_eq!(report.accepted, 4);
    assert_eq!(report.dropped, 0);
    assert_eq!(report.completed, Some(Outcome::Success));
    assert_eq!(log.toasts(), vec!["Plugin Installed Successfully"]);

    // Activation and scroll-guard release both fired before pump returned
    assert_eq!(sync.toast_phase(), ToastPhase::Active);
    assert!(!sync.scroll_state().is_programmatic_scroll);
    assert_eq!(sync.next_deadline(), None);
}

#[tokio::test]
async fn test_pump_counts_dropped_frames() {
    let (mut sync, _) = synchronizer();
    let input = stream::iter(vec![
        "garbage".to_string(),
        frame("log-1"),
        "[1, 2]".to_string(),
        frame("cmd"),
    ]);

    let report = pump(&mut sync, input).await.unwrap();
    assert_eq!(report.accepted, 2);
    assert_eq!(report.dropped, 2);
    assert_eq!(report.completed, None);
}

#[tokio::test]
async fn test_empty_stream_is_an_error() {
    let (mut sync, _) = synchronizer();
    let result = pump(&mut sync, stream::iter(Vec::<String>::new())).await;
    assert!(matches!(result, Err(Error::StreamClosedEarly)));
}

#[tokio::test]
async fn test_auto_dismiss_runs_while_stream_is_open() {
    let mut config = Config::default();
    config.toast.auto_dismiss_ms = Some(5);
    config.toast.remove_delay_ms = 10;
    let (mut sync, log) = synchronizer_with(config, ViewScope::All, MemoryStore::new());

    let chunks = frames(&["log-1", "tutor config save", "Success!"]);
    let head = stream::iter(chunks);
    let tail = stream::once(async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        frame("trailing output\n")
    });
    let input = Box::pin(head.chain(tail));

    let report = pump(&mut sync, input).await.unwrap();

    assert_eq!(report.accepted, 4);
    assert!(report.elapsed_ms >= 60);
    assert_eq!(log.count("hide_toast"), 1);
    assert_eq!(
        log.events().last().map(String::as_str),
        Some("hide_toast"),
        "toast must be removed before anything else happens"
    );
    assert_eq!(sync.toast_phase(), ToastPhase::Hidden);
}

#[tokio::test]
async fn test_pump_from_event_stream_reader() {
    let input: &[u8] = b"data: \"log-9\"\n\ndata: \"tutor local launch\"\n\n: ping\n\ndata: \"Cancelled!\"\n\n";
    let (mut sync, log) = synchronizer();

    let report = pump(&mut sync, frames_from_reader(BufReader::new(input)))
        .await
        .unwrap();

    assert_eq!(report.accepted, 3);
    assert_eq!(report.completed, Some(Outcome::Cancelled));
    assert!(log.toasts().is_empty());
    assert_eq!(log.count("run"), 1);
}

#[tokio::test]
async fn test_reconnect_between_pumps() {
    let (mut sync, log) = synchronizer();
    pump(&mut sync, stream::iter(frames(&["log-5", "cmd", "working\n"])))
        .await
        .unwrap();

    sync.reconnect();
    let report = pump(&mut sync, stream::iter(frames(&["log-5", "cmd", "working\n", "Success!"])))
        .await
        .unwrap();

    assert_eq!(report.completed, None);
    assert_eq!(log.count("cancel"), 1);
    assert_eq!(log.count("run"), 0);
    assert_eq!(sync.sink().len(), 3);
}
