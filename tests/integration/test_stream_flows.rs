//! Integration Tests for Log Stream Flows
//!
//! These tests drive a synchronizer through complete command streams and
//! check the page effects, the log container and the persisted record.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use test_utils::{feed, frame, synchronizer, synchronizer_with};
use tutordash_logs::models::{Outcome, ToastContent, ToastRule};
use tutordash_logs::ui::ToastPhase;
use tutordash_logs::{Config, KeyValueStore, MemoryStore, StreamLayout, ViewScope};

#[test]
fn test_plugin_install_end_to_end() {
    let (mut sync, log) = synchronizer();

    let report = sync.on_frame(0, &frame("session-123")).unwrap();
    assert!(report.classification.is_identity_chunk);
    assert!(report.classification.is_new_command);
    assert_eq!(log.events(), vec!["cancel"]);

    let report = sync.on_frame(1, &frame("$ tutor plugins install demo")).unwrap();
    assert!(report.classification.is_command_chunk);
    assert_eq!(sync.selected_toast().title, "Plugin Installed Successfully");
    assert!(!sync.selected_toast().show_footer);

    let report = sync.on_frame(2, &frame("Success!")).unwrap();
    assert_eq!(report.completed.map(|c| c.outcome), Some(Outcome::Success));

    assert_eq!(log.toasts(), vec!["Plugin Installed Successfully"]);
    assert_eq!(log.count("run"), 1);
    assert_eq!(log.count("cancel"), 1);
    assert_eq!(
        sync.store().get("last-log-file"),
        Some("session-123".to_string())
    );
}

#[test]
fn test_reload_during_running_command() {
    let (mut sync, log) = synchronizer();
    feed(&mut sync, 0, &["log-42", "$ tutor config save", "Saving...\n"]);
    assert_eq!(log.count("cancel"), 1);

    // Page reload: same store, new connection replaying the log
    let (store, _) = sync.into_parts();
    let (mut sync, log) = synchronizer_with(Config::default(), ViewScope::All, store);
    feed(&mut sync, 10, &["log-42", "$ tutor config save", "Saving...\n", "Success!"]);

    assert!(log.events().is_empty(), "reconnect fired {:?}", log.events());
    assert!(!sync.session().is_new_command);
    assert_eq!(sync.session().completed, Some(Outcome::Success));
    assert_eq!(sync.sink(), &vec!["Saving...\n".to_string(), "Success!".to_string()]);
}

#[test]
fn test_cancelled_command() {
    let (mut sync, log) = synchronizer();
    feed(&mut sync, 0, &["log-7", "$ tutor plugins upgrade indigo", "Cancelled!"]);

    assert_eq!(
        log.events(),
        vec!["cancel", "run", "enable_bar", "plugin_page", "local_launch"]
    );
    assert!(log.toasts().is_empty());
    assert_eq!(sync.toast_phase(), ToastPhase::Hidden);
    assert_eq!(sync.session().completed, Some(Outcome::Cancelled));
}

#[test]
fn test_blank_toast_title_still_reenables_run() {
    let mut config = Config::default();
    config.toast.table.rules.insert(
        0,
        ToastRule::new("plugins install", ToastContent::new("  ", "", false)),
    );
    let (mut sync, log) = synchronizer_with(config, ViewScope::All, MemoryStore::new());
    feed(&mut sync, 0, &["log-1", "tutor plugins install demo", "Success!"]);

    assert!(log.toasts().is_empty());
    assert_eq!(log.count("run"), 1);
    assert_eq!(sync.toast_phase(), ToastPhase::Hidden);
}

#[test]
fn test_marker_fires_only_once() {
    let (mut sync, log) = synchronizer();
    feed(
        &mut sync,
        0,
        &["log-1", "tutor config save", "Success!", "Success!", "Cancelled!"],
    );

    assert_eq!(log.count("run"), 1);
    assert_eq!(log.toasts().len(), 1);
    assert_eq!(sync.sink().len(), 3);
}

#[test]
fn test_merged_layout_uses_fallback_toast() {
    let mut config = Config::default();
    config.stream.layout = StreamLayout::Merged;
    let (mut sync, log) = synchronizer_with(config, ViewScope::All, MemoryStore::new());
    feed(&mut sync, 0, &["log-1", "$ tutor plugins install demo", "Success!"]);

    assert_eq!(sync.sink().len(), 2);
    assert_eq!(log.toasts(), vec!["Command executed successfully"]);
}

#[test]
fn test_unrelated_view_appends_without_effects() {
    let scope = ViewScope::Prefixes(vec!["plugins".to_string()]);
    let (mut sync, log) = synchronizer_with(Config::default(), scope, MemoryStore::new());
    feed(&mut sync, 0, &["log-1", "$ tutor local launch", "Starting\n", "Success!"]);

    assert_eq!(log.events(), vec!["cancel"]);
    assert_eq!(sync.sink().len(), 2);
}

#[test]
fn test_finished_stream_first_chunk_marker() {
    let mut store = MemoryStore::new();
    store.set("last-log-file", "old", 1).unwrap();
    let (mut sync, log) = synchronizer_with(Config::default(), ViewScope::All, store);
    feed(&mut sync, 0, &["Success!"]);

    assert!(log.events().is_empty());
    assert_eq!(sync.sink(), &vec!["Success!".to_string()]);
    assert_eq!(sync.store().get("last-log-file"), Some("old".to_string()));
}

#[test]
fn test_malformed_frames_do_not_shift_positions() {
    let (mut sync, log) = synchronizer();
    assert!(sync.on_frame(0, "not-json").is_none());
    sync.on_frame(1, &frame("log-1"));
    assert!(sync.on_frame(2, "{\"a\":1}").is_none());
    sync.on_frame(3, &frame("tutor plugins enable indigo"));
    sync.on_frame(4, &frame("Success!"));

    assert_eq!(sync.session().line_count, 3);
    assert_eq!(log.toasts(), vec!["Your plugin was successfully enabled"]);
}

#[test]
fn test_output_is_appended_verbatim() {
    let (mut sync, _) = synchronizer();
    feed(&mut sync, 0, &["log-1", "cmd", "<b>not markup</b>\n"]);
    assert_eq!(sync.sink(), &vec!["<b>not markup</b>\n".to_string()]);
}
