//! Unit Tests for Viewport Follow Behaviour
//!
//! Auto-follow keeps the newest output visible until the user takes manual
//! control; the echo of a programmatic scroll must never count as user
//! intent.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use test_utils::{feed, frame, synchronizer, synchronizer_with};
use tutordash_logs::ui::{ScrollController, ScrollPolicy};
use tutordash_logs::{Config, MemoryStore, ViewScope};

fn controller() -> ScrollController {
    ScrollController::new(ScrollPolicy::default(), 10, 100.0)
}

#[test]
fn test_follow_keeps_bottom_at_content_height() {
    let (mut sync, _) = synchronizer();
    let lines: Vec<String> = (0..100).map(|i| format!("line {}\n", i)).collect();
    let mut chunks = vec!["log-1", "cmd"];
    chunks.extend(lines.iter().map(String::as_str));
    feed(&mut sync, 0, &chunks);

    let viewport = sync.viewport();
    assert_eq!(viewport.content_height, 100.0 * 16.0);
    assert_eq!(viewport.bottom_edge(), viewport.content_height);
    assert!(sync.scroll_state().auto_follow);
}

#[test]
fn test_wheel_stops_following() {
    let (mut sync, _) = synchronizer();
    let lines: Vec<String> = (0..50).map(|i| format!("line {}\n", i)).collect();
    let mut chunks = vec!["log-1", "cmd"];
    chunks.extend(lines.iter().map(String::as_str));
    let now = feed(&mut sync, 0, &chunks);
    let top = sync.viewport().scroll_top;

    sync.on_wheel();
    feed(&mut sync, now, &["more\n", "and more\n"]);

    assert!(!sync.scroll_state().auto_follow);
    assert_eq!(sync.viewport().scroll_top, top);
}

#[test]
fn test_programmatic_echo_is_ignored() {
    let mut scroll = controller();
    scroll.on_append(0, 500.0);
    assert!(scroll.state().is_programmatic_scroll);

    // The echo lands mid-way because layout had not settled yet
    scroll.on_user_scroll(120.0);
    assert!(scroll.is_following());

    scroll.tick(10);
    assert!(!scroll.state().is_programmatic_scroll);
}

#[test]
fn test_append_reschedules_guard_release() {
    let mut scroll = controller();
    scroll.on_append(0, 50.0);
    scroll.on_append(8, 50.0);
    assert_eq!(scroll.next_deadline(), Some(18));

    scroll.tick(10);
    assert!(scroll.state().is_programmatic_scroll);
    scroll.tick(18);
    assert!(!scroll.state().is_programmatic_scroll);
}

#[test]
fn test_scroll_up_then_back_to_bottom() {
    let mut scroll = controller();
    scroll.on_append(0, 1000.0);
    scroll.tick(10);

    scroll.on_user_scroll(200.0);
    assert!(!scroll.is_following());
    assert!(!scroll.on_append(20, 16.0));

    let bottom = scroll.viewport().max_scroll_top();
    scroll.on_user_scroll(bottom);
    assert!(scroll.is_following());
}

#[test]
fn test_strict_policy_never_resumes() {
    let mut config = Config::default();
    config.scroll.policy = ScrollPolicy::Strict;
    let (mut sync, _) = synchronizer_with(config, ViewScope::All, MemoryStore::new());
    feed(&mut sync, 0, &["log-1", "cmd", "out\n"]);
    sync.tick(100);

    let bottom = sync.viewport().max_scroll_top();
    sync.on_user_scroll(100, bottom);
    assert!(!sync.scroll_state().auto_follow);
}

#[test]
fn test_touch_start_stops_following() {
    let mut scroll = controller();
    scroll.on_touch_start();
    assert!(!scroll.is_following());
    assert!(!scroll.on_append(0, 16.0));
    assert_eq!(scroll.viewport().scroll_top, 0.0);
}

#[test]
fn test_short_content_stays_at_top() {
    let mut scroll = controller();
    scroll.on_append(0, 16.0);
    assert_eq!(scroll.viewport().scroll_top, 0.0);
    assert_eq!(scroll.viewport().distance_from_bottom(), 0.0);
}

#[test]
fn test_user_scroll_after_quiet_period_stops_following() {
    let (mut sync, _) = synchronizer();
    let mut chunks = vec!["log-1", "tutor local do init"];
    chunks.extend(std::iter::repeat("line\n").take(100));
    feed(&mut sync, 0, &chunks);
    assert!(sync.scroll_state().is_programmatic_scroll);

    // No timer loop ran; the scroll event itself releases the guard
    sync.on_user_scroll(5_000, 0.0);
    assert!(!sync.scroll_state().is_programmatic_scroll);
    assert!(!sync.scroll_state().auto_follow);

    sync.on_frame(5_001, &frame("more\n"));
    assert_eq!(sync.viewport().scroll_top, 0.0);
}
