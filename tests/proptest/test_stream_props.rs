//! Property-based tests for the log-stream synchronizer
//!
//! These tests use proptest to generate random streams and verify the
//! once-only and ordering guarantees hold for all of them.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use proptest::prelude::*;
use test_utils::{frame, synchronizer, synchronizer_with};
use tutordash_logs::timer::Timers;
use tutordash_logs::{Config, KeyValueStore, MemoryStore, ViewScope};

fn chunk() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z ]{0,20}\n?",
        1 => Just("Success!".to_string()),
        1 => Just("Cancelled!".to_string()),
        1 => "[a-z]{0,5}".prop_map(|s| format!("{} Success! {}", s, s)),
    ]
}

proptest! {
    #[test]
    fn test_at_most_one_completion(chunks in prop::collection::vec(chunk(), 0..40)) {
        let (mut sync, log) = synchronizer();
        let mut completions = 0;
        for (t, chunk) in chunks.iter().enumerate() {
            let report = sync.on_frame(t as u64, &frame(chunk)).unwrap();
            if report.completed.is_some() {
                completions += 1;
            }
        }
        prop_assert!(completions <= 1);
        prop_assert!(log.count("run") <= 1);
        prop_assert!(log.toasts().len() <= 1);
        prop_assert!(log.count("cancel") <= 1);
    }

    #[test]
    fn test_malformed_frames_never_take_positions(
        chunks in prop::collection::vec("[a-z]{1,8}", 1..20),
        garbage in prop::collection::vec(prop::bool::ANY, 1..20),
    ) {
        let (mut sync, _) = synchronizer();
        let mut accepted = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            if garbage.get(i).copied().unwrap_or(false) {
                prop_assert!(sync.on_frame(i as u64, chunk).is_none());
            }
            let report = sync.on_frame(i as u64, &frame(chunk)).unwrap();
            prop_assert_eq!(report.index, accepted);
            accepted += 1;
        }
        prop_assert_eq!(sync.session().line_count, chunks.len());
        prop_assert_eq!(sync.session().lines(), chunks.as_slice());
    }

    #[test]
    fn test_following_viewport_tracks_content(lines in prop::collection::vec("[a-z]{0,10}\n", 1..60)) {
        let (mut sync, _) = synchronizer();
        sync.on_frame(0, &frame("log-1"));
        sync.on_frame(0, &frame("cmd"));
        for (t, line) in lines.iter().enumerate() {
            sync.on_frame(t as u64, &frame(line));
            let viewport = sync.viewport();
            prop_assert_eq!(viewport.bottom_edge(), viewport.scroll_height());
        }
        prop_assert!(sync.scroll_state().auto_follow);
    }

    #[test]
    fn test_identity_decides_new_command(stored in proptest::option::of("[a-z0-9-]{1,12}"), identity in "[a-z0-9-]{1,12}") {
        let mut store = MemoryStore::new();
        if let Some(stored) = &stored {
            store.set("last-log-file", stored, 1).unwrap();
        }
        let (mut sync, log) = synchronizer_with(Config::default(), ViewScope::All, store);
        let report = sync.on_frame(0, &frame(&identity)).unwrap();

        let expected_new = stored.as_deref() != Some(identity.as_str());
        prop_assert_eq!(report.classification.is_new_command, expected_new);
        prop_assert_eq!(log.count("cancel"), usize::from(expected_new));
        prop_assert_eq!(sync.store().get("last-log-file"), Some(identity));
    }

    #[test]
    fn test_timers_fire_in_deadline_order(delays in prop::collection::vec(0u64..1000, 1..30)) {
        let mut timers = Timers::new();
        for (i, delay) in delays.iter().enumerate() {
            timers.schedule(0, *delay, (*delay, i));
        }
        let fired = timers.fire_due(1000);
        prop_assert_eq!(fired.len(), delays.len());
        prop_assert!(fired.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert!(timers.is_empty());
    }
}
