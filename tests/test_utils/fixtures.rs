//! Test Fixtures
//!
//! Recording page hooks and helpers for driving a synchronizer by hand.

use std::cell::RefCell;
use std::rc::Rc;

use tutordash_logs::timer::Millis;
use tutordash_logs::{Config, LogStreamSynchronizer, MemoryStore, PageHooks, ViewScope};

/// Synchronizer over an in-memory store and a plain text log
pub type TestSync = LogStreamSynchronizer<MemoryStore, Vec<String>>;

/// Ordered record of every page hook invocation
#[derive(Debug, Clone, Default)]
pub struct HookLog(Rc<RefCell<Vec<String>>>);

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page hooks that append their name to this log
    pub fn hooks(&self) -> PageHooks {
        let record = |name: &'static str| {
            let log = self.0.clone();
            move || log.borrow_mut().push(name.to_string())
        };
        let toasts = self.0.clone();
        PageHooks::new()
            .on_show_cancel_button(record("cancel"))
            .on_show_run_button(record("run"))
            .on_show_plugin_enable_bar(record("enable_bar"))
            .on_show_plugin_page_button(record("plugin_page"))
            .on_show_local_launch_button(record("local_launch"))
            .on_hide_toast(record("hide_toast"))
            .on_show_toast(move |toast| toasts.borrow_mut().push(format!("toast:{}", toast.title)))
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.borrow().iter().filter(|event| event.as_str() == name).count()
    }

    /// Toast titles shown so far
    pub fn toasts(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| event.strip_prefix("toast:"))
            .map(str::to_string)
            .collect()
    }
}

/// Encode chunk text as a stream frame
pub fn frame(text: &str) -> String {
    serde_json::to_string(text).expect("string encodes as JSON")
}

/// Synchronizer with default configuration, relevant to every command
pub fn synchronizer() -> (TestSync, HookLog) {
    synchronizer_with(Config::default(), ViewScope::All, MemoryStore::new())
}

pub fn synchronizer_with(config: Config, scope: ViewScope, store: MemoryStore) -> (TestSync, HookLog) {
    let log = HookLog::new();
    let sync = LogStreamSynchronizer::new(Vec::new(), store, config, log.hooks(), scope);
    (sync, log)
}

/// Deliver `chunks` one millisecond apart starting at `start`
pub fn feed(sync: &mut TestSync, start: Millis, chunks: &[&str]) -> Millis {
    let mut now = start;
    for chunk in chunks {
        sync.on_frame(now, &frame(chunk));
        now += 1;
    }
    now
}
