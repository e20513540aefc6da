//! Log-stream synchronizer
//!
//! Ties the pieces together for one log panel: every frame of the event
//! stream is decoded, classified, checked for terminal markers, appended to
//! the log container and followed by the viewport, strictly in arrival
//! order. User input on the viewport and the toast close button come in
//! through the same object, and all delayed effects run from [`tick`].
//!
//! [`tick`]: LogStreamSynchronizer::tick

use crate::config::Config;
use crate::launch;
use crate::models::{decode_frame, Classification, Outcome, StreamSession, ToastContent};
use crate::store::{CommandRecord, KeyValueStore};
use crate::stream::classifier::StreamClassifier;
use crate::stream::notifier::{Completed, NotifyContext, TerminalNotifier};
use crate::timer::Millis;
use crate::ui::{
    LogSink, PageHooks, ScrollController, ScrollState, ToastController, ToastPhase,
    ToastTransition, ViewScope, Viewport,
};

/// What happened to one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    /// Position of the chunk in its stream
    pub index: usize,
    pub classification: Classification,
    /// Completion fired by this chunk
    pub completed: Option<Completed>,
    /// Whether the chunk was appended to the log container
    pub appended: bool,
}

/// Log-stream and command-lifecycle synchronizer for one log panel
pub struct LogStreamSynchronizer<K: KeyValueStore, S: LogSink> {
    config: Config,
    store: K,
    sink: S,
    hooks: PageHooks,
    scope: ViewScope,
    classifier: StreamClassifier,
    notifier: TerminalNotifier,
    scroll: ScrollController,
    toast: ToastController,
    session: StreamSession,
    toast_content: ToastContent,
}

impl<K: KeyValueStore, S: LogSink> LogStreamSynchronizer<K, S> {
    /// Create a synchronizer writing into `sink`
    pub fn new(sink: S, store: K, config: Config, hooks: PageHooks, scope: ViewScope) -> Self {
        let classifier = StreamClassifier::new(
            config.stream.layout,
            CommandRecord::from_config(&config.record),
        );
        let scroll = ScrollController::from_config(&config.scroll);
        let toast = ToastController::from_config(&config.toast);
        let toast_content = config.toast.table.fallback.clone();

        Self {
            config,
            store,
            sink,
            hooks,
            scope,
            classifier,
            notifier: TerminalNotifier::new(),
            scroll,
            toast,
            session: StreamSession::new(),
            toast_content,
        }
    }

    /// Attach to a page. Without a log container there is nothing to drive,
    /// so this returns `None` instead of failing.
    pub fn attach(
        sink: Option<S>,
        store: K,
        config: Config,
        hooks: PageHooks,
        scope: ViewScope,
    ) -> Option<Self> {
        match sink {
            Some(sink) => Some(Self::new(sink, store, config, hooks, scope)),
            None => {
                debug!("No log container on this page, log streaming disabled");
                None
            }
        }
    }

    /// Handle one raw frame from the event source.
    ///
    /// A frame that is not a JSON string is dropped with a warning and does
    /// not take a chunk position.
    pub fn on_frame(&mut self, now: Millis, raw: &str) -> Option<ChunkReport> {
        match decode_frame(raw) {
            Ok(text) => Some(self.on_chunk(now, text)),
            Err(e) => {
                warn!("Dropping stream frame for session {}: {}", self.session.id, e);
                None
            }
        }
    }

    /// Handle one decoded chunk
    pub fn on_chunk(&mut self, now: Millis, text: String) -> ChunkReport {
        self.tick(now);

        let index = self.session.push_line(text.clone());
        let classification =
            self.classifier
                .classify(&mut self.session, index, &text, &mut self.store);

        let mut completed = None;
        let mut appended = false;

        if classification.is_identity_chunk {
            self.toast_content = self.config.toast.table.fallback.clone();
            if classification.is_new_command {
                self.hooks.show_cancel_button();
            }
        } else if classification.is_command_chunk {
            self.toast_content = self
                .config
                .toast
                .table
                .select(self.session.command_line.as_deref())
                .clone();
            debug!("Selected toast '{}'", self.toast_content.title);
        } else {
            let context = NotifyContext {
                is_new_command: self.session.is_new_command,
                on_relevant_view: self.scope.is_relevant(self.session.command_line.as_deref()),
            };
            completed = self.notifier.on_chunk(&text, context);
            if self.session.completed.is_none() {
                self.session.completed = self.notifier.latched().and_then(|m| m.outcome());
            }
            if let Some(event) = completed {
                self.complete(now, event);
            }

            self.sink.append_text(&text);
            appended = true;
            let height = text.lines().count().max(1) as f32 * self.config.scroll.line_height;
            self.scroll.on_append(now, height);
        }

        ChunkReport {
            index,
            classification,
            completed,
            appended,
        }
    }

    fn complete(&mut self, now: Millis, event: Completed) {
        info!(
            "Command '{}' ended: {:?}",
            self.session.command_line.as_deref().unwrap_or("unknown"),
            event.outcome
        );
        if event.outcome == Outcome::Success {
            if self.toast_content.is_displayable() {
                self.toast.show(now, self.toast_content.clone());
                self.hooks.show_toast(&self.toast_content);
            } else {
                debug!("Toast title is blank, not showing it");
            }
            let launched = self
                .session
                .command_line
                .as_deref()
                .is_some_and(launch::is_launch_command);
            if launched {
                let key = &self.config.record.launch_required_key;
                if let Err(e) = launch::clear_launch_required(&mut self.store, key) {
                    warn!("Failed to clear '{}': {}", key, e);
                }
            }
        }
        self.hooks.show_run_button();
        self.hooks.view_follow_up();
    }

    /// Fire every timer due at `now`
    pub fn tick(&mut self, now: Millis) {
        self.scroll.tick(now);
        for transition in self.toast.tick(now) {
            if transition == ToastTransition::Removed {
                self.hooks.hide_toast();
            }
        }
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.scroll.next_deadline(), self.toast.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// A scroll event on the log viewport at `now`
    pub fn on_user_scroll(&mut self, now: Millis, scroll_top: f32) {
        self.tick(now);
        self.scroll.on_user_scroll(scroll_top);
    }

    pub fn on_wheel(&mut self) {
        self.scroll.on_wheel();
    }

    pub fn on_touch_start(&mut self) {
        self.scroll.on_touch_start();
    }

    /// Toast close button. Returns false when there was nothing to dismiss.
    pub fn dismiss_toast(&mut self, now: Millis) -> bool {
        self.tick(now);
        self.toast.dismiss(now)
    }

    /// Start over for a newly opened stream; the store keeps the identity
    pub fn reconnect(&mut self) {
        debug!("Replacing session {}", self.session.id);
        self.session = StreamSession::new();
        self.notifier.reset();
        self.toast_content = self.config.toast.table.fallback.clone();
    }

    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    /// Toast content selected for the current command
    pub fn selected_toast(&self) -> &ToastContent {
        &self.toast_content
    }

    pub fn toast_phase(&self) -> ToastPhase {
        self.toast.phase()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn viewport(&self) -> &Viewport {
        self.scroll.viewport()
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the store and the log container
    pub fn into_parts(self) -> (K, S) {
        (self.store, self.sink)
    }
}

impl<K: KeyValueStore, S: LogSink> std::fmt::Debug for LogStreamSynchronizer<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStreamSynchronizer")
            .field("session", &self.session.id)
            .field("line_count", &self.session.line_count)
            .field("hooks", &self.hooks)
            .field("scope", &self.scope)
            .field("scroll", &self.scroll.state())
            .field("toast", &self.toast.phase())
            .finish_non_exhaustive()
    }
}
