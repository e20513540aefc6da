//! Log viewport follow behaviour
//!
//! The log panel follows new output until the user takes manual control.
//! Moving the viewport programmatically produces a scroll event of its own;
//! the controller raises a short-lived guard so that echo is not mistaken
//! for user intent. The guard is released by a cancelable timer.

use serde::{Deserialize, Serialize};

use crate::timer::{Millis, TimerId, Timers};

/// How a user scroll event affects following
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScrollPolicy {
    /// Any user scroll stops following
    Strict,
    /// Follow again when the user scrolls back to within `tolerance` of the bottom
    BottomAware { tolerance: f32 },
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        ScrollPolicy::BottomAware { tolerance: 1.0 }
    }
}

/// Geometry of the log viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Offset of the first visible pixel
    pub scroll_top: f32,
    /// Visible height
    pub client_height: f32,
    /// Height of all appended content
    pub content_height: f32,
}

impl Viewport {
    pub fn new(client_height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            client_height,
            content_height: 0.0,
        }
    }

    /// Scrollable height; never smaller than the viewport itself
    pub fn scroll_height(&self) -> f32 {
        self.content_height.max(self.client_height)
    }

    /// Largest valid `scroll_top`
    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height() - self.client_height).max(0.0)
    }

    /// Offset of the last visible pixel
    pub fn bottom_edge(&self) -> f32 {
        self.scroll_top + self.client_height
    }

    pub fn distance_from_bottom(&self) -> f32 {
        (self.scroll_height() - self.bottom_edge()).abs()
    }

    /// Move to `scroll_top`, clamped to the scrollable range
    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll_top());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }
}

/// Follow state of the log viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    /// Whether appends move the viewport to the bottom
    pub auto_follow: bool,
    /// Set while the echo of a programmatic scroll may still arrive
    pub is_programmatic_scroll: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            auto_follow: true,
            is_programmatic_scroll: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTask {
    ReleaseGuard,
}

/// Scroll-position controller for the log viewport
#[derive(Debug)]
pub struct ScrollController {
    state: ScrollState,
    viewport: Viewport,
    policy: ScrollPolicy,
    release_delay: Millis,
    release_timer: Option<TimerId>,
    timers: Timers<ScrollTask>,
}

impl ScrollController {
    /// Create a controller for a viewport of `client_height`
    pub fn new(policy: ScrollPolicy, release_delay: Millis, client_height: f32) -> Self {
        Self {
            state: ScrollState::default(),
            viewport: Viewport::new(client_height),
            policy,
            release_delay,
            release_timer: None,
            timers: Timers::new(),
        }
    }

    /// Create a controller from the scroll section of the configuration
    pub fn from_config(config: &crate::config::ScrollConfig) -> Self {
        Self::new(config.policy, config.release_delay_ms, config.client_height)
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_following(&self) -> bool {
        self.state.auto_follow
    }

    /// Content of `added_height` was appended. Returns whether the viewport moved.
    pub fn on_append(&mut self, now: Millis, added_height: f32) -> bool {
        self.viewport.content_height += added_height.max(0.0);
        if !self.state.auto_follow {
            return false;
        }

        self.state.is_programmatic_scroll = true;
        self.viewport.scroll_to_bottom();

        // Each append restarts the guard window
        if let Some(id) = self.release_timer.take() {
            self.timers.cancel(id);
        }
        self.release_timer = Some(
            self.timers
                .schedule(now, self.release_delay, ScrollTask::ReleaseGuard),
        );
        true
    }

    /// A scroll event left the viewport at `scroll_top`
    pub fn on_user_scroll(&mut self, scroll_top: f32) {
        self.viewport.set_scroll_top(scroll_top);
        if self.state.is_programmatic_scroll {
            trace!("Ignoring scroll echo at {}", scroll_top);
            return;
        }

        let follow = match self.policy {
            ScrollPolicy::Strict => false,
            ScrollPolicy::BottomAware { tolerance } => {
                self.viewport.distance_from_bottom() <= tolerance
            }
        };
        if follow != self.state.auto_follow {
            debug!("Auto-follow {}", if follow { "resumed" } else { "stopped" });
        }
        self.state.auto_follow = follow;
    }

    /// Mouse wheel input on the log viewport
    pub fn on_wheel(&mut self) {
        self.take_manual_control();
    }

    /// Touch start on the log viewport
    pub fn on_touch_start(&mut self) {
        self.take_manual_control();
    }

    fn take_manual_control(&mut self) {
        if self.state.auto_follow {
            debug!("Auto-follow stopped by manual input");
        }
        self.state.auto_follow = false;
    }

    /// Release the programmatic-scroll guard now
    pub fn on_programmatic_scroll_done(&mut self) {
        if let Some(id) = self.release_timer.take() {
            self.timers.cancel(id);
        }
        self.state.is_programmatic_scroll = false;
    }

    /// Fire timers due at `now`
    pub fn tick(&mut self, now: Millis) {
        for task in self.timers.fire_due(now) {
            match task {
                ScrollTask::ReleaseGuard => {
                    self.release_timer = None;
                    self.state.is_programmatic_scroll = false;
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// The viewport was resized
    pub fn resize(&mut self, client_height: f32) {
        self.viewport.client_height = client_height.max(0.0);
        if self.state.auto_follow {
            self.viewport.scroll_to_bottom();
        } else {
            let top = self.viewport.scroll_top;
            self.viewport.set_scroll_top(top);
        }
    }
}
