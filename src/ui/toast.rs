//! Toast lifecycle
//!
//! A toast is displayed, activated a moment later so its transition can
//! run, deactivated on dismiss and finally removed once the fade-out is
//! over. Every delayed step is a cancelable timer: dismissing a toast
//! cancels its pending activation and auto-dismiss, showing it again
//! cancels a pending removal.

use crate::config::ToastConfig;
use crate::models::ToastContent;
use crate::timer::{Millis, TimerId, Timers};

/// Visible state of the toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPhase {
    #[default]
    Hidden,
    /// Laid out but not yet active
    Displayed,
    Active,
    /// Deactivated, waiting for removal
    Fading,
}

/// Change produced by a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTransition {
    Activated,
    Deactivated,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastTask {
    Activate,
    AutoDismiss,
    Remove,
}

#[derive(Debug)]
pub struct ToastController {
    phase: ToastPhase,
    content: Option<ToastContent>,
    activate_delay: Millis,
    remove_delay: Millis,
    auto_dismiss: Option<Millis>,
    timers: Timers<ToastTask>,
    activate_timer: Option<TimerId>,
    dismiss_timer: Option<TimerId>,
    remove_timer: Option<TimerId>,
}

impl ToastController {
    pub fn new(activate_delay: Millis, remove_delay: Millis, auto_dismiss: Option<Millis>) -> Self {
        Self {
            phase: ToastPhase::Hidden,
            content: None,
            activate_delay,
            remove_delay,
            auto_dismiss,
            timers: Timers::new(),
            activate_timer: None,
            dismiss_timer: None,
            remove_timer: None,
        }
    }

    pub fn from_config(config: &ToastConfig) -> Self {
        Self::new(
            config.activate_delay_ms,
            config.remove_delay_ms,
            config.auto_dismiss_ms,
        )
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Content of the toast currently on screen
    pub fn content(&self) -> Option<&ToastContent> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ToastPhase::Hidden
    }

    /// Display `content`, replacing whatever toast is on screen
    pub fn show(&mut self, now: Millis, content: ToastContent) {
        cancel_timer(&mut self.timers, &mut self.activate_timer);
        cancel_timer(&mut self.timers, &mut self.dismiss_timer);
        cancel_timer(&mut self.timers, &mut self.remove_timer);

        debug!("Showing toast '{}'", content.title);
        self.phase = ToastPhase::Displayed;
        self.content = Some(content);
        self.activate_timer = Some(self.timers.schedule(now, self.activate_delay, ToastTask::Activate));
        if let Some(delay) = self.auto_dismiss {
            self.dismiss_timer = Some(self.timers.schedule(
                now,
                self.activate_delay.saturating_add(delay),
                ToastTask::AutoDismiss,
            ));
        }
    }

    /// Start hiding the toast. Returns false when it is already hidden or fading.
    pub fn dismiss(&mut self, now: Millis) -> bool {
        if matches!(self.phase, ToastPhase::Hidden | ToastPhase::Fading) {
            return false;
        }
        cancel_timer(&mut self.timers, &mut self.activate_timer);
        cancel_timer(&mut self.timers, &mut self.dismiss_timer);

        self.phase = ToastPhase::Fading;
        self.remove_timer = Some(self.timers.schedule(now, self.remove_delay, ToastTask::Remove));
        true
    }

    /// Fire timers due at `now`
    pub fn tick(&mut self, now: Millis) -> Vec<ToastTransition> {
        let mut transitions = Vec::new();
        for task in self.timers.fire_due(now) {
            match task {
                ToastTask::Activate => {
                    self.activate_timer = None;
                    if self.phase == ToastPhase::Displayed {
                        self.phase = ToastPhase::Active;
                        transitions.push(ToastTransition::Activated);
                    }
                }
                ToastTask::AutoDismiss => {
                    self.dismiss_timer = None;
                    if self.dismiss(now) {
                        transitions.push(ToastTransition::Deactivated);
                    }
                }
                ToastTask::Remove => {
                    self.remove_timer = None;
                    self.phase = ToastPhase::Hidden;
                    self.content = None;
                    transitions.push(ToastTransition::Removed);
                }
            }
        }
        // An auto-dismiss may have scheduled a removal that is already due
        if transitions.last() == Some(&ToastTransition::Deactivated) {
            transitions.extend(self.tick(now));
        }
        transitions
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}

fn cancel_timer(timers: &mut Timers<ToastTask>, slot: &mut Option<TimerId>) {
    if let Some(id) = slot.take() {
        timers.cancel(id);
    }
}

impl Default for ToastController {
    fn default() -> Self {
        Self::from_config(&ToastConfig::default())
    }
}
