//! Page capability interface
//!
//! Pages hosting the log panel decide what "show the run button" or "reveal
//! the plugin enable bar" means. They hand the synchronizer a [`PageHooks`]
//! with the handlers they support; every handler left unset is a no-op.

use serde::{Deserialize, Serialize};

use crate::models::{normalize_command, ToastContent};

type Hook = Box<dyn FnMut()>;
type ToastHook = Box<dyn FnMut(&ToastContent)>;

/// Optional page-specific handlers
#[derive(Default)]
pub struct PageHooks {
    show_cancel_button: Option<Hook>,
    show_run_button: Option<Hook>,
    show_plugin_enable_bar: Option<Hook>,
    show_plugin_page_button: Option<Hook>,
    show_local_launch_button: Option<Hook>,
    deactivate_inputs: Option<Hook>,
    activate_inputs: Option<Hook>,
    show_toast: Option<ToastHook>,
    hide_toast: Option<Hook>,
}

impl PageHooks {
    /// Hooks with every handler unset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_show_cancel_button(mut self, hook: impl FnMut() + 'static) -> Self {
        self.show_cancel_button = Some(Box::new(hook));
        self
    }

    pub fn on_show_run_button(mut self, hook: impl FnMut() + 'static) -> Self {
        self.show_run_button = Some(Box::new(hook));
        self
    }

    pub fn on_show_plugin_enable_bar(mut self, hook: impl FnMut() + 'static) -> Self {
        self.show_plugin_enable_bar = Some(Box::new(hook));
        self
    }

    pub fn on_show_plugin_page_button(mut self, hook: impl FnMut() + 'static) -> Self {
        self.show_plugin_page_button = Some(Box::new(hook));
        self
    }

    pub fn on_show_local_launch_button(mut self, hook: impl FnMut() + 'static) -> Self {
        self.show_local_launch_button = Some(Box::new(hook));
        self
    }

    /// Disable page inputs and show the command-running banner
    pub fn on_deactivate_inputs(mut self, hook: impl FnMut() + 'static) -> Self {
        self.deactivate_inputs = Some(Box::new(hook));
        self
    }

    /// Re-enable page inputs and hide the command-running banner
    pub fn on_activate_inputs(mut self, hook: impl FnMut() + 'static) -> Self {
        self.activate_inputs = Some(Box::new(hook));
        self
    }

    pub fn on_show_toast(mut self, hook: impl FnMut(&ToastContent) + 'static) -> Self {
        self.show_toast = Some(Box::new(hook));
        self
    }

    pub fn on_hide_toast(mut self, hook: impl FnMut() + 'static) -> Self {
        self.hide_toast = Some(Box::new(hook));
        self
    }

    /// A new command started: cancel controls in, inputs locked
    pub(crate) fn show_cancel_button(&mut self) {
        fire(&mut self.show_cancel_button);
        fire(&mut self.deactivate_inputs);
    }

    /// The command ended: run controls back, inputs unlocked
    pub(crate) fn show_run_button(&mut self) {
        fire(&mut self.show_run_button);
        fire(&mut self.activate_inputs);
    }

    /// Page-specific follow-up after a command ended
    pub(crate) fn view_follow_up(&mut self) {
        fire(&mut self.show_plugin_enable_bar);
        fire(&mut self.show_plugin_page_button);
        fire(&mut self.show_local_launch_button);
    }

    pub(crate) fn show_toast(&mut self, content: &ToastContent) {
        if let Some(hook) = self.show_toast.as_mut() {
            hook(content);
        }
    }

    pub(crate) fn hide_toast(&mut self) {
        fire(&mut self.hide_toast);
    }
}

fn fire(hook: &mut Option<Hook>) {
    if let Some(hook) = hook.as_mut() {
        hook();
    }
}

impl std::fmt::Debug for PageHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHooks")
            .field("show_cancel_button", &self.show_cancel_button.is_some())
            .field("show_run_button", &self.show_run_button.is_some())
            .field("show_plugin_enable_bar", &self.show_plugin_enable_bar.is_some())
            .field("show_plugin_page_button", &self.show_plugin_page_button.is_some())
            .field("show_local_launch_button", &self.show_local_launch_button.is_some())
            .field("deactivate_inputs", &self.deactivate_inputs.is_some())
            .field("activate_inputs", &self.activate_inputs.is_some())
            .field("show_toast", &self.show_toast.is_some())
            .field("hide_toast", &self.hide_toast.is_some())
            .finish()
    }
}

/// Which commands the hosting page cares about
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewScope {
    /// Every command is relevant (developer page)
    #[default]
    All,
    /// Only commands starting with one of these prefixes
    Prefixes(Vec<String>),
    /// Output only; completion side effects are suppressed (advanced view)
    Detached,
}

impl ViewScope {
    /// Whether completion side effects should run for `command`.
    ///
    /// An unknown command is only relevant to [`ViewScope::All`].
    pub fn is_relevant(&self, command: Option<&str>) -> bool {
        match self {
            ViewScope::All => true,
            ViewScope::Detached => false,
            ViewScope::Prefixes(prefixes) => {
                let Some(command) = command else {
                    return false;
                };
                let command = normalize_command(command);
                prefixes
                    .iter()
                    .map(|prefix| normalize_command(prefix))
                    .any(|prefix| !prefix.is_empty() && command.starts_with(&prefix))
            }
        }
    }
}
