//! Toast Content Model
//!
//! Toast text is chosen from the command line of the running command by
//! prefix match against a [`ToastTable`]. Selection happens when the command
//! chunk arrives, before any terminal marker is evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading shell prompt and program name, e.g. `$ tutor `
static COMMAND_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\$\s*)?(?:tutor(?:\s+|$))?").expect("valid command prefix pattern")
});

const APPLY_CHANGES_DESCRIPTION: &str = "To apply the changes, run Launch Platform. This will update your platform and may take a few minutes to complete.";

/// Strip the prompt and program name from a command line
///
/// `"$ tutor plugins install demo"` becomes `"plugins install demo"`.
pub fn normalize_command(command: &str) -> String {
    COMMAND_PREFIX.replace(command, "").trim().to_string()
}

/// Text shown in the completion toast
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToastContent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub show_footer: bool,
}

impl ToastContent {
    /// Create toast content
    pub fn new(title: &str, description: &str, show_footer: bool) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            show_footer,
        }
    }

    /// A toast with a blank title is never shown
    pub fn is_displayable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// One row of the toast table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastRule {
    /// Command prefix, with or without the `tutor` program name
    pub prefix: String,
    #[serde(flatten)]
    pub content: ToastContent,
}

impl ToastRule {
    pub fn new(prefix: &str, content: ToastContent) -> Self {
        Self {
            prefix: prefix.to_string(),
            content,
        }
    }
}

/// Command-prefix keyed toast configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastTable {
    /// Rules in priority order for equally long prefixes
    pub rules: Vec<ToastRule>,
    /// Content used when no rule matches or the command is unknown
    pub fallback: ToastContent,
}

impl ToastTable {
    /// Find the rule whose prefix matches the command line.
    ///
    /// The longest matching prefix wins; among equally long prefixes the
    /// first in table order wins.
    pub fn find(&self, command: &str) -> Option<&ToastRule> {
        let command = normalize_command(command);
        let mut best: Option<(&ToastRule, usize)> = None;
        for rule in &self.rules {
            let prefix = normalize_command(&rule.prefix);
            if prefix.is_empty() || !command.starts_with(&prefix) {
                continue;
            }
            if best.map_or(true, |(_, len)| prefix.len() > len) {
                best = Some((rule, prefix.len()));
            }
        }
        best.map(|(rule, _)| rule)
    }

    /// Toast content for a command line, falling back when nothing matches
    pub fn select(&self, command: Option<&str>) -> &ToastContent {
        command
            .and_then(|cmd| self.find(cmd))
            .map(|rule| &rule.content)
            .unwrap_or(&self.fallback)
    }
}

impl Default for ToastTable {
    fn default() -> Self {
        Self {
            rules: vec![
                ToastRule::new(
                    "plugins enable",
                    ToastContent::new(
                        "Your plugin was successfully enabled",
                        APPLY_CHANGES_DESCRIPTION,
                        true,
                    ),
                ),
                ToastRule::new(
                    "plugins upgrade",
                    ToastContent::new(
                        "Your plugin was successfully updated",
                        APPLY_CHANGES_DESCRIPTION,
                        true,
                    ),
                ),
                ToastRule::new(
                    "plugins install",
                    ToastContent::new(
                        "Plugin Installed Successfully",
                        "Enable it now to start using its features",
                        false,
                    ),
                ),
                ToastRule::new(
                    "config save",
                    ToastContent::new(
                        "You have successfully modified parameters",
                        APPLY_CHANGES_DESCRIPTION,
                        true,
                    ),
                ),
                ToastRule::new(
                    "local launch",
                    ToastContent::new("Launch platform was successfully executed", "", false),
                ),
            ],
            fallback: ToastContent::new("Command executed successfully", "", false),
        }
    }
}
