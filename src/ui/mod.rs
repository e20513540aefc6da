//! Presentation-side state of the log panel
//!
//! DOM-independent models of the pieces the log stream drives: viewport
//! follow behaviour, the completion toast, the page hooks and the log
//! container itself.

pub mod hooks;
pub mod scroll;
pub mod sink;
pub mod toast;

// Re-exports for convenience
pub use hooks::{PageHooks, ViewScope};
pub use scroll::{ScrollController, ScrollPolicy, ScrollState, Viewport};
pub use sink::{escape_html, HtmlLogSink, LogSink};
pub use toast::{ToastController, ToastPhase, ToastTransition};
