//! Log container
//!
//! Output chunks are appended as plain text. Nothing a subprocess prints may
//! be interpreted as markup, so sinks that produce HTML escape every chunk.

/// Destination of appended log text
pub trait LogSink {
    /// Append `text` verbatim, with text-node semantics
    fn append_text(&mut self, text: &str);
}

impl LogSink for Vec<String> {
    fn append_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl LogSink for String {
    fn append_text(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append_text(&mut self, text: &str) {
        (**self).append_text(text);
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c if c.is_control() && c != '\n' && c != '\t' && c != '\r' => {
                escaped.push_str(&format!("&#{};", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Sink accumulating an escaped HTML fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlLogSink {
    html: String,
}

impl HtmlLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The escaped fragment accumulated so far
    pub fn as_html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl LogSink for HtmlLogSink {
    fn append_text(&mut self, text: &str) {
        self.html.push_str(&escape_html(text));
    }
}
