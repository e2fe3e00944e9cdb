//! Diagnostics reported by the engine or generated by this crate.

pub mod translator;

pub use translator::translate;

use std::fmt;

/// Severity of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageType {
    Warning,
    Error,
    /// Processing stopped.
    Fatal,
}

impl MessageType {
    /// The severity word as the engine prints it.
    pub fn label(self) -> &'static str {
        match self {
            MessageType::Warning => "Warning",
            MessageType::Error => "Error",
            MessageType::Fatal => "Fatal error",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One diagnostic.
///
/// `line` and `column` are `None` when the message is not tied to a
/// position in the SGF content. Fatal messages are never critical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: i32,
    message_type: MessageType,
    line: Option<u32>,
    column: Option<u32>,
    is_critical: bool,
    text: String,
    raw_text: String,
    library_error_number: Option<i32>,
}

impl Message {
    /// Creates a message whose raw text equals its text.
    pub fn new(id: i32, message_type: MessageType, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id,
            message_type,
            line: None,
            column: None,
            is_critical: false,
            raw_text: text.clone(),
            text,
            library_error_number: None,
        }
    }

    /// Creates a fatal message.
    pub fn fatal(id: i32, text: impl Into<String>) -> Self {
        Self::new(id, MessageType::Fatal, text)
    }

    pub fn with_location(mut self, line: Option<u32>, column: Option<u32>) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Marks the message critical. Ignored for fatal messages.
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.is_critical = critical && self.message_type != MessageType::Fatal;
        self
    }

    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    pub fn with_library_error_number(mut self, errno: Option<i32>) -> Self {
        self.library_error_number = errno;
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }

    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Text with whitespace runs collapsed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message exactly as it was emitted.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// OS error number of the failure behind a crate-generated message.
    pub fn library_error_number(&self) -> Option<i32> {
        self.library_error_number
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, "Line:{line} col:{column} - ")?;
        }
        write!(f, "{} {}", self.message_type, self.id)?;
        if self.is_critical {
            f.write_str(" (critical)")?;
        }
        write!(f, ": {}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_is_never_critical() {
        let m = Message::fatal(3, "boom").with_critical(true);
        assert!(!m.is_critical());
        let m = Message::new(3, MessageType::Error, "oops").with_critical(true);
        assert!(m.is_critical());
    }

    #[test]
    fn test_display_matches_engine_format() {
        let m = Message::new(23, MessageType::Error, "bad value")
            .with_location(Some(4), Some(7))
            .with_critical(true);
        assert_eq!(m.to_string(), "Line:4 col:7 - Error 23 (critical): bad value");
        assert_eq!(Message::fatal(-5, "x").to_string(), "Fatal error -5: x");
    }
}
