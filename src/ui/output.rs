//! User-facing messages
//!
//! Subcommands print through [`StdoutWriter`]; the labeling view collects
//! messages in a [`StatusBarWriter`] and shows the latest one in its status
//! bar. Diagnostics that are not meant for the user go through `tracing`.

use colored::Colorize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Keep at most this many buffered status messages
const MAX_MESSAGES: usize = 100;

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

impl MessageLevel {
    /// Short marker printed before the message
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Error => "✗ ",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Info => "ℹ ",
        }
    }
}

/// Sink for user-facing messages
///
/// # Examples
///
/// ```
/// use pointlabel::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.success("Labels saved");
/// output.warning("No background for s1/city");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a message with an explicit level
    fn emit(&self, level: MessageLevel, message: &str);

    fn write(&self, message: &str) {
        self.emit(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Secondary, dimmed information
    fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }
}

/// Colored terminal output; errors go to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Writer that drops everything except warnings and errors
    #[must_use]
    pub const fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl OutputWriter for StdoutWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        let prefix = level.prefix();
        match level {
            MessageLevel::Error => eprintln!("{} {message}", prefix.trim_end().red()),
            MessageLevel::Warning => eprintln!("{} {message}", prefix.trim_end().yellow()),
            _ if self.quiet => {}
            MessageLevel::Success => println!("{} {message}", prefix.trim_end().green()),
            MessageLevel::Info => println!("{}", message.dimmed()),
            MessageLevel::Normal => println!("{message}"),
        }
    }
}

/// A buffered status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    at: Instant,
}

/// Buffered writer for the TUI status bar
///
/// Messages expire after a time-to-live so the bar clears itself.
///
/// ```
/// use pointlabel::ui::output::{MessageLevel, OutputWriter, StatusBarWriter};
///
/// let writer = StatusBarWriter::new();
/// writer.success("Labels saved");
/// assert_eq!(writer.latest().unwrap().level, MessageLevel::Success);
/// ```
#[derive(Debug)]
pub struct StatusBarWriter {
    messages: Mutex<Vec<StatusMessage>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Writer with a 10 second time-to-live
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(10))
    }

    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Messages that have not expired, oldest first
    #[must_use]
    pub fn recent(&self) -> Vec<StatusMessage> {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|m| now.duration_since(m.at) < self.ttl)
            .cloned()
            .collect()
    }

    /// Most recent message that has not expired
    #[must_use]
    pub fn latest(&self) -> Option<StatusMessage> {
        let now = Instant::now();
        self.lock()
            .iter()
            .rev()
            .find(|m| now.duration_since(m.at) < self.ttl)
            .cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the Vec half-written
    fn lock(&self) -> MutexGuard<'_, Vec<StatusMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        let mut messages = self.lock();
        messages.push(StatusMessage {
            level,
            text: message.to_string(),
            at: Instant::now(),
        });
        if messages.len() > MAX_MESSAGES {
            messages.drain(..MAX_MESSAGES / 2);
        }
    }
}
