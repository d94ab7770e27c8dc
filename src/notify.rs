//! Transient user notifications (the toast surface).
//!
//! Messages go to stderr so they never corrupt piped table or JSON
//! output. Polling loops report the same failure once rather than once
//! per tick.

use std::sync::Arc;

use dashmap::DashSet;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    quiet: bool,
    seen: Arc<DashSet<String>>,
}

impl Notifier {
    pub fn new(quiet: bool) -> Self {
        Notifier {
            quiet,
            seen: Arc::new(DashSet::new()),
        }
    }

    pub fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{} {}", "ok:".green().bold(), message.as_ref());
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{} {}", "info:".cyan(), message.as_ref());
        }
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("{} {}", "warning:".yellow().bold(), message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{} {}", "error:".red().bold(), message.as_ref());
    }

    /// Report an error once per key; repeats are suppressed until
    /// `clear_once` is called for the key. Returns true when the message
    /// was actually shown.
    pub fn error_once(&self, key: &str, message: impl AsRef<str>) -> bool {
        if self.seen.insert(key.to_string()) {
            self.error(message);
            true
        } else {
            false
        }
    }

    /// Forget a suppressed key, e.g. after the condition recovers
    pub fn clear_once(&self, key: &str) {
        self.seen.remove(key);
    }
}
