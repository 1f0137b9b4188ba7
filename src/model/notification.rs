//! Transient user-visible notifications

use std::time::{Duration, Instant};

/// How long a notification stays up
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A notification that auto-expires
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, text: impl Into<String>, duration: Duration) -> Self {
        Self {
            severity,
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text, NOTIFICATION_DURATION)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text, NOTIFICATION_DURATION)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_expires_immediately() {
        let n = Notification::new(Severity::Success, "done", Duration::ZERO);
        assert!(n.is_expired());
    }

    #[test]
    fn test_default_duration_not_expired() {
        let n = Notification::error("boom");
        assert!(n.is_error());
        assert!(!n.is_expired());
    }
}
