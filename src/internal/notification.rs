use std::time::{Duration, Instant};

/// Kind of toast to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    fn timeout(&self) -> Duration {
        match self {
            NotificationKind::Info => Duration::from_secs(3),
            NotificationKind::Warning => Duration::from_secs(5),
            NotificationKind::Error => Duration::from_secs(10),
        }
    }
}

/// A transient message shown over the wall, dismissed automatically after a
/// kind-specific timeout.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    #[allow(dead_code)]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created: Instant::now(),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        self.created.elapsed() > self.kind.timeout()
    }
}
