//! Notices
//!
//! Short advisory messages produced by session operations, for the view layer to show as toasts.

use std::{collections::VecDeque, fmt, time::Duration};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Something the user asked for happened.
    Success,

    /// Something the user asked for could not happen.
    Error,

    /// The user needs to do something first.
    Warning,

    /// Neutral information.
    Info,
}

impl NoticeLevel {
    /// Lowercase name, as used for the toast's modifier class.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Info => "info",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,

    /// Message text
    pub message: String,

    /// How long the view should keep the notice on screen
    pub duration: Duration,
}

impl Notice {
    /// Create a notice.
    pub fn new(level: NoticeLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            duration,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Bounded queue of notices, dropping the oldest when full.
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    capacity: usize,
}

impl NoticeQueue {
    /// Create a queue holding at most `capacity` notices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            notices: VecDeque::new(),
            capacity,
        }
    }

    /// Push a notice, evicting the oldest one if the queue is full.
    pub fn push(&mut self, notice: Notice) {
        if self.capacity == 0 {
            return;
        }

        while self.notices.len() >= self.capacity {
            self.notices.pop_front();
        }

        self.notices.push_back(notice);
    }

    /// Remove and return every queued notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// The most recent notice.
    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Get the number of queued notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(message: &str) -> Notice {
        Notice::new(NoticeLevel::Info, message, Duration::from_secs(5))
    }

    #[test]
    fn queue_drops_oldest_when_full() {
        let mut queue = NoticeQueue::new(2);

        queue.push(info("one"));
        queue.push(info("two"));
        queue.push(info("three"));

        let messages: Vec<String> = queue.drain().into_iter().map(|n| n.message).collect();

        assert_eq!(messages, ["two", "three"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn unbounded_capacity_queue_accepts_notices() {
        let mut queue = NoticeQueue::new(usize::MAX);

        queue.push(info("one"));

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn zero_capacity_queue_discards_everything() {
        let mut queue = NoticeQueue::new(0);

        queue.push(info("ignored"));

        assert!(queue.is_empty());
    }

    #[test]
    fn notice_displays_level_and_message() {
        let notice = Notice::new(NoticeLevel::Warning, "Please enter a search term", Duration::ZERO);

        assert_eq!(notice.to_string(), "[warning] Please enter a search term");
    }
}
