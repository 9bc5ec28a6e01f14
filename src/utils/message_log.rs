//! Player-facing action log.

use std::collections::VecDeque;

use crate::core::constants::MESSAGE_LOG_CAPACITY;

/// Receives player-facing log lines from the game.
pub trait MessageSink {
    fn push(&mut self, message: String);
}

/// Bounded in-memory log, newest last.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(MESSAGE_LOG_CAPACITY)
    }
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl MessageSink for MessageLog {
    fn push(&mut self, message: String) {
        log::info!("{}", message);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = MessageLog::new(3);
        for i in 0..5 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), 3);
        let lines: Vec<&String> = log.entries().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.last(), Some("line 4"));
    }

    #[test]
    fn test_contains_and_clear() {
        let mut log = MessageLog::default();
        log.push("Game saved.".to_string());
        assert!(log.contains("saved"));
        log.clear();
        assert!(log.is_empty());
    }
}
