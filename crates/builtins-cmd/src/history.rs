//! Command history tracking
//!
//! Stores executed command strings with their result codes for recall and
//! navigation by interactive callers.

use std::collections::VecDeque;

/// Default number of commands to keep
const DEFAULT_MAX_HISTORY: usize = 100;

/// One executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command: String,
    pub result: i32,
}

/// Command history for recall and navigation
#[derive(Debug)]
pub struct CommandHistory {
    /// Executed commands (most recent at back)
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of commands to store
    max_size: usize,
    /// Current position for navigation (None = at end)
    position: Option<usize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a new history with specified capacity
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            position: None,
        }
    }

    /// Record an executed command
    ///
    /// Repeating the last command only updates its result. Resets navigation
    /// position to the end.
    pub fn push(&mut self, command: &str, result: i32) {
        if command.is_empty() || self.max_size == 0 {
            return;
        }
        self.position = None;

        if let Some(last) = self.entries.back_mut() {
            if last.command == command {
                last.result = result;
                return;
            }
        }

        while self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }

        self.entries.push_back(HistoryEntry {
            command: command.to_string(),
            result,
        });
    }

    /// Get the previous command in history (going back)
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let new_pos = match self.position {
            None => self.entries.len() - 1,
            Some(0) => 0,
            Some(p) => p - 1,
        };

        self.position = Some(new_pos);
        self.entries.get(new_pos).map(|e| e.command.as_str())
    }

    /// Get the next command in history (going forward)
    pub fn next(&mut self) -> Option<&str> {
        match self.position {
            None => None,
            Some(p) if p + 1 >= self.entries.len() => {
                self.position = None;
                None
            }
            Some(p) => {
                self.position = Some(p + 1);
                self.entries.get(p + 1).map(|e| e.command.as_str())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = None;
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Iterate over all entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_navigate() {
        let mut history = CommandHistory::new();

        history.push("Quit", 0);
        history.push("Mute", 0);
        history.push("Foo", -1);

        assert_eq!(history.len(), 3);
        assert_eq!(history.previous(), Some("Foo"));
        assert_eq!(history.previous(), Some("Mute"));
        assert_eq!(history.previous(), Some("Quit"));
        assert_eq!(history.previous(), Some("Quit"));
        assert_eq!(history.next(), Some("Mute"));
        assert_eq!(history.next(), Some("Foo"));
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut history = CommandHistory::new();
        history.push("PlayMedia", -3);
        history.push("PlayMedia", 0);

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|e| e.result), Some(0));
    }

    #[test]
    fn test_capacity() {
        let mut history = CommandHistory::with_capacity(2);
        history.push("a", 0);
        history.push("b", 0);
        history.push("c", 0);

        let commands: Vec<&str> = history.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["b", "c"]);
    }
}
