//! Navigation capability and an in-memory history implementation.

use log::debug;

/// Navigation capability consumed by route guards.
pub trait Navigator {
    /// Redirects to `path`, replacing the current history entry.
    fn navigate_replace(&mut self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate_replace(&mut self, path: &str) {
        (**self).navigate_replace(path);
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate_replace(&mut self, path: &str) {
        (**self).navigate_replace(path);
    }
}

/// In-memory navigation history.
///
/// # Invariants
/// - History always holds at least one entry.
/// - `navigate_replace` never changes the history length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryNavigator {
    entries: Vec<String>,
}

impl HistoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    /// Pushes a new entry (regular link navigation).
    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.push(path.into());
    }

    /// Goes back one entry. Returns the new current path, or `None` when
    /// already at the first entry.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last().map(String::as_str)
    }

    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or_default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate_replace(&mut self, path: &str) {
        match self.entries.last_mut() {
            Some(current) => *current = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
        debug!(
            "event=navigate_replace module=navigation depth={}",
            self.entries.len()
        );
    }
}
