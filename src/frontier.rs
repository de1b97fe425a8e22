use std::collections::VecDeque;
use std::sync::Mutex;

/// FIFO queue of URLs awaiting a fetch.
///
/// `pop` never blocks; it yields `None` when the queue is empty so the
/// engine can poll emptiness as part of its termination check.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<VecDeque<String>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: String) {
        self.inner.lock().unwrap().push_back(url);
    }

    pub fn pop(&self) -> Option<String> {
        self.inner.lock().unwrap().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_yields_urls_in_push_order() {
        let frontier = Frontier::new();
        frontier.push("https://example.com/1".to_string());
        frontier.push("https://example.com/2".to_string());

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/1"));
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/2"));
    }

    #[test]
    fn pop_on_empty_returns_none_without_blocking() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }
}
