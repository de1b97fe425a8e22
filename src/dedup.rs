use std::collections::HashSet;
use std::sync::Mutex;

/// Set of URLs already admitted into the crawl.
///
/// A URL is enqueued into the frontier iff `admit` returned true for it,
/// so each distinct URL is fetched at most once per run no matter how many
/// pages discover it concurrently.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the item and returns true iff it was not already present.
    ///
    /// The check and the insert happen under one lock, so concurrent
    /// callers racing on the same item see exactly one `true`.
    pub fn admit(&self, item: &str) -> bool {
        self.inner.lock().unwrap().insert(item.to_string())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.inner.lock().unwrap().contains(item)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn admit_returns_true_only_for_new_items() {
        let set = VisitedSet::new();
        assert!(set.admit("https://example.com/a"));
        assert!(set.admit("https://example.com/b"));
        assert!(!set.admit("https://example.com/a"));
    }

    #[test]
    fn contains_reflects_admitted_items() {
        let set = VisitedSet::new();
        set.admit("hello");
        set.admit("world");
        assert!(set.contains("hello"));
        assert!(set.contains("world"));
        assert!(!set.contains("unknown"));
    }

    #[test]
    fn len_counts_unique_items() {
        let set = VisitedSet::new();
        set.admit("a");
        set.admit("b");
        set.admit("c");
        set.admit("a");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn concurrent_admit_grants_each_item_exactly_once() {
        let set = Arc::new(VisitedSet::new());
        let admissions = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let set = Arc::clone(&set);
                let admissions = Arc::clone(&admissions);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        if set.admit(&format!("https://example.com/page{i}")) {
                            admissions.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // 8 threads raced on the same 100 URLs; each won exactly once
        assert_eq!(admissions.load(Ordering::SeqCst), 100);
        assert_eq!(set.len(), 100);
    }
}
