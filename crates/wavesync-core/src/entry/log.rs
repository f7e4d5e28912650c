//! The reconciled wave log.

use std::collections::HashSet;

use super::model::Entry;

/// Ordered, deduplicated collection of waves.
///
/// Bulk-read entries come first in ledger order, followed by live entries in
/// arrival order. Entries are never removed or mutated; the only way to drop
/// content is a fresh `load_initial`, which replaces the log wholesale.
///
/// The log never holds two entries with an equal `(address, timestamp,
/// message)` tuple. Live delivery may redeliver waves already present from
/// the bulk read, and the user's own wave comes back through the live feed
/// after confirmation; both collapse onto the existing copy.
#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    entries: Vec<Entry>,
    seen: HashSet<Entry>,
}

impl EntryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the log with the result of a bulk read.
    ///
    /// Duplicates inside the bulk result itself are collapsed onto their
    /// first occurrence.
    ///
    /// # Returns
    ///
    /// The number of entries kept.
    pub fn load_initial<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Entry>,
    {
        self.entries.clear();
        self.seen.clear();

        for entry in entries {
            self.push_unique(entry);
        }

        self.entries.len()
    }

    /// Merges one live event.
    ///
    /// # Returns
    ///
    /// `true` if the entry was appended, `false` if an equal entry was
    /// already present.
    pub fn observe_live(&mut self, entry: Entry) -> bool {
        self.push_unique(entry)
    }

    fn push_unique(&mut self, entry: Entry) -> bool {
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.seen.contains(entry)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an owned copy for rendering.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RawEntry;

    fn entry(sender: &str, timestamp: u64, text: &str) -> Entry {
        Entry::from_raw(RawEntry::new(sender, timestamp, text)).unwrap()
    }

    fn messages(log: &EntryLog) -> Vec<&str> {
        log.iter().map(Entry::message).collect()
    }

    #[test]
    fn test_new_log_is_empty() {
        let log = EntryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_redelivered_bulk_entry_is_not_duplicated() {
        let mut log = EntryLog::new();
        log.load_initial(vec![entry("a1", 1, "hello")]);

        assert!(!log.observe_live(entry("a1", 1, "hello")));
        assert_eq!(log.len(), 1);

        assert!(log.observe_live(entry("a2", 2, "hi")));
        assert_eq!(log.len(), 2);
        assert_eq!(messages(&log), vec!["hello", "hi"]);
    }

    #[test]
    fn test_observe_live_is_idempotent() {
        let mut log = EntryLog::new();
        let wave = entry("a1", 5, "gm");

        assert!(log.observe_live(wave.clone()));
        assert!(!log.observe_live(wave.clone()));

        assert_eq!(log.len(), 1);
        assert!(log.contains(&wave));
    }

    #[test]
    fn test_load_initial_resets_previous_contents() {
        let mut log = EntryLog::new();
        log.load_initial(vec![entry("a1", 1, "old")]);
        log.observe_live(entry("a2", 2, "live"));

        let kept = log.load_initial(vec![entry("a3", 3, "fresh")]);

        assert_eq!(kept, 1);
        assert_eq!(messages(&log), vec!["fresh"]);
        assert!(!log.contains(&entry("a2", 2, "live")));
        // The dedup index is reset as well, so the old live wave can return.
        assert!(log.observe_live(entry("a2", 2, "live")));
    }

    #[test]
    fn test_load_initial_collapses_duplicates_in_bulk_result() {
        let mut log = EntryLog::new();
        let kept = log.load_initial(vec![
            entry("a1", 1, "hello"),
            entry("a2", 2, "hi"),
            entry("a1", 1, "hello"),
        ]);

        assert_eq!(kept, 2);
        assert_eq!(messages(&log), vec!["hello", "hi"]);
    }

    #[test]
    fn test_same_text_from_different_senders_is_kept() {
        let mut log = EntryLog::new();
        log.observe_live(entry("a1", 1, "wave"));
        log.observe_live(entry("a2", 1, "wave"));
        log.observe_live(entry("a1", 2, "wave"));

        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_no_duplicates_after_mixed_sequence() {
        let mut log = EntryLog::new();
        log.load_initial((0..5).map(|i| entry("a", i, "m")));

        for round in 0..3 {
            for i in 0..8 {
                log.observe_live(entry("a", i, "m"));
            }
            assert_eq!(log.len(), 8, "round {round}");
        }

        let unique: HashSet<_> = log.iter().cloned().collect();
        assert_eq!(unique.len(), log.len());
    }
}
