use tracing::debug;

use super::{RejectedInput, parse_amount};

pub type EntryId = u64;

/// Example values every new sheet starts with.
pub const SEED_VALUES: [f64; 4] = [1000.00, 500.00, 20.00, 30.02];

/// One user-submitted value. Entries are never edited, only removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub value: f64,
}

/// An entry paired with its 1-based position, as shown in listings and reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub display_index: usize,
    pub value: f64,
}

/// Ordered collection of entries.
///
/// `next_id` is always greater than every id handed out so far, so ids stay
/// unique for the lifetime of the ledger even after removals. The total is
/// recomputed from the entries on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    entries: Vec<Entry>,
    next_id: EntryId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a ledger holding the example entries (ids 1 to 4).
    pub fn seeded() -> Self {
        let entries: Vec<Entry> = SEED_VALUES
            .iter()
            .zip(1..)
            .map(|(&value, id)| Entry { id, value })
            .collect();
        let next_id = entries.len() as EntryId + 1;
        Self { entries, next_id }
    }

    /// Parse `raw_input` and append it as a new entry.
    /// Nothing changes when the input is rejected.
    pub fn add(&mut self, raw_input: &str) -> Result<EntryId, RejectedInput> {
        let value = parse_amount(raw_input)?;
        let id = self.next_id;
        self.entries.push(Entry { id, value });
        self.next_id += 1;
        debug!(id, value, "entry added");
        Ok(id)
    }

    /// Remove the entry with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(position);
        debug!(id, value = removed.value, "entry removed");
        Some(removed)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |sum, entry| sum + entry.value)
    }

    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| SnapshotRow {
                display_index: index + 1,
                value: entry.value,
            })
            .collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn next_id(&self) -> EntryId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ledger: &Ledger) -> Vec<EntryId> {
        ledger.entries().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_seeded_ledger() {
        let ledger = Ledger::seeded();
        assert_eq!(ids(&ledger), vec![1, 2, 3, 4]);
        assert_eq!(ledger.next_id(), 5);
        assert_eq!(ledger.get(4).map(|e| e.value), Some(30.02));
    }

    #[test]
    fn test_empty_ledger_total_is_zero() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0.0);
        assert!(ledger.total().is_sign_positive());
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn test_add_appends_with_next_id() {
        let mut ledger = Ledger::seeded();
        let id = ledger.add("15.5").unwrap();

        assert_eq!(id, 5);
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.entries()[4], Entry { id: 5, value: 15.5 });
        assert_eq!(ledger.next_id(), 6);
    }

    #[test]
    fn test_rejected_add_changes_nothing() {
        let mut ledger = Ledger::seeded();
        let before = ledger.clone();

        assert_eq!(ledger.add(""), Err(RejectedInput::Empty));
        assert!(ledger.add("abc").is_err());
        assert!(ledger.add("inf").is_err());

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ledger = Ledger::seeded();

        assert_eq!(ledger.remove(2).map(|e| e.value), Some(500.0));
        let after_first = ledger.clone();
        assert_eq!(ledger.remove(2), None);

        assert_eq!(ledger, after_first);
        assert_eq!(ids(&ledger), vec![1, 3, 4]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut ledger = Ledger::seeded();
        assert_eq!(ledger.remove(42), None);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.next_id(), 5);
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut ledger = Ledger::new();
        let a = ledger.add("1").unwrap();
        let b = ledger.add("2").unwrap();
        ledger.remove(b);
        ledger.remove(a);
        let c = ledger.add("3").unwrap();

        assert!(a < b && b < c);
        assert_eq!(c, 3);
    }

    #[test]
    fn test_snapshot_renumbers_after_remove() {
        let mut ledger = Ledger::seeded();
        ledger.remove(2);

        let snapshot = ledger.snapshot();
        let indexes: Vec<usize> = snapshot.iter().map(|r| r.display_index).collect();
        let values: Vec<f64> = snapshot.iter().map(|r| r.value).collect();

        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(values, vec![1000.0, 20.0, 30.02]);
    }
}
