// 🎟️ Ledger - persisted record of issued numbers per participant
// Append-or-create by name, whole-set reset, substring filter for display

use crate::pool;
use crate::store::Store;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The single key this system occupies in the persistence store.
pub const STORE_KEY: &str = "lotteryData";

// ============================================================================
// DATA MODEL
// ============================================================================

/// One participant and every number issued to them, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,

    #[serde(rename = "number")]
    pub numbers: Vec<u64>,
}

/// The full record set, serialized as-is to the store.
///
/// `date_generated` marks when the current lottery was started (set by
/// [`Ledger::reset`]); it stays `None` for a ledger that was never reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "dateGenerated", default)]
    pub date_generated: Option<DateTime<Utc>>,

    #[serde(rename = "data", default)]
    pub entries: Vec<Entry>,
}

/// Result of one generation request.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    /// Numbers issued by this request, in draw order.
    pub numbers: Vec<u64>,

    /// True when the request exceeded the capacity ceiling for its digit
    /// length and nothing was issued.
    pub exhausted: bool,
}

/// One row of the filtered display view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEntry {
    pub name: String,

    /// The entry's full ticket count, regardless of the filter.
    pub total: usize,

    /// Numbers whose decimal text contains the search term, in original order.
    pub matching: Vec<u64>,
}

// ============================================================================
// LEDGER OPERATIONS
// ============================================================================

impl Ledger {
    /// Fresh ledger with no entries and no start timestamp.
    pub fn empty() -> Self {
        Ledger {
            date_generated: None,
            entries: Vec::new(),
        }
    }

    /// Load from the store. An absent or unparseable value means "no prior
    /// data" and yields the empty ledger; it is never surfaced as an error.
    pub fn load(store: &dyn Store) -> Self {
        store
            .get(STORE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(Ledger::empty)
    }

    /// Serialize and write the whole ledger to the store.
    pub fn save(&self, store: &mut dyn Store) -> Result<()> {
        let json = serde_json::to_string(self).context("Failed to serialize ledger")?;
        store.set(STORE_KEY, &json)
    }

    /// Every number issued so far, across all participants.
    pub fn issued_numbers(&self) -> HashSet<u64> {
        self.entries
            .iter()
            .flat_map(|entry| entry.numbers.iter().copied())
            .collect()
    }

    /// Generate `count` fresh numbers of `digits` length for `name` and
    /// record them: appended to the existing entry, or as a new entry.
    ///
    /// The exclusion set handed to the pool is the union of all issued
    /// numbers, which keeps every number unique across the whole ledger.
    /// On capacity exhaustion nothing is issued and no new entry is
    /// created. The ledger is persisted after every attempt.
    pub fn add_or_append(
        &mut self,
        store: &mut dyn Store,
        name: &str,
        count: usize,
        digits: u32,
    ) -> Result<DrawOutcome> {
        self.add_or_append_with(&mut rand::thread_rng(), store, name, count, digits)
    }

    /// Same as [`Ledger::add_or_append`] with an explicit RNG for tests.
    pub fn add_or_append_with<R: Rng>(
        &mut self,
        rng: &mut R,
        store: &mut dyn Store,
        name: &str,
        count: usize,
        digits: u32,
    ) -> Result<DrawOutcome> {
        let mut excluded = self.issued_numbers();
        let numbers = pool::generate_with(rng, count, digits, &mut excluded);
        let exhausted = numbers.is_empty() && count > 0;

        if !numbers.is_empty() {
            match self.entries.iter_mut().find(|entry| entry.name == name) {
                Some(entry) => entry.numbers.extend(numbers.iter().copied()),
                None => self.entries.push(Entry {
                    name: name.to_string(),
                    numbers: numbers.clone(),
                }),
            }
        }

        self.save(store)?;

        Ok(DrawOutcome { numbers, exhausted })
    }

    /// Start a new lottery: drop the persisted key, clear all entries, and
    /// stamp the start time. The fresh state is not re-persisted until the
    /// next generation writes it.
    pub fn reset(&mut self, store: &mut dyn Store) -> Result<()> {
        store.remove(STORE_KEY)?;

        self.date_generated = Some(Utc::now());
        self.entries.clear();

        Ok(())
    }

    /// Display view: per entry, the numbers whose decimal text contains
    /// `term` (empty term matches everything). Entries with no matching
    /// number are omitted entirely. Order is preserved throughout.
    pub fn filter(&self, term: &str) -> Vec<FilteredEntry> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let matching: Vec<u64> = entry
                    .numbers
                    .iter()
                    .copied()
                    .filter(|n| term.is_empty() || n.to_string().contains(term))
                    .collect();

                if matching.is_empty() {
                    return None;
                }

                Some(FilteredEntry {
                    name: entry.name.clone(),
                    total: entry.numbers.len(),
                    matching,
                })
            })
            .collect()
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Label for the triggering control - a display hint, not a mode.
    pub fn action_label(&self) -> &'static str {
        if self.has_entries() {
            "Add"
        } else {
            "Generate"
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(name: &str, numbers: &[u64]) -> Entry {
        Entry {
            name: name.to_string(),
            numbers: numbers.to_vec(),
        }
    }

    #[test]
    fn test_load_absent_store_yields_empty_ledger() {
        let store = MemoryStore::new();
        let ledger = Ledger::load(&store);

        assert_eq!(ledger.date_generated, None);
        assert!(ledger.entries.is_empty());
        assert_eq!(ledger.action_label(), "Generate");
    }

    #[test]
    fn test_load_corrupt_store_yields_empty_ledger() {
        let mut store = MemoryStore::new();
        store.set(STORE_KEY, "definitely not json").unwrap();

        let ledger = Ledger::load(&store);
        assert!(ledger.entries.is_empty());
        assert_eq!(ledger.date_generated, None);
    }

    #[test]
    fn test_wire_format_keys() {
        let mut store = MemoryStore::new();
        let ledger = Ledger {
            date_generated: None,
            entries: vec![entry("Ana", &[12, 34])],
        };

        ledger.save(&mut store).unwrap();
        let raw = store.get(STORE_KEY).unwrap();

        assert!(raw.contains(r#""dateGenerated":null"#));
        assert!(raw.contains(r#""data":"#));
        assert!(raw.contains(r#""name":"Ana""#));
        assert!(raw.contains(r#""number":[12,34]"#));
    }

    #[test]
    fn test_wire_format_round_trip() {
        let mut store = MemoryStore::new();
        let ledger = Ledger {
            date_generated: Some(Utc::now()),
            entries: vec![entry("Ana", &[12, 34]), entry("Bo", &[567])],
        };

        ledger.save(&mut store).unwrap();
        let loaded = Ledger::load(&store);

        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_load_accepts_null_timestamp() {
        let mut store = MemoryStore::new();
        store
            .set(
                STORE_KEY,
                r#"{"dateGenerated":null,"data":[{"name":"Ana","number":[12,34]}]}"#,
            )
            .unwrap();

        let ledger = Ledger::load(&store);
        assert_eq!(ledger.date_generated, None);
        assert_eq!(ledger.entries, vec![entry("Ana", &[12, 34])]);
    }

    #[test]
    fn test_append_semantics() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        let first = ledger
            .add_or_append_with(&mut rng, &mut store, "Alice", 2, 3)
            .unwrap();
        let second = ledger
            .add_or_append_with(&mut rng, &mut store, "Alice", 2, 3)
            .unwrap();

        assert_eq!(ledger.entries.len(), 1);
        let alice = &ledger.entries[0];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.numbers.len(), 4);
        assert_eq!(alice.numbers[..2], first.numbers[..]);
        assert_eq!(alice.numbers[2..], second.numbers[..]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        ledger
            .add_or_append_with(&mut rng, &mut store, "alice", 1, 3)
            .unwrap();
        ledger
            .add_or_append_with(&mut rng, &mut store, "Alice", 1, 3)
            .unwrap();

        assert_eq!(ledger.entries.len(), 2);
    }

    #[test]
    fn test_global_uniqueness_across_participants() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        for name in ["Alice", "Bob", "Carol", "Alice", "Bob"] {
            ledger
                .add_or_append_with(&mut rng, &mut store, name, 20, 3)
                .unwrap();
        }

        let total: usize = ledger.entries.iter().map(|e| e.numbers.len()).sum();
        assert_eq!(total, 100);
        assert_eq!(ledger.issued_numbers().len(), 100);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        ledger
            .add_or_append_with(&mut rng, &mut store, "Sam", 3, 2)
            .unwrap();

        let reloaded = Ledger::load(&store);
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_exhausted_draw_for_new_name_creates_no_entry() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        // 10 one-digit requests against a ceiling of 9
        let outcome = ledger
            .add_or_append_with(&mut rng, &mut store, "Zed", 10, 1)
            .unwrap();

        assert!(outcome.exhausted);
        assert!(outcome.numbers.is_empty());
        assert!(ledger.entries.is_empty());

        // The attempt is still persisted
        assert!(store.get(STORE_KEY).is_some());
    }

    #[test]
    fn test_exhausted_draw_leaves_existing_entry_unchanged() {
        let mut rng = StdRng::seed_from_u64(43);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        ledger
            .add_or_append_with(&mut rng, &mut store, "Ana", 9, 1)
            .unwrap();
        let before = ledger.entries[0].numbers.clone();

        let outcome = ledger
            .add_or_append_with(&mut rng, &mut store, "Ana", 1, 1)
            .unwrap();

        assert!(outcome.exhausted);
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].numbers, before);
    }

    #[test]
    fn test_reset_clears_everything_and_drops_the_key() {
        let mut rng = StdRng::seed_from_u64(51);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        ledger
            .add_or_append_with(&mut rng, &mut store, "Alice", 5, 3)
            .unwrap();
        assert!(store.get(STORE_KEY).is_some());

        ledger.reset(&mut store).unwrap();

        assert!(ledger.entries.is_empty());
        assert!(ledger.date_generated.is_some());
        assert_eq!(store.get(STORE_KEY), None);
        assert_eq!(ledger.action_label(), "Generate");
    }

    #[test]
    fn test_filter_matches_substring_and_omits_empty_entries() {
        let ledger = Ledger {
            date_generated: None,
            entries: vec![entry("Alice", &[123, 145, 167]), entry("Bob", &[234])],
        };

        let view = ledger.filter("1");

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Alice");
        assert_eq!(view[0].total, 3);
        assert_eq!(view[0].matching, vec![123, 145, 167]);
    }

    #[test]
    fn test_filter_mid_number_substring() {
        let ledger = Ledger {
            date_generated: None,
            entries: vec![entry("Alice", &[123, 145, 167]), entry("Bob", &[234])],
        };

        let view = ledger.filter("23");

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].matching, vec![123]);
        assert_eq!(view[0].total, 3);
        assert_eq!(view[1].matching, vec![234]);
    }

    #[test]
    fn test_filter_empty_term_returns_everything_in_order() {
        let ledger = Ledger {
            date_generated: None,
            entries: vec![entry("Alice", &[123, 145, 167]), entry("Bob", &[234])],
        };

        let view = ledger.filter("");

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].name, "Alice");
        assert_eq!(view[0].matching, vec![123, 145, 167]);
        assert_eq!(view[1].name, "Bob");
        assert_eq!(view[1].matching, vec![234]);
    }

    #[test]
    fn test_action_label_reflects_entries() {
        let mut rng = StdRng::seed_from_u64(61);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        assert_eq!(ledger.action_label(), "Generate");

        ledger
            .add_or_append_with(&mut rng, &mut store, "Sam", 1, 3)
            .unwrap();
        assert_eq!(ledger.action_label(), "Add");
    }

    #[test]
    fn test_end_to_end_two_digit_draw() {
        let mut rng = StdRng::seed_from_u64(71);
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::empty();

        let outcome = ledger
            .add_or_append_with(&mut rng, &mut store, "Sam", 3, 2)
            .unwrap();

        assert!(!outcome.exhausted);
        assert_eq!(outcome.numbers.len(), 3);
        for &n in &outcome.numbers {
            assert!((10..=99).contains(&n));
            assert!(!crate::pool::has_repeating_digits(n));
        }
    }
}
