use super::reverse::Reversible;
use crate::model::interaction::BaseInteractions;
use crate::model::residue::Residue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which interaction survives when one residue pair is reported with two different
/// classifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The later record replaces the earlier one.
    #[default]
    LastWins,
    /// The earlier record is kept and later ones are dropped.
    FirstWins,
    /// Every distinct classification is kept.
    KeepAll,
}

/// One residue pair reported with two classifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub existing: String,
    pub incoming: String,
}

/// What a deduplication pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    /// Interactions flipped into canonical direction.
    pub reversed: usize,
    /// Exact repeats that were merged.
    pub duplicates: usize,
    pub conflicts: Vec<Conflict>,
}

impl DedupReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0 && self.conflicts.is_empty()
    }
}

/// Collapses both directional encodings of every interaction into one and sorts each
/// list, resolving classification conflicts with [`ConflictPolicy::LastWins`].
pub fn deduplicate_and_sort(interactions: BaseInteractions) -> BaseInteractions {
    deduplicate_and_sort_with_report(interactions, ConflictPolicy::default()).0
}

/// As [`deduplicate_and_sort`], with an explicit conflict policy and a report.
///
/// Base pairs, stackings and other interactions are turned to canonical direction and
/// merged per undirected residue pair. Base-ribose and base-phosphate contacts keep the
/// direction their unifier gave them and only exact repeats are merged.
pub fn deduplicate_and_sort_with_report(
    interactions: BaseInteractions,
    policy: ConflictPolicy,
) -> (BaseInteractions, DedupReport) {
    let mut report = DedupReport::default();

    let mut result = BaseInteractions {
        base_pairs: undirected(interactions.base_pairs, policy, &mut report),
        stackings: undirected(interactions.stackings, policy, &mut report),
        base_ribose_interactions: exact(interactions.base_ribose_interactions, &mut report),
        base_phosphate_interactions: exact(interactions.base_phosphate_interactions, &mut report),
        other_interactions: undirected(interactions.other_interactions, policy, &mut report),
    };

    sort(&mut result.base_pairs, |i| (&i.nt1, &i.nt2));
    sort(&mut result.stackings, |i| (&i.nt1, &i.nt2));
    sort(&mut result.base_ribose_interactions, |i| (&i.nt1, &i.nt2));
    sort(&mut result.base_phosphate_interactions, |i| (&i.nt1, &i.nt2));
    sort(&mut result.other_interactions, |i| (&i.nt1, &i.nt2));

    if !report.conflicts.is_empty() {
        tracing::warn!(
            conflicts = report.conflicts.len(),
            ?policy,
            "residue pairs reported with conflicting classifications"
        );
    }
    tracing::debug!(
        reversed = report.reversed,
        duplicates = report.duplicates,
        remaining = result.len(),
        "deduplicated interactions"
    );
    (result, report)
}

/// Keyed by printed form; the survivor keeps the slot of the first occurrence.
struct Slots<T> {
    items: Vec<T>,
    by_key: HashMap<String, usize>,
}

impl<T: fmt::Display> Slots<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    fn insert(&mut self, key: String, item: T) -> usize {
        self.items.push(item);
        let slot = self.items.len() - 1;
        self.by_key.insert(key, slot);
        slot
    }

    fn replace(&mut self, slot: usize, key: String, item: T) {
        let previous = self.items[slot].to_string();
        self.by_key.remove(&previous);
        self.items[slot] = item;
        self.by_key.insert(key, slot);
    }
}

fn undirected<T: Reversible>(
    items: Vec<T>,
    policy: ConflictPolicy,
    report: &mut DedupReport,
) -> Vec<T> {
    let mut slots = Slots::new();
    let mut by_pair: HashMap<(String, String), usize> = HashMap::new();

    for item in items {
        if item.nt1().canonical_cmp(item.nt2()).is_gt() {
            report.reversed += 1;
        }
        let item = item.canonical();
        let key = item.to_string();

        if let Some(&slot) = slots.by_key.get(&key) {
            report.duplicates += 1;
            slots.replace(slot, key, item);
            continue;
        }

        let pair = (item.nt1().to_string(), item.nt2().to_string());
        let Some(&slot) = by_pair.get(&pair) else {
            let slot = slots.insert(key, item);
            by_pair.insert(pair, slot);
            continue;
        };

        let existing = slots.items[slot].to_string();
        tracing::debug!(%existing, incoming = %key, "conflicting classification");
        report.conflicts.push(Conflict {
            existing,
            incoming: key.clone(),
        });
        match policy {
            ConflictPolicy::LastWins => slots.replace(slot, key, item),
            ConflictPolicy::FirstWins => {}
            ConflictPolicy::KeepAll => {
                slots.insert(key, item);
            }
        }
    }
    slots.items
}

fn exact<T: fmt::Display>(items: Vec<T>, report: &mut DedupReport) -> Vec<T> {
    let mut slots = Slots::new();
    for item in items {
        let key = item.to_string();
        match slots.by_key.get(&key) {
            Some(&slot) => {
                report.duplicates += 1;
                slots.replace(slot, key, item);
            }
            None => {
                slots.insert(key, item);
            }
        }
    }
    slots.items
}

/// Stable sort by `(nt1.chain, nt1.number, nt2.chain, nt2.number)`.
fn sort<T>(items: &mut [T], residues: impl Fn(&T) -> (&Residue, &Residue)) {
    items.sort_by(|a, b| {
        let (a1, a2) = residues(a);
        let (b1, b2) = residues(b);
        (a1.chain(), a1.number(), a2.chain(), a2.number()).cmp(&(
            b1.chain(),
            b1.number(),
            b2.chain(),
            b2.number(),
        ))
    });
}
