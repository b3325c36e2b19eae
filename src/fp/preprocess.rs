//! Raw-record preprocessing: labeling, global support counts, rank
//! assignment and canonicalization.

use std::collections::HashMap;
use std::hash::Hash;

use super::error::MineError;
use super::stats::ClassTotals;

/// A canonicalized transaction: surviving items as dense ranked ids, sorted
/// most-frequent-first, plus the record's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTransaction {
    pub items: Vec<u32>,
    pub positive: bool,
}

/// Surviving items in rank order. Dense ids are assigned in rank order, so
/// id order is rank order and `items[id]` recovers the original token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary<T> {
    pub items: Vec<T>,
}

impl<T> Vocabulary<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: u32) -> &T {
        &self.items[id as usize]
    }
}

/// Output of the preprocessing pass, ready for tree insertion.
#[derive(Debug, Clone)]
pub struct Prepared<T> {
    pub transactions: Vec<CanonicalTransaction>,
    pub vocabulary: Vocabulary<T>,
    pub totals: ClassTotals,
}

/// Turns raw records into canonical transactions.
///
/// Each record is `[identifier, item.., label]`; the identifier is dropped
/// and `is_positive` decides the label from the trailing token. Items whose
/// global occurrence count falls below `minimum_support` are removed from
/// the vocabulary for the whole run. Surviving items are ranked by
/// descending count, ties broken by first appearance during the counting
/// pass, so rank assignment is reproducible even when supports are equal.
///
/// A record with fewer than three fields aborts the build with
/// [`MineError::InvalidTransaction`].
pub fn preprocess<T, I, F>(
    records: I,
    minimum_support: usize,
    is_positive: F,
) -> Result<Prepared<T>, MineError>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = Vec<T>>,
    F: Fn(&T) -> bool,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut first_seen: HashMap<T, usize> = HashMap::new();
    let mut labeled: Vec<(Vec<T>, bool)> = Vec::new();
    let mut totals = ClassTotals::default();

    for (index, record) in records.into_iter().enumerate() {
        if record.len() < 3 {
            return Err(MineError::InvalidTransaction {
                index,
                len: record.len(),
            });
        }

        let positive = is_positive(&record[record.len() - 1]);
        totals.record(positive);

        // Strip the identifier and the label token; duplicate occurrences
        // within one record are kept and each counts once.
        let items = record[1..record.len() - 1].to_vec();
        for item in &items {
            let order = first_seen.len();
            first_seen.entry(item.clone()).or_insert(order);
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
        labeled.push((items, positive));
    }

    let mut surviving: Vec<(T, usize)> = counts
        .into_iter()
        .filter(|&(_, count)| count >= minimum_support)
        .collect();
    surviving.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| first_seen[&a.0].cmp(&first_seen[&b.0])));

    let items: Vec<T> = surviving.into_iter().map(|(item, _)| item).collect();
    let ids: HashMap<&T, u32> = items
        .iter()
        .enumerate()
        .map(|(rank, item)| (item, rank as u32))
        .collect();

    let transactions = labeled
        .into_iter()
        .map(|(raw, positive)| {
            let mut mapped: Vec<u32> = raw.iter().filter_map(|item| ids.get(item).copied()).collect();
            mapped.sort_unstable();
            CanonicalTransaction { items: mapped, positive }
        })
        .collect();

    Ok(Prepared {
        transactions,
        vocabulary: Vocabulary { items },
        totals,
    })
}
