//! Generic key-function aggregation with ranking and interval
//! statistics.
//!
//! One aggregator serves every grouping in the crate (IP counts, URL
//! counts, query shapes, request-type intervals) instead of bespoke
//! dict-of-lists blocks per report. Groups are insertion-ordered: the
//! first time a key appears fixes its position, which is what makes
//! top-N tie-breaking deterministic.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// All members sharing one key, in insertion order.
#[derive(Debug, Clone)]
pub struct Group<K, T> {
    pub key: K,
    pub members: Vec<T>,
}

impl<K, T> Group<K, T> {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// First member inserted — the "show one example" representative.
    pub fn example(&self) -> Option<&T> {
        self.members.first()
    }
}

/// Key → group mapping, accumulated over one pass and read afterwards.
#[derive(Debug, Clone)]
pub struct Aggregation<K, T> {
    groups: Vec<Group<K, T>>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, T> Aggregation<K, T> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Group `items` by `key_fn` in one pass.
    pub fn from_items<I>(items: I, mut key_fn: impl FnMut(&T) -> K) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut agg = Self::new();
        for item in items {
            let key = key_fn(&item);
            agg.insert(key, item);
        }
        agg
    }

    pub fn insert(&mut self, key: K, member: T) {
        match self.index.get(&key) {
            Some(&i) => self.groups[i].members.push(member),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(Group {
                    key,
                    members: vec![member],
                });
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&Group<K, T>> {
        self.index.get(key).map(|&i| &self.groups[i])
    }

    /// Groups in first-seen key order.
    pub fn groups(&self) -> &[Group<K, T>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total member count across groups; always equals the number of
    /// items inserted.
    pub fn total(&self) -> usize {
        self.groups.iter().map(Group::count).sum()
    }

    /// `(key, count)` in first-seen key order.
    pub fn counts(&self) -> Vec<(&K, usize)> {
        self.groups.iter().map(|g| (&g.key, g.count())).collect()
    }

    /// Read-only ranking view: count descending, ties broken by
    /// first-seen key order, truncated to `n`. Re-running on an
    /// unchanged aggregation yields the same list.
    pub fn top_n(&self, n: usize) -> Vec<(&K, usize)> {
        let mut ranked: Vec<(&K, usize)> = self.counts();
        ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable: insertion order breaks ties
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Clone, T> Default for Aggregation<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finalized time statistics for one group of stamped events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSummary {
    pub count: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Mean inter-arrival seconds; 0 when count <= 1
    pub mean_interval_secs: f64,
}

/// Compute interval statistics over the complete timestamp set.
///
/// Timestamps are stable-sorted ascending first (ties keep input
/// order), so out-of-order capture never skews the intervals. Only a
/// finalized group can call this: intervals need the full set.
pub fn interval_summary(times: &[NaiveDateTime]) -> IntervalSummary {
    let mut sorted = times.to_vec();
    sorted.sort_by_key(|t| *t);

    let count = sorted.len();
    let first = sorted.first().copied();
    let last = sorted.last().copied();

    let mean_interval_secs = if count > 1 {
        let total_secs: f64 = sorted
            .windows(2)
            .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 1000.0)
            .sum();
        total_secs / (count - 1) as f64
    } else {
        0.0
    };

    IntervalSummary {
        count,
        first,
        last,
        mean_interval_secs,
    }
}
