//! Ranking utilities
//!
//! Two sort directions are exposed as separate operations because call
//! sites disagree: distances rank ascending (closer first) while counts and
//! influence rank descending. Both are stable.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Stable merge sort
pub fn merge_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort_inner(items, &mut compare)
}

fn merge_sort_inner<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_inner(items, compare);
    let right = merge_sort_inner(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            // Ties go left to keep the sort stable
            (Some(l), Some(r)) => compare(r, l) != Ordering::Less,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

/// Smallest value first; equal values keep their input order
pub fn sort_ascending_by_value<K>(items: Vec<(K, f64)>) -> Vec<(K, f64)> {
    merge_sort_by(items, |a, b| a.1.total_cmp(&b.1))
}

/// Largest value first; equal values keep their input order
pub fn sort_descending_by_value<K>(items: Vec<(K, f64)>) -> Vec<(K, f64)> {
    merge_sort_by(items, |a, b| b.1.total_cmp(&a.1))
}

/// Heap entry where "greater" means ranked higher: larger score, then
/// smaller key
#[derive(Debug)]
struct Scored<K> {
    key: K,
    score: f64,
}

impl<K: Ord> PartialEq for Scored<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Scored<K> {}

impl<K: Ord> PartialOrd for Scored<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Scored<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.key.cmp(&self.key))
    }
}

/// The `k` highest-scoring items, highest first
///
/// Keeps a min-heap of at most `k` entries, so selection is O(n log k).
/// Equal scores are ordered by key.
pub fn top_k<K: Ord>(items: impl IntoIterator<Item = (K, f64)>, k: usize) -> Vec<(K, f64)> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Scored<K>>> = BinaryHeap::with_capacity(k + 1);
    for (key, score) in items {
        heap.push(Reverse(Scored { key, score }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // into_sorted_vec is ascending over Reverse, i.e. best first
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(Scored { key, score })| (key, score))
        .collect()
}
