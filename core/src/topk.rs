//! Bounded min-heap used to keep the best `k` scored documents.

use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::document::DocId;

/// A scored document. Orders by score, then by name with the smaller name
/// ranking higher, so `a > b` means `a` should be listed before `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<'a> {
    pub score: OrderedFloat<f64>,
    pub name: &'a str,
    pub doc_id: DocId,
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.name.cmp(self.name))
            .then_with(|| other.doc_id.cmp(&self.doc_id))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fixed-capacity min-heap: the weakest kept entry is always at the top.
#[derive(Debug)]
pub struct TopK<'a> {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked<'a>>>,
}

impl<'a> TopK<'a> {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)) }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer an entry; returns whether it was kept.
    ///
    /// A full heap only accepts entries that outrank its current minimum,
    /// which is evicted in exchange.
    pub fn push(&mut self, item: Ranked<'a>) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(item));
            return true;
        }
        match self.peek_min() {
            Some(min) if item > *min => {
                self.heap.pop();
                self.heap.push(Reverse(item));
                true
            }
            _ => false,
        }
    }

    pub fn peek_min(&self) -> Option<&Ranked<'a>> {
        self.heap.peek().map(|Reverse(r)| r)
    }

    pub fn pop_min(&mut self) -> Option<Ranked<'a>> {
        self.heap.pop().map(|Reverse(r)| r)
    }

    /// Drain into a vector ordered best first.
    pub fn into_sorted_vec(self) -> Vec<Ranked<'a>> {
        self.heap.into_sorted_vec().into_iter().map(|Reverse(r)| r).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(score: f64, name: &str, doc_id: DocId) -> Ranked<'_> {
        Ranked { score: OrderedFloat(score), name, doc_id }
    }

    #[test]
    fn keeps_the_best_k() {
        let mut top = TopK::new(2);
        assert!(top.push(r(0.3, "a", 0)));
        assert!(top.push(r(0.1, "b", 1)));
        assert!(!top.push(r(0.05, "c", 2)));
        assert!(top.push(r(0.9, "d", 3)));
        assert_eq!(top.peek_min().map(|m| m.doc_id), Some(0));
        let names: Vec<_> = top.into_sorted_vec().iter().map(|x| x.name).collect();
        assert_eq!(names, vec!["d", "a"]);
    }

    #[test]
    fn pop_min_returns_weakest_first() {
        let mut top = TopK::new(3);
        top.push(r(0.5, "a", 0));
        top.push(r(0.2, "b", 1));
        top.push(r(0.7, "c", 2));
        assert_eq!(top.pop_min().map(|m| m.name), Some("b"));
        assert_eq!(top.pop_min().map(|m| m.name), Some("a"));
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn ties_prefer_smaller_names() {
        let mut top = TopK::new(1);
        top.push(r(0.5, "b", 1));
        assert!(top.push(r(0.5, "a", 0)));
        assert!(!top.push(r(0.5, "c", 2)));
        assert_eq!(top.pop_min().map(|m| m.name), Some("a"));
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut top = TopK::new(0);
        assert!(!top.push(r(1.0, "a", 0)));
        assert!(top.is_empty());
    }
}
