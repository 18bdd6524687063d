use alloc::collections::VecDeque;

use crate::{Bounds, ItemRange};

/// A contiguous run of item bounds, `first..=last`, sorted by position.
///
/// The engine keeps two of these: the committed window from the last stable pass and the
/// one being built. Growth only ever extends a window at either end, so a deque indexed
/// from `first` is enough.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    first: usize,
    bounds: VecDeque<Bounds>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn range(&self) -> Option<ItemRange> {
        (!self.is_empty()).then(|| ItemRange::new(self.first, self.first + self.len() - 1))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Bounds> {
        let offset = index.checked_sub(self.first)?;
        self.bounds.get(offset)
    }

    pub fn first_bounds(&self) -> Option<&Bounds> {
        self.bounds.front()
    }

    pub fn last_bounds(&self) -> Option<&Bounds> {
        self.bounds.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Bounds)> + '_ {
        let first = self.first;
        self.bounds
            .iter()
            .enumerate()
            .map(move |(i, b)| (first + i, *b))
    }

    /// Binary search for an item overlapping `[lower, upper]`.
    ///
    /// Each probe discards the half that ends before `lower`; the first survivor overlaps
    /// unless it starts after `upper`.
    pub fn find_overlapping(&self, lower: i64, upper: i64) -> Option<usize> {
        let i = self.bounds.partition_point(|b| b.end() < lower);
        let b = self.bounds.get(i)?;
        (b.position <= upper).then_some(self.first + i)
    }

    /// Whether `pos[i] + size[i] + spacing == pos[i + 1]` holds for every neighbour pair.
    pub fn is_contiguous(&self, spacing: u32) -> bool {
        self.bounds
            .iter()
            .zip(self.bounds.iter().skip(1))
            .all(|(a, b)| a.end() + i64::from(spacing) == b.position)
    }

    pub(crate) fn clear(&mut self) {
        self.first = 0;
        self.bounds.clear();
    }

    pub(crate) fn seed(&mut self, index: usize, bounds: Bounds) {
        self.bounds.clear();
        self.first = index;
        self.bounds.push_back(bounds);
    }

    pub(crate) fn push_front(&mut self, bounds: Bounds) {
        debug_assert!(
            self.first > 0 && !self.is_empty(),
            "Window::push_front past index 0"
        );
        self.first = self.first.saturating_sub(1);
        self.bounds.push_front(bounds);
    }

    pub(crate) fn push_back(&mut self, bounds: Bounds) {
        self.bounds.push_back(bounds);
    }

    /// Moves every item by `-delta`.
    pub(crate) fn shift(&mut self, delta: i64) {
        for b in self.bounds.iter_mut() {
            b.position -= delta;
        }
    }

    /// Drops items at or past `total_items`.
    pub(crate) fn truncate(&mut self, total_items: usize) {
        if total_items <= self.first {
            self.clear();
            return;
        }
        self.bounds.truncate(total_items - self.first);
    }
}
