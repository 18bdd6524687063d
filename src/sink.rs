use alloc::vec::Vec;

use crate::{Bounds, RangeChange};

/// Receives the outputs of a reflow pass.
///
/// Within one pass the calls arrive in this order: `scroll_size_changed` (only when the
/// content size changed), `range_changed`, then `item_positions` and `scroll_error` unless
/// the range is empty. All methods default to no-ops.
pub trait LayoutSink {
    fn scroll_size_changed(&mut self, _content_size: i64) {}

    fn range_changed(&mut self, _change: RangeChange) {}

    /// Bounds for every index in the emitted range, in ascending index order.
    fn item_positions(&mut self, _positions: &mut dyn Iterator<Item = (usize, Bounds)>) {}

    /// Amount to subtract from the host's scroll offset so content stays visually in place
    /// after internal repositioning. May be zero.
    fn scroll_error(&mut self, _delta: i64) {}
}

impl LayoutSink for () {}

/// A [`LayoutSink`] that records everything emitted by one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReflowRecord {
    pub scroll_size: Option<i64>,
    pub range: Option<RangeChange>,
    /// `None` when no positions were emitted (empty range).
    pub positions: Option<Vec<(usize, Bounds)>>,
    pub scroll_error: i64,
}

impl ReflowRecord {
    /// Positions emitted, or an empty slice.
    pub fn positions(&self) -> &[(usize, Bounds)] {
        self.positions.as_deref().unwrap_or(&[])
    }

    pub fn bounds(&self, index: usize) -> Option<Bounds> {
        self.positions()
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, b)| *b)
    }
}

impl LayoutSink for ReflowRecord {
    fn scroll_size_changed(&mut self, content_size: i64) {
        self.scroll_size = Some(content_size);
    }

    fn range_changed(&mut self, change: RangeChange) {
        self.range = Some(change);
    }

    fn item_positions(&mut self, positions: &mut dyn Iterator<Item = (usize, Bounds)>) {
        self.positions = Some(positions.collect());
    }

    fn scroll_error(&mut self, delta: i64) {
        self.scroll_error += delta;
    }
}
