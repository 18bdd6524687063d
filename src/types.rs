use core::ops::RangeInclusive;

/// The scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Items stack top to bottom; sizes come from `height`.
    #[default]
    Vertical,
    /// Items stack left to right; sizes come from `width`.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current scroll position if the item is fully visible, otherwise align the
    /// nearest edge.
    Auto,
}

/// Position and size of one windowed item along the scroll axis, in content space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub position: i64,
    /// Size in the scroll axis (excludes spacing).
    pub size: u32,
}

impl Bounds {
    pub fn new(position: i64, size: u32) -> Self {
        Self { position, size }
    }

    pub fn end(&self) -> i64 {
        self.position + i64::from(self.size)
    }

    /// Whether `[position, end]` touches the closed interval `[lower, upper]`.
    pub fn overlaps(&self, lower: i64, upper: i64) -> bool {
        self.position <= upper && self.end() >= lower
    }
}

/// An inclusive, non-empty run of item indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRange {
    pub first: usize,
    pub last: usize,
}

impl ItemRange {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "ItemRange: first > last ({first} > {last})");
        Self { first, last }
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// The range emitted to the host after every pass.
///
/// `range == None` is the empty range (zero items or a zero-sized viewport).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeChange {
    /// Items to materialize (viewport plus overhang).
    pub range: Option<ItemRange>,
    /// Items intersecting the viewport itself.
    pub visible: Option<ItemRange>,
    /// `false` when some item in `range` was placed with an estimated size.
    pub stable: bool,
    /// `true` when previously reported sizes are no longer valid (e.g. the axis changed).
    pub remeasure: bool,
}

/// Where the engine is in its reflow cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReflowPhase {
    /// No pass has been requested yet.
    #[default]
    Idle,
    /// An anchor is fixed and the window may need more passes.
    Building,
    /// The last pass committed its window or moved nothing; the anchor is cleared.
    Settled,
}
