#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Direction, ItemMeasurement};

#[cfg(feature = "std")]
type MetricsMap = HashMap<usize, ItemMetrics>;
#[cfg(not(feature = "std"))]
type MetricsMap = BTreeMap<usize, ItemMetrics>;

/// The last known outer box of a measured item (margins included).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetrics {
    pub width: u32,
    pub height: u32,
    /// Size this item currently contributes to the running average, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    counted: Option<u32>,
}

impl ItemMetrics {
    pub fn size(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Vertical => self.height,
            Direction::Horizontal => self.width,
        }
    }

    pub fn is_counted(&self) -> bool {
        self.counted.is_some()
    }
}

/// Per-item metrics plus the running average item size.
///
/// Metrics persist for every index ever measured, including ones that have since left the
/// window. Only measurements taken while an item was windowed feed the average; each item
/// contributes its latest size once, so updates are O(1) deltas on a running total.
#[derive(Clone, Debug, Default)]
pub struct SizeEstimator {
    metrics: MetricsMap,
    direction: Direction,
    measured_total: u64,
    measured_count: usize,
    average: Option<u32>,
}

impl SizeEstimator {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Re-reads every counted item's size on the new axis. Returns `false` if unchanged.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction == direction {
            return false;
        }
        self.direction = direction;
        self.measured_total = 0;
        for metrics in self.metrics.values_mut() {
            if metrics.counted.is_some() {
                let size = metrics.size(direction);
                metrics.counted = Some(size);
                self.measured_total += u64::from(size);
            }
        }
        self.refresh_average();
        true
    }

    pub fn metrics(&self, index: usize) -> Option<ItemMetrics> {
        self.metrics.get(&index).copied()
    }

    /// The measured size of `index` on the scroll axis, if it was ever measured.
    pub fn known_size(&self, index: usize) -> Option<u32> {
        self.metrics.get(&index).map(|m| m.size(self.direction))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Number of items contributing to the average.
    pub fn measured_count(&self) -> usize {
        self.measured_count
    }

    /// `round(total / count)` over counted items, or `None` before any item was counted.
    pub fn average_size(&self) -> Option<u32> {
        self.average
    }

    /// Stores a measurement and, when `windowed`, folds it into the running total.
    ///
    /// Call [`Self::refresh_average`] once the batch is done.
    pub(crate) fn record(
        &mut self,
        index: usize,
        measurement: ItemMeasurement,
        windowed: bool,
    ) {
        let direction = self.direction;
        let metrics = self.metrics.entry(index).or_insert(ItemMetrics {
            width: 0,
            height: 0,
            counted: None,
        });
        metrics.width = measurement.outer_width();
        metrics.height = measurement.outer_height();
        let size = metrics.size(direction);

        if windowed {
            match metrics.counted.replace(size) {
                Some(prev) => {
                    self.measured_total = self.measured_total - u64::from(prev) + u64::from(size);
                }
                None => {
                    self.measured_total += u64::from(size);
                    self.measured_count += 1;
                }
            }
        }
    }

    pub(crate) fn refresh_average(&mut self) {
        self.average = match self.measured_count {
            0 => None,
            n => {
                let n = n as u64;
                let avg = (self.measured_total + n / 2) / n;
                Some(u32::try_from(avg).unwrap_or(u32::MAX))
            }
        };
    }

    pub(crate) fn clear(&mut self) {
        self.metrics.clear();
        self.measured_total = 0;
        self.measured_count = 0;
        self.average = None;
    }
}
