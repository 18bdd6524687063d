//! The windowing steps of one reflow pass, as separately testable functions.
//!
//! [`crate::WindowEngine`] owns all state and calls these in a fixed order: pick an anchor,
//! grow a window around it, then correct the accumulated estimation error. A layout other
//! than a single column (a grid, say) implements [`WindowingStrategy`] and reuses the same
//! orchestration.

use crate::{Bounds, Diagnostic, LayoutSnapshot, SizeEstimator, Window};

/// Everything a strategy may read during one pass.
#[derive(Clone, Copy, Debug)]
pub struct PassContext<'a> {
    pub snapshot: &'a LayoutSnapshot,
    pub sizes: &'a SizeEstimator,
    /// Total content size computed at the start of the pass.
    pub content_size: i64,
    /// See [`crate::EngineOptions::estimate`].
    pub estimate: bool,
}

impl PassContext<'_> {
    /// The size assumed for unmeasured items.
    pub fn average_size(&self) -> u32 {
        self.sizes
            .average_size()
            .unwrap_or(self.snapshot.default_item_size)
    }

    pub fn spacing(&self) -> i64 {
        i64::from(self.snapshot.spacing)
    }

    /// Average size plus spacing: the estimated stride between item starts.
    pub fn average_delta(&self) -> i64 {
        i64::from(self.average_size()) + self.spacing()
    }

    /// The size to place `index` with, and whether it was measured.
    pub fn size_of(&self, index: usize) -> (u32, bool) {
        match self.sizes.known_size(index) {
            Some(size) => (size, true),
            None => (self.average_size(), false),
        }
    }

    pub fn estimated_position(&self, index: usize) -> i64 {
        index as i64 * self.average_delta()
    }

    pub(crate) fn viewport(&self) -> i64 {
        i64::from(self.snapshot.viewport_extent)
    }
}

/// The fixed point a window grows from. Kept across passes until the window settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub index: usize,
    pub position: i64,
}

/// What [`WindowingStrategy::grow_window`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Growth {
    /// No estimated size was used for any visited item.
    pub stable: bool,
    /// Start of the first item.
    pub physical_min: i64,
    /// Where the item after the last one would start (last end plus spacing).
    pub physical_max: i64,
    /// Shift subtracted from the interval (and the host's scroll position) to bring the
    /// anchor back into view. Zero when the anchor already overlapped.
    pub anchor_error: i64,
}

pub trait WindowingStrategy {
    /// Chooses the index to anchor the next window at.
    ///
    /// `window` is the most recently built window, if any; its known bounds are reused so
    /// small scroll deltas keep the same anchor. Recoverable anomalies go to `report`.
    fn compute_anchor(
        &self,
        ctx: &PassContext<'_>,
        window: Option<&Window>,
        lower: i64,
        upper: i64,
        report: &mut dyn FnMut(Diagnostic),
    ) -> usize;

    /// Builds `out` outward from `anchor` until `[lower, upper]` is covered or the list ends.
    fn grow_window(
        &self,
        ctx: &PassContext<'_>,
        anchor: Anchor,
        lower: i64,
        upper: i64,
        out: &mut Window,
    ) -> Growth;

    /// Signed correction that pins a visible list boundary to its true position.
    ///
    /// The engine subtracts the result from every position in `window`, the physical extent,
    /// the anchor, and the scroll position.
    fn correct_error(&self, ctx: &PassContext<'_>, window: &Window, growth: &Growth) -> i64;
}

/// The single-column strategy: items laid end to end along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearStrategy;

impl LinearStrategy {
    /// Anchor from the size estimate alone, for when no known bounds help.
    pub fn estimate_anchor(&self, ctx: &PassContext<'_>, lower: i64, upper: i64) -> usize {
        let last = ctx.snapshot.total_items.saturating_sub(1);
        if lower <= 0 {
            return 0;
        }
        if upper > ctx.content_size - ctx.viewport() {
            return last;
        }
        let mid = (lower + upper) / 2;
        let index = mid / ctx.average_delta().max(1);
        usize::try_from(index).unwrap_or(0).min(last)
    }
}

impl WindowingStrategy for LinearStrategy {
    fn compute_anchor(
        &self,
        ctx: &PassContext<'_>,
        window: Option<&Window>,
        lower: i64,
        upper: i64,
        report: &mut dyn FnMut(Diagnostic),
    ) -> usize {
        let Some(window) = window else {
            return self.estimate_anchor(ctx, lower, upper);
        };
        let (Some(range), Some(first), Some(last)) =
            (window.range(), window.first_bounds(), window.last_bounds())
        else {
            return self.estimate_anchor(ctx, lower, upper);
        };

        // A big jump (e.g. a programmatic scroll) leaves the old window behind entirely.
        if last.end() < lower || first.position > upper {
            return self.estimate_anchor(ctx, lower, upper);
        }
        if first.overlaps(lower, upper) {
            return range.first;
        }
        if last.overlaps(lower, upper) {
            return range.last;
        }

        match window.find_overlapping(lower, upper) {
            Some(index) => index,
            None => {
                report(Diagnostic::anchor_search_miss(lower, upper));
                self.estimate_anchor(ctx, lower, upper)
            }
        }
    }

    fn grow_window(
        &self,
        ctx: &PassContext<'_>,
        anchor: Anchor,
        lower: i64,
        upper: i64,
        out: &mut Window,
    ) -> Growth {
        let spacing = ctx.spacing();
        let total = ctx.snapshot.total_items;
        let (anchor_size, mut stable) = ctx.size_of(anchor.index);

        let mut anchor_error = 0;
        let anchor_end = anchor.position + i64::from(anchor_size) + spacing;
        if anchor_end < lower {
            anchor_error = lower - anchor_end;
        }
        if anchor.position - spacing > upper {
            anchor_error = upper - (anchor.position - spacing);
        }
        let lower = lower - anchor_error;
        let upper = upper - anchor_error;

        out.seed(anchor.index, Bounds::new(anchor.position, anchor_size));
        let mut physical_min = anchor.position;
        let mut physical_max = anchor_end;

        let mut first = anchor.index;
        while physical_min > lower && first > 0 {
            first -= 1;
            let (size, known) = ctx.size_of(first);
            stable &= known;
            let position = physical_min - i64::from(size) - spacing;
            out.push_front(Bounds::new(position, size));
            physical_min = position;
            if !stable && !ctx.estimate {
                break;
            }
        }

        let mut next = anchor.index + 1;
        while physical_max < upper && next < total {
            let (size, known) = ctx.size_of(next);
            stable &= known;
            out.push_back(Bounds::new(physical_max, size));
            physical_max += i64::from(size) + spacing;
            next += 1;
            if !stable && !ctx.estimate {
                break;
            }
        }

        wtrace!(
            anchor = anchor.index,
            first,
            last = next - 1,
            physical_min,
            physical_max,
            anchor_error,
            stable,
            "grow_window"
        );

        Growth {
            stable,
            physical_min,
            physical_max,
            anchor_error,
        }
    }

    fn correct_error(&self, ctx: &PassContext<'_>, window: &Window, growth: &Growth) -> i64 {
        let Some(range) = window.range() else {
            return 0;
        };
        let delta = ctx.average_delta();
        let last_index = ctx.snapshot.total_items.saturating_sub(1);

        if range.first == 0 {
            growth.physical_min
        } else if growth.physical_min <= 0 {
            growth.physical_min - range.first as i64 * delta
        } else if range.last == last_index {
            growth.physical_max - ctx.content_size
        } else if growth.physical_max >= ctx.content_size {
            let remaining = (last_index - range.last) as i64;
            (growth.physical_max - ctx.content_size) + remaining * delta
        } else {
            0
        }
    }
}
