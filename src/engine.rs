use alloc::vec::Vec;
use core::mem;

use crate::{
    Align, Anchor, Bounds, Diagnostic, Direction, EngineOptions, ItemMeasurement, ItemMetrics,
    ItemRange, LayoutSink, LayoutSnapshot, LinearStrategy, PassContext, RangeChange,
    ReflowPhase, ReflowRecord, SizeEstimator, Window, WindowingStrategy,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScrollTarget {
    index: usize,
    align: Align,
}

/// An incremental windowing engine for one scrollable list.
///
/// The engine is pure computation driven by its host:
/// - The host pushes measurements with [`Self::update_item_sizes`].
/// - The engine asks for a pass through [`crate::EngineOptions::on_schedule_reflow`].
/// - The host runs [`Self::reflow`] with a fresh [`LayoutSnapshot`] and applies what comes out
///   of the [`LayoutSink`]: content size, the range to render, item positions, and a scroll
///   correction.
///
/// Each pass grows a window outward from an anchor item using measured sizes where known
/// and the running average elsewhere. While a window still contains estimates its anchor
/// survives across passes, so items do not jitter as measurements arrive. A pass that used
/// no estimates is committed as the new stable window and releases the anchor.
#[derive(Clone, Debug)]
pub struct WindowEngine<S = LinearStrategy> {
    options: EngineOptions,
    strategy: S,
    sizes: SizeEstimator,

    committed: Window,
    next: Window,
    anchor: Option<Anchor>,
    range: Option<ItemRange>,
    visible: Option<ItemRange>,
    stable: bool,
    physical_min: i64,
    physical_max: i64,

    scroll_position: i64,
    scroll_error: i64,
    content_size: Option<i64>,

    phase: ReflowPhase,
    pending: bool,
    remeasure: bool,
    scroll_target: Option<ScrollTarget>,
    last_snapshot: Option<LayoutSnapshot>,
}

impl Default for WindowEngine<LinearStrategy> {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl WindowEngine<LinearStrategy> {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_strategy(options, LinearStrategy)
    }
}

impl<S: WindowingStrategy> WindowEngine<S> {
    pub fn with_strategy(options: EngineOptions, strategy: S) -> Self {
        wdebug!(
            direction = ?options.direction,
            estimate = options.estimate,
            "WindowEngine::new"
        );
        Self {
            sizes: SizeEstimator::new(options.direction),
            options,
            strategy,
            committed: Window::new(),
            next: Window::new(),
            anchor: None,
            range: None,
            visible: None,
            stable: true,
            physical_min: 0,
            physical_max: 0,
            scroll_position: 0,
            scroll_error: 0,
            content_size: None,
            phase: ReflowPhase::Idle,
            pending: false,
            remeasure: false,
            scroll_target: None,
            last_snapshot: None,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    /// Switches the scroll axis.
    ///
    /// Known bounds are meaningless on the other axis, so both windows and the anchor are
    /// dropped and the next emitted range asks the host to remeasure.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.sizes.set_direction(direction) {
            return;
        }
        wdebug!(?direction, "set_direction");
        self.options.direction = direction;
        self.committed.clear();
        self.next.clear();
        self.anchor = None;
        self.physical_min = 0;
        self.physical_max = 0;
        self.remeasure = true;
        self.schedule_reflow();
    }

    pub fn set_estimate(&mut self, estimate: bool) {
        if self.options.estimate == estimate {
            return;
        }
        self.options.estimate = estimate;
        self.schedule_reflow();
    }

    pub fn set_on_schedule_reflow(&mut self, f: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_schedule_reflow = f.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn set_on_diagnostic(&mut self, f: Option<impl Fn(&Diagnostic) + Send + Sync + 'static>) {
        self.options.on_diagnostic = f.map(|f| alloc::sync::Arc::new(f) as _);
    }

    /// Records item measurements and schedules a reflow.
    ///
    /// Every measurement updates the item's stored metrics. Only items that are currently
    /// windowed feed the running average (each counted once, at its latest size). If no item
    /// has ever been counted, a [`crate::DiagnosticKind::NoMeasurements`] warning is reported
    /// and no reflow is scheduled.
    ///
    /// Window bounds are left untouched: [`Self::item_bounds`] keeps reporting the last pass's
    /// contiguous layout until the next pass places items at their new sizes.
    pub fn update_item_sizes(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, ItemMeasurement)>,
    ) {
        for (index, measurement) in measurements {
            let windowed = self.committed.contains(index) || self.next.contains(index);
            self.sizes.record(index, measurement, windowed);
            wtrace!(index, windowed, "update_item_sizes");
        }

        if self.sizes.measured_count() == 0 {
            self.options.report(Diagnostic::no_measurements());
            return;
        }
        self.sizes.refresh_average();
        self.schedule_reflow();
    }

    /// Forgets every measurement; sizes fall back to the snapshot's default.
    pub fn reset_measurements(&mut self) {
        self.sizes.clear();
        self.schedule_reflow();
    }

    /// Requests a pass after the host's scroll position, viewport, or item count changed.
    pub fn mark_dirty(&mut self) {
        self.schedule_reflow();
    }

    /// Anchors the next pass at `index` and scrolls so it is aligned per `align`.
    ///
    /// The resulting scroll change is reported through [`LayoutSink::scroll_error`].
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        wtrace!(index, ?align, "scroll_to_index");
        self.scroll_target = Some(ScrollTarget { index, align });
        self.schedule_reflow();
    }

    fn schedule_reflow(&mut self) {
        self.pending = true;
        self.phase = ReflowPhase::Building;
        if let Some(cb) = &self.options.on_schedule_reflow {
            cb();
        }
    }

    pub fn is_reflow_pending(&self) -> bool {
        self.pending
    }

    /// Runs a pass if one was requested (or `force` is set). Returns whether a pass ran.
    pub fn reflow_if_needed(
        &mut self,
        snapshot: &LayoutSnapshot,
        sink: &mut dyn LayoutSink,
        force: bool,
    ) -> bool {
        if !force && !self.pending {
            return false;
        }
        self.reflow(snapshot, sink);
        true
    }

    /// Runs a pass and returns everything it emitted.
    pub fn reflow_collect(&mut self, snapshot: &LayoutSnapshot) -> ReflowRecord {
        let mut record = ReflowRecord::default();
        self.reflow(snapshot, &mut record);
        record
    }

    /// Runs one reflow pass against `snapshot`.
    pub fn reflow(&mut self, snapshot: &LayoutSnapshot, sink: &mut dyn LayoutSink) {
        let prev_range = self.range;
        let prev_content_size = self.content_size;
        self.pending = false;
        self.phase = ReflowPhase::Building;

        let spacing_changed = self.absorb_snapshot(snapshot);
        let content_size = self.update_content_size(snapshot);
        self.scroll_position = snapshot.scroll_position;
        self.clamp_scroll_position(snapshot, content_size);
        self.compute_active_items(snapshot, content_size);
        // Pinning a list boundary can push the offset past either end.
        self.clamp_scroll_position(snapshot, content_size);
        self.update_visible(snapshot);

        if prev_content_size != Some(content_size) {
            sink.scroll_size_changed(content_size);
        }
        let remeasure = mem::take(&mut self.remeasure);
        sink.range_changed(RangeChange {
            range: self.range,
            visible: self.visible,
            stable: self.stable,
            remeasure,
        });

        if self.range.is_none() {
            let delta = mem::take(&mut self.scroll_error);
            if delta != 0 {
                sink.scroll_error(delta);
            }
            self.reset_build_state();
            return;
        }

        let window = self.built_window();
        sink.item_positions(&mut window.iter());
        sink.scroll_error(mem::take(&mut self.scroll_error));

        // A committed window needs no anchor; neither does a pass that moved nothing.
        if self.stable || (self.range == prev_range && !remeasure && !spacing_changed) {
            self.reset_build_state();
        }
    }

    /// Stores the snapshot, reconciling item-count changes. Returns whether spacing changed.
    fn absorb_snapshot(&mut self, snapshot: &LayoutSnapshot) -> bool {
        let Some(prev) = self.last_snapshot.replace(*snapshot) else {
            return false;
        };
        if prev.total_items != snapshot.total_items {
            let total = snapshot.total_items;
            wdebug!(from = prev.total_items, to = total, "item count changed");
            self.committed.truncate(total);
            self.next.truncate(total);
            if self.anchor.is_some_and(|a| a.index >= total) {
                self.anchor = None;
            }
            if total < prev.total_items {
                self.physical_max = self
                    .built_window()
                    .last_bounds()
                    .map(|b| b.end() + i64::from(snapshot.spacing))
                    .unwrap_or(0);
            }
        }
        prev.spacing != snapshot.spacing
    }

    fn update_content_size(&mut self, snapshot: &LayoutSnapshot) -> i64 {
        let ctx = PassContext {
            snapshot,
            sizes: &self.sizes,
            content_size: 0,
            estimate: self.options.estimate,
        };
        let estimated = snapshot.total_items as i64 * ctx.average_delta();
        let size = self.physical_max.max(estimated);
        self.content_size = Some(size);
        size
    }

    fn clamp_scroll_position(&mut self, snapshot: &LayoutSnapshot, content_size: i64) {
        let max_scroll = max_scroll_position(snapshot, content_size);
        let clamped = self.scroll_position.clamp(0, max_scroll);
        if clamped != self.scroll_position {
            wtrace!(from = self.scroll_position, to = clamped, "clamp scroll position");
            self.scroll_error += self.scroll_position - clamped;
            self.scroll_position = clamped;
        }
    }

    fn compute_active_items(&mut self, snapshot: &LayoutSnapshot, content_size: i64) {
        if snapshot.is_degenerate() {
            self.clear_items();
            return;
        }

        let ctx = PassContext {
            snapshot,
            sizes: &self.sizes,
            content_size,
            estimate: self.options.estimate,
        };
        let latest = if self.stable {
            &self.committed
        } else {
            &self.next
        };
        let latest = (!latest.is_empty()).then_some(latest);
        let position_of = |index: usize| {
            latest
                .and_then(|w| w.get(index))
                .map(|b| b.position)
                .unwrap_or_else(|| ctx.estimated_position(index))
        };

        if let Some(target) = self.scroll_target.take() {
            let index = target.index.min(snapshot.total_items - 1);
            let position = position_of(index);
            let (size, _) = ctx.size_of(index);
            let to = aligned_scroll_position(
                target.align,
                self.scroll_position,
                position,
                size,
                ctx.viewport(),
            )
            .clamp(0, max_scroll_position(snapshot, content_size));
            self.scroll_error += self.scroll_position - to;
            self.scroll_position = to;
            self.anchor = Some(Anchor { index, position });
        }

        let overhang = i64::from(snapshot.overhang);
        let lower = self.scroll_position - overhang;
        let upper = self.scroll_position + ctx.viewport() + overhang;

        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let options = &self.options;
                let index = self.strategy.compute_anchor(
                    &ctx,
                    latest,
                    lower,
                    upper,
                    &mut |d| options.report(d),
                );
                Anchor {
                    index,
                    position: position_of(index),
                }
            }
        };
        wtrace!(lower, upper, anchor = anchor.index, position = anchor.position, "pass");

        let growth = self
            .strategy
            .grow_window(&ctx, anchor, lower, upper, &mut self.next);
        if growth.anchor_error != 0 {
            self.scroll_position -= growth.anchor_error;
            self.scroll_error += growth.anchor_error;
        }

        let mut anchor = anchor;
        let mut physical_min = growth.physical_min;
        let mut physical_max = growth.physical_max;
        let err = self.strategy.correct_error(&ctx, &self.next, &growth);
        if err != 0 {
            wtrace!(err, "correct_error");
            self.next.shift(err);
            physical_min -= err;
            physical_max -= err;
            anchor.position -= err;
            self.scroll_position -= err;
            self.scroll_error += err;
        }

        self.physical_min = physical_min;
        self.physical_max = physical_max;
        self.anchor = Some(anchor);
        self.range = self.next.range();
        self.stable = growth.stable;
        if growth.stable {
            mem::swap(&mut self.committed, &mut self.next);
            self.next.clear();
        }
    }

    fn clear_items(&mut self) {
        self.committed.clear();
        self.next.clear();
        self.anchor = None;
        self.range = None;
        self.visible = None;
        self.stable = true;
        self.physical_min = 0;
        self.physical_max = 0;
    }

    fn update_visible(&mut self, snapshot: &LayoutSnapshot) {
        let top = self.scroll_position;
        let bottom = top + i64::from(snapshot.viewport_extent);
        let mut visible = self
            .built_window()
            .iter()
            .filter(|(_, b)| b.end() > top && b.position < bottom)
            .map(|(i, _)| i);
        let first = visible.next();
        let last = visible.last();
        self.visible = first.map(|f| ItemRange::new(f, last.unwrap_or(f)));
    }

    fn reset_build_state(&mut self) {
        self.anchor = None;
        self.phase = ReflowPhase::Settled;
    }

    pub fn phase(&self) -> ReflowPhase {
        self.phase
    }

    /// The range emitted by the last pass.
    pub fn range(&self) -> Option<ItemRange> {
        self.range
    }

    pub fn visible_range(&self) -> Option<ItemRange> {
        self.visible
    }

    /// Whether the last pass placed every item from a measured size.
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Total content size along the scroll axis, as of the last pass.
    pub fn content_size(&self) -> i64 {
        self.content_size.unwrap_or(0)
    }

    /// `(physical_min, physical_max)` of the last pass, after error correction.
    pub fn physical_extent(&self) -> (i64, i64) {
        (self.physical_min, self.physical_max)
    }

    /// The scroll position the last pass settled on (host offset after applying corrections).
    pub fn scroll_position(&self) -> i64 {
        self.scroll_position
    }

    pub fn average_item_size(&self) -> Option<u32> {
        self.sizes.average_size()
    }

    pub fn measured_count(&self) -> usize {
        self.sizes.measured_count()
    }

    pub fn measurement_cache_len(&self) -> usize {
        self.sizes.len()
    }

    pub fn item_metrics(&self, index: usize) -> Option<ItemMetrics> {
        self.sizes.metrics(index)
    }

    pub fn size_estimator(&self) -> &SizeEstimator {
        &self.sizes
    }

    /// The last stable window.
    pub fn committed_window(&self) -> &Window {
        &self.committed
    }

    /// The window emitted by the last pass (the committed one if that pass was stable).
    pub fn built_window(&self) -> &Window {
        if self.stable {
            &self.committed
        } else {
            &self.next
        }
    }

    pub fn item_bounds(&self, index: usize) -> Option<Bounds> {
        self.built_window().get(index).copied()
    }

    pub fn for_each_item_bounds(&self, mut f: impl FnMut(usize, Bounds)) {
        for (index, bounds) in self.built_window().iter() {
            f(index, bounds);
        }
    }

    /// Collects `(index, bounds)` for the last emitted range into `out` (clears `out` first).
    pub fn collect_item_bounds(&self, out: &mut Vec<(usize, Bounds)>) {
        out.clear();
        self.for_each_item_bounds(|i, b| out.push((i, b)));
    }
}

fn max_scroll_position(snapshot: &LayoutSnapshot, content_size: i64) -> i64 {
    (content_size - i64::from(snapshot.viewport_extent)).max(0)
}

fn aligned_scroll_position(
    align: Align,
    current: i64,
    position: i64,
    size: u32,
    viewport: i64,
) -> i64 {
    let end = position + i64::from(size);
    match align {
        Align::Start => position,
        Align::End => end - viewport,
        Align::Center => position + i64::from(size) / 2 - viewport / 2,
        Align::Auto => {
            if position >= current && end <= current + viewport {
                current
            } else if position < current {
                position
            } else {
                end - viewport
            }
        }
    }
}
