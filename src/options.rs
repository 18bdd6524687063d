use alloc::sync::Arc;

use crate::{Diagnostic, Direction};

/// The host's "schedule a reflow" capability.
///
/// The engine never runs a pass on its own; it calls this and waits for the host to call
/// `WindowEngine::reflow` (typically once per animation frame).
pub type ScheduleReflowCallback = Arc<dyn Fn() + Send + Sync>;

/// Receives every diagnostic the engine reports. The host decides whether to log or ignore.
pub type DiagnosticCallback = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Configuration for [`crate::WindowEngine`].
///
/// Per-pass layout inputs (item count, viewport, scroll position, spacing, overhang, default
/// size) are not options: they arrive with every [`crate::LayoutSnapshot`].
#[derive(Clone)]
pub struct EngineOptions {
    pub direction: Direction,

    /// When `true` (the default), growth keeps placing unmeasured items at the average size
    /// until the target interval is covered. When `false`, growth in each direction stops at
    /// the first unmeasured item, producing smaller windows that need more passes.
    pub estimate: bool,

    pub on_schedule_reflow: Option<ScheduleReflowCallback>,

    pub on_diagnostic: Option<DiagnosticCallback>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self {
            direction: Direction::Vertical,
            estimate: true,
            on_schedule_reflow: None,
            on_diagnostic: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_estimate(mut self, estimate: bool) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn with_on_schedule_reflow(
        mut self,
        on_schedule_reflow: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_schedule_reflow = on_schedule_reflow.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_diagnostic(
        mut self,
        on_diagnostic: Option<impl Fn(&Diagnostic) + Send + Sync + 'static>,
    ) -> Self {
        self.on_diagnostic = on_diagnostic.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        wwarn!(
            code = diagnostic.code(),
            severity = ?diagnostic.severity,
            kind = ?diagnostic.kind,
            "diagnostic"
        );
        if let Some(cb) = &self.on_diagnostic {
            cb(&diagnostic);
        }
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("direction", &self.direction)
            .field("estimate", &self.estimate)
            .field("on_schedule_reflow", &self.on_schedule_reflow.is_some())
            .field("on_diagnostic", &self.on_diagnostic.is_some())
            .finish()
    }
}
