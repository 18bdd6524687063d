/// How serious a reported anomaly is. Neither level interrupts the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// Measurements arrived but no windowed item has ever been measured, so there is no
    /// average to update and no reflow is scheduled.
    NoMeasurements,
    /// The window searched for a reusable anchor had no item overlapping `[lower, upper]`.
    /// The anchor was recomputed from the size estimate instead.
    AnchorSearchMiss { lower: i64, upper: i64 },
}

/// A structured report of a recoverable anomaly, delivered through
/// [`crate::EngineOptions::on_diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub(crate) fn no_measurements() -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::NoMeasurements,
        }
    }

    pub(crate) fn anchor_search_miss(lower: i64, upper: i64) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::AnchorSearchMiss { lower, upper },
        }
    }

    /// A stable identifier suitable for log filtering or metrics labels.
    pub fn code(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::NoMeasurements => "no-measurements",
            DiagnosticKind::AnchorSearchMiss { .. } => "anchor-search-miss",
        }
    }
}
