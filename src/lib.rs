//! An incremental windowing engine for scrollable lists of variably-sized items.
//!
//! Given a list of arbitrarily many items whose sizes are mostly unknown, this crate computes
//! the minimal contiguous range of items to materialize for a viewport plus an overhang
//! margin, and where each of those items sits along the scroll axis. It never needs every
//! item measured: unmeasured items are placed at the running average of measured ones, and
//! the window converges as the host reports real sizes.
//!
//! It is UI-agnostic. A host layer is expected to provide, once per pass:
//! - the item count, viewport extent, and scroll position
//! - spacing, overhang, and a default item size
//!
//! and to push item measurements as it renders. In return it receives the range to render,
//! per-item positions, the total content size, and scroll corrections that keep the view
//! steady while estimates are replaced by measurements.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod diagnostics;
mod engine;
mod estimate;
mod measure;
mod options;
mod sink;
mod snapshot;
mod strategy;
mod types;
mod window;


pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use engine::WindowEngine;
pub use estimate::{ItemMetrics, SizeEstimator};
pub use measure::{ItemMeasurement, MeasurementError, parse_measurements};
pub use options::{DiagnosticCallback, EngineOptions, ScheduleReflowCallback};
pub use sink::{LayoutSink, ReflowRecord};
pub use snapshot::LayoutSnapshot;
pub use strategy::{Anchor, Growth, LinearStrategy, PassContext, WindowingStrategy};
pub use types::{Align, Bounds, Direction, ItemRange, RangeChange, ReflowPhase};
pub use window::Window;
