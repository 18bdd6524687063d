// Example: a host loop that measures items as they are windowed and applies scroll corrections.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use windowed_range::{
    Align, Bounds, EngineOptions, ItemMeasurement, LayoutSink, LayoutSnapshot, RangeChange,
    ReflowPhase, WindowEngine,
};

/// Row heights the host only learns by rendering.
fn real_height(index: usize) -> u32 {
    24 + (index as u32 * 37 % 5) * 12
}

#[derive(Default)]
struct Host {
    scroll_position: i64,
    content_size: i64,
    to_measure: Vec<usize>,
}

impl LayoutSink for Host {
    fn scroll_size_changed(&mut self, content_size: i64) {
        self.content_size = content_size;
    }

    fn range_changed(&mut self, change: RangeChange) {
        println!(
            "  range={:?} visible={:?} stable={} remeasure={}",
            change.range, change.visible, change.stable, change.remeasure
        );
        self.to_measure = change.range.map(|r| r.indexes().collect()).unwrap_or_default();
    }

    fn item_positions(&mut self, positions: &mut dyn Iterator<Item = (usize, Bounds)>) {
        let placed: Vec<_> = positions.take(3).collect();
        println!("  first positions={placed:?}");
    }

    fn scroll_error(&mut self, delta: i64) {
        if delta != 0 {
            println!("  scroll correction={delta}");
        }
        self.scroll_position -= delta;
    }
}

fn main() {
    let scheduled = Arc::new(AtomicBool::new(false));
    let mut engine = WindowEngine::new(EngineOptions::new().with_on_schedule_reflow(Some({
        let scheduled = Arc::clone(&scheduled);
        move || scheduled.store(true, Ordering::Relaxed)
    })));
    let mut host = Host::default();
    let base = LayoutSnapshot::new(10_000, 600, 40)
        .with_spacing(4)
        .with_overhang(120);

    let mut run = |engine: &mut WindowEngine, host: &mut Host, label: &str| {
        for pass in 0..20 {
            let snapshot = base.with_scroll_position(host.scroll_position);
            println!("{label} pass {pass}: scroll={}", host.scroll_position);
            engine.reflow(&snapshot, host);

            scheduled.store(false, Ordering::Relaxed);
            let measured = host
                .to_measure
                .iter()
                .filter(|&&i| engine.item_metrics(i).is_none())
                .map(|&i| (i, ItemMeasurement::new(320, real_height(i))))
                .collect::<Vec<_>>();
            if !measured.is_empty() {
                engine.update_item_sizes(measured);
            }
            if !scheduled.load(Ordering::Relaxed) && engine.phase() == ReflowPhase::Settled {
                break;
            }
        }
        println!(
            "{label} settled: content={} average={:?} measured={}",
            host.content_size,
            engine.average_item_size(),
            engine.measured_count()
        );
    };

    run(&mut engine, &mut host, "top");

    host.scroll_position = 150_000;
    engine.mark_dirty();
    run(&mut engine, &mut host, "jump");

    engine.scroll_to_index(9_999, Align::End);
    run(&mut engine, &mut host, "end");
}
