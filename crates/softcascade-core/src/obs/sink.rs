//! Metrics sink boundary.
//!
//! Cascade logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// CascadeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CascadeKind {
    Delete,
    Restore,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CascadeStart {
        kind: CascadeKind,
        entity_path: &'static str,
    },
    ValidationFailed {
        entity_path: &'static str,
    },
    RowDeleted {
        entity_path: &'static str,
    },
    PivotRemoved {
        entity_path: &'static str,
    },
    RowRestored {
        entity_path: &'static str,
    },
    RowOutsideWindow {
        entity_path: &'static str,
    },
    RelationSkipped {
        entity_path: &'static str,
    },
    CycleSkipped {
        kind: CascadeKind,
        entity_path: &'static str,
    },
}

impl MetricsEvent {
    const fn entity_path(&self) -> &'static str {
        match self {
            Self::CascadeStart { entity_path, .. }
            | Self::ValidationFailed { entity_path }
            | Self::RowDeleted { entity_path }
            | Self::PivotRemoved { entity_path }
            | Self::RowRestored { entity_path }
            | Self::RowOutsideWindow { entity_path }
            | Self::RelationSkipped { entity_path }
            | Self::CycleSkipped { entity_path, .. } => entity_path,
        }
    }
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

const fn bump(counter: &mut u64) {
    *counter = counter.saturating_add(1);
}

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;

            // Cycle skips are chain-level, not attributed to one entity.
            if matches!(event, MetricsEvent::CycleSkipped { .. }) {
                bump(&mut ops.cycle_skips);
                return;
            }

            let entry = m
                .entities
                .entry(event.entity_path().to_string())
                .or_default();
            match event {
                MetricsEvent::CascadeStart {
                    kind: CascadeKind::Delete,
                    ..
                } => {
                    bump(&mut ops.delete_cascades);
                    bump(&mut entry.delete_cascades);
                }
                MetricsEvent::CascadeStart {
                    kind: CascadeKind::Restore,
                    ..
                } => {
                    bump(&mut ops.restore_cascades);
                    bump(&mut entry.restore_cascades);
                }
                MetricsEvent::ValidationFailed { .. } => {
                    bump(&mut ops.validation_failures);
                    bump(&mut entry.validation_failures);
                }
                MetricsEvent::RowDeleted { .. } => {
                    bump(&mut ops.rows_deleted);
                    bump(&mut entry.rows_deleted);
                }
                MetricsEvent::PivotRemoved { .. } => {
                    bump(&mut ops.pivots_removed);
                    bump(&mut entry.pivots_removed);
                }
                MetricsEvent::RowRestored { .. } => {
                    bump(&mut ops.rows_restored);
                    bump(&mut entry.rows_restored);
                }
                MetricsEvent::RowOutsideWindow { .. } => {
                    bump(&mut ops.rows_outside_window);
                    bump(&mut entry.rows_outside_window);
                }
                MetricsEvent::RelationSkipped { .. } => {
                    bump(&mut ops.relations_skipped);
                    bump(&mut entry.relations_skipped);
                }
                MetricsEvent::CycleSkipped { .. } => {}
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
///
/// `window_start_secs` filters by window start (`EventState::since_secs`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_secs: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_secs)
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
