//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module never reaches into hosts; it only counts what the cascade
//! reports through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EntitySummary, EventOps, EventReport, EventState};
pub use sink::{
    CascadeKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
