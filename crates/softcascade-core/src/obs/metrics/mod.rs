use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for cascade operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_secs: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            entities: BTreeMap::new(),
            since_secs: Timestamp::now().get(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Hook entrypoints
    pub delete_cascades: u64,
    pub restore_cascades: u64,
    pub validation_failures: u64,

    // Rows touched
    pub rows_deleted: u64,
    pub pivots_removed: u64,
    pub rows_restored: u64,

    // Rows and relations left alone
    pub rows_outside_window: u64,
    pub relations_skipped: u64,
    pub cycle_skips: u64,
}

///
/// EntityCounters
/// Counters keyed by the parent entity that ran the cascade.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntityCounters {
    pub delete_cascades: u64,
    pub restore_cascades: u64,
    pub validation_failures: u64,
    pub rows_deleted: u64,
    pub pivots_removed: u64,
    pub rows_restored: u64,
    pub rows_outside_window: u64,
    pub relations_skipped: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since_secs`.
    pub counters: Option<EventState>,
    /// Per-entity counters and averages.
    pub entity_counters: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub delete_cascades: u64,
    pub restore_cascades: u64,
    pub validation_failures: u64,
    pub rows_deleted: u64,
    pub pivots_removed: u64,
    pub rows_restored: u64,
    pub rows_outside_window: u64,
    pub relations_skipped: u64,
    pub avg_rows_per_delete: f64,
    pub avg_rows_per_restore: f64,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(rows: u64, calls: u64) -> f64 {
    if calls > 0 {
        rows as f64 / calls as f64
    } else {
        0.0
    }
}

// Rows deleted, detached or restored; saturates like the counters do.
const fn touched_rows(summary: &EntitySummary) -> u64 {
    summary
        .rows_deleted
        .saturating_add(summary.pivots_removed)
        .saturating_add(summary.rows_restored)
}

/// Build a metrics report, optionally dropped when the state window started
/// before `window_start_secs`.
#[must_use]
pub fn report_window_start(window_start_secs: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if window_start_secs.is_some_and(|start| snap.since_secs < start) {
        return EventReport::default();
    }

    let mut entity_counters = snap
        .entities
        .iter()
        .map(|(path, ops)| EntitySummary {
            path: path.clone(),
            delete_cascades: ops.delete_cascades,
            restore_cascades: ops.restore_cascades,
            validation_failures: ops.validation_failures,
            rows_deleted: ops.rows_deleted,
            pivots_removed: ops.pivots_removed,
            rows_restored: ops.rows_restored,
            rows_outside_window: ops.rows_outside_window,
            relations_skipped: ops.relations_skipped,
            avg_rows_per_delete: ratio(
                ops.rows_deleted.saturating_add(ops.pivots_removed),
                ops.delete_cascades,
            ),
            avg_rows_per_restore: ratio(ops.rows_restored, ops.restore_cascades),
        })
        .collect::<Vec<_>>();

    // Busiest entities first; path keeps the order stable.
    entity_counters.sort_by(|a, b| {
        let a_rows = touched_rows(a);
        let b_rows = touched_rows(b);
        b_rows.cmp(&a_rows).then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        entity_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.delete_cascades = 3;
            m.ops.rows_deleted = 2;
            m.entities.insert(
                "alpha".to_string(),
                EntityCounters {
                    delete_cascades: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops.delete_cascades, 0);
            assert_eq!(m.ops.rows_deleted, 0);
            assert!(m.entities.is_empty());
        });
    }

    #[test]
    fn report_orders_entities_by_rows_touched() {
        reset_all();
        with_state_mut(|m| {
            m.entities.insert(
                "alpha".to_string(),
                EntityCounters {
                    delete_cascades: 1,
                    rows_deleted: 1,
                    ..Default::default()
                },
            );
            m.entities.insert(
                "beta".to_string(),
                EntityCounters {
                    delete_cascades: 2,
                    rows_deleted: 4,
                    pivots_removed: 2,
                    ..Default::default()
                },
            );
        });

        let report = report_window_start(None);
        let paths = report
            .entity_counters
            .iter()
            .map(|summary| summary.path.as_str())
            .collect::<Vec<_>>();

        assert_eq!(paths, ["beta", "alpha"]);
        assert_eq!(report.entity_counters[0].avg_rows_per_delete, 3.0);
        assert_eq!(report.entity_counters[1].avg_rows_per_restore, 0.0);
        reset_all();
    }

    #[test]
    fn report_ordering_saturates_on_huge_counters() {
        reset_all();
        with_state_mut(|m| {
            m.entities.insert(
                "alpha".to_string(),
                EntityCounters {
                    rows_deleted: u64::MAX,
                    pivots_removed: u64::MAX,
                    rows_restored: 1,
                    ..Default::default()
                },
            );
            m.entities.insert(
                "beta".to_string(),
                EntityCounters {
                    rows_restored: 5,
                    ..Default::default()
                },
            );
        });

        let report = report_window_start(None);

        assert_eq!(report.entity_counters[0].path, "alpha");
        assert_eq!(touched_rows(&report.entity_counters[0]), u64::MAX);
        reset_all();
    }

    #[test]
    fn report_is_empty_when_window_starts_later() {
        reset_all();
        let since = with_state(|m| m.since_secs);

        let report = report_window_start(Some(since + 3_600));

        assert!(report.counters.is_none());
        assert!(report.entity_counters.is_empty());
    }
}
