pub mod check;
mod validate;
mod window;


pub use validate::{invalid_cascade_relations, validate_model};
pub use window::{RestoreMatch, RestoreWindow};

use crate::{
    error::{CascadeError, InternalError},
    hooks::LifecycleHooks,
    host::{RecordHost, RecordSnapshot, RelatedScope},
    model::{entity::EntityModel, relation::RelationModel},
    obs::sink::{CascadeKind, MetricsEvent, record},
    traits::EntityKind,
    types::{RecordKey, Timestamp},
};
use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

///
/// CascadePolicy
///
/// Tunables shared by every entity the behavior is registered for.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CascadePolicy {
    pub window: RestoreWindow,
    pub debug: bool,
}

///
/// CascadeBehavior
///
/// Cascades soft-delete and restore from a record to its declared relations.
///
/// Registered per entity through [`LifecycleHooks`]; the host fires the
/// hooks from its own `delete` / `restore`, and the behavior calls back into
/// the host for each related record, so cascades reach as deep as the
/// relation graph does. An in-flight set per direction stops cycles.
///
/// Nothing is wrapped in a transaction. A failure part way through leaves
/// earlier cascaded writes in place.
///

#[derive(Debug, Default)]
pub struct CascadeBehavior {
    policy: CascadePolicy,
    deleting: RefCell<BTreeSet<RecordKey>>,
    restoring: RefCell<BTreeSet<RecordKey>>,
}

impl CascadeBehavior {
    #[must_use]
    pub fn new(policy: CascadePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a behavior ready to be registered with hosts.
    #[must_use]
    pub fn shared(policy: CascadePolicy) -> Rc<Self> {
        Rc::new(Self::new(policy))
    }

    #[must_use]
    pub const fn policy(&self) -> &CascadePolicy {
        &self.policy
    }

    fn debug_log(&self, s: impl Into<String>) {
        if self.policy.debug {
            println!("[debug] {}", s.into());
        }
    }

    // ─────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────

    /// Attach both hooks to entity type `E`.
    pub fn register<E: EntityKind>(self: &Rc<Self>, hooks: &mut LifecycleHooks) {
        self.register_path(E::PATH, hooks);
    }

    /// Attach both hooks to an entity path.
    pub fn register_path(self: &Rc<Self>, entity: &'static str, hooks: &mut LifecycleHooks) {
        let behavior = Rc::clone(self);
        hooks.on_deleting(entity, move |host, snapshot| behavior.deleting(host, snapshot));

        let behavior = Rc::clone(self);
        hooks.on_restoring(entity, move |host, snapshot| {
            behavior.restoring(host, snapshot)
        });
    }

    // ─────────────────────────────────────────────
    // Hook bodies
    // ─────────────────────────────────────────────

    /// "About to be deleted": validate, then cascade to related records.
    pub fn deleting(
        &self,
        host: &mut dyn RecordHost,
        snapshot: &RecordSnapshot,
    ) -> Result<(), InternalError> {
        let model = resolve_model(host, &snapshot.key)?;
        self.validate(model)?;

        self.cascade_delete(host, model, &snapshot.key)
    }

    /// "About to be restored": validate, then restore correlated records.
    pub fn restoring(
        &self,
        host: &mut dyn RecordHost,
        snapshot: &RecordSnapshot,
    ) -> Result<(), InternalError> {
        let model = resolve_model(host, &snapshot.key)?;
        self.validate(model)?;

        self.cascade_restore(host, model, snapshot)
    }

    // ─────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────

    /// Check that `model` may carry this behavior.
    pub fn validate(&self, model: &'static EntityModel) -> Result<(), InternalError> {
        validate_model(model).map_err(|err| {
            record(MetricsEvent::ValidationFailed {
                entity_path: model.path,
            });
            self.debug_log(format!(
                "cascade validation failed on {}: {err}",
                model.entity_name
            ));

            InternalError::from(err)
        })
    }

    /// Soft-delete (or detach, for pivots) every active related record.
    ///
    /// The parent's own timestamp is left to the host.
    pub fn cascade_delete(
        &self,
        host: &mut dyn RecordHost,
        model: &'static EntityModel,
        key: &RecordKey,
    ) -> Result<(), InternalError> {
        let Some(_guard) = InFlight::enter(&self.deleting, key) else {
            record(MetricsEvent::CycleSkipped {
                kind: CascadeKind::Delete,
                entity_path: model.path,
            });
            self.debug_log(format!("delete cascade already running for {key}; skipped"));
            return Ok(());
        };
        record(MetricsEvent::CascadeStart {
            kind: CascadeKind::Delete,
            entity_path: model.path,
        });

        for &name in model.cascade.as_slice() {
            let relation = cascade_relation(model, name)?;

            // Fresh query per relation; children deleted by an earlier
            // relation in this loop are already excluded.
            let related = host.related(key, name, relation, RelatedScope::Active)?;
            self.debug_log(format!(
                "delete cascade {key}.{name} -> {} related rows",
                related.len()
            ));

            for row in related {
                if let Some(pivot) = row.pivot {
                    host.delete_pivot(&pivot)?;
                    record(MetricsEvent::PivotRemoved {
                        entity_path: model.path,
                    });
                } else {
                    host.delete(&row.key)?;
                    record(MetricsEvent::RowDeleted {
                        entity_path: model.path,
                    });
                }
            }
        }

        Ok(())
    }

    /// Restore related records whose deletion falls in the parent's window.
    ///
    /// `snapshot.deleted_at` must be the parent's timestamp before the host
    /// clears it; a parent that is not deleted has nothing to correlate.
    pub fn cascade_restore(
        &self,
        host: &mut dyn RecordHost,
        model: &'static EntityModel,
        snapshot: &RecordSnapshot,
    ) -> Result<(), InternalError> {
        let key = &snapshot.key;
        let Some(deleted_at) = snapshot.deleted_at else {
            self.debug_log(format!("{key} is not deleted; restore cascade skipped"));
            return Ok(());
        };
        let Some(_guard) = InFlight::enter(&self.restoring, key) else {
            record(MetricsEvent::CycleSkipped {
                kind: CascadeKind::Restore,
                entity_path: model.path,
            });
            self.debug_log(format!("restore cascade already running for {key}; skipped"));
            return Ok(());
        };
        record(MetricsEvent::CascadeStart {
            kind: CascadeKind::Restore,
            entity_path: model.path,
        });

        for &name in model.cascade.as_slice() {
            let relation = cascade_relation(model, name)?;

            let target = host
                .entity_model(relation.target_path)
                .ok_or_else(|| InternalError::unsupported_entity_path(relation.target_path))?;
            if !target.supports_soft_delete() {
                record(MetricsEvent::RelationSkipped {
                    entity_path: model.path,
                });
                self.debug_log(format!(
                    "restore cascade {key}.{name} skipped: {} is not soft-deletable",
                    target.entity_name
                ));
                continue;
            }

            let trashed = host.related(key, name, relation, RelatedScope::Trashed)?;
            for row in trashed {
                let Some(child_deleted_at) = row.deleted_at else {
                    continue;
                };

                if self.policy.window.matches(deleted_at, child_deleted_at) {
                    host.restore(&row.key)?;
                    record(MetricsEvent::RowRestored {
                        entity_path: model.path,
                    });
                } else {
                    record(MetricsEvent::RowOutsideWindow {
                        entity_path: model.path,
                    });
                    self.debug_log(format!(
                        "restore cascade {key}.{name}: {} deleted at {} outside window of {}",
                        row.key,
                        child_deleted_at.to_rfc3339(),
                        deleted_at.to_rfc3339(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// True when the behavior would restore a child deleted at `child`
    /// together with a parent deleted at `parent`.
    #[must_use]
    pub const fn correlates(&self, parent: Timestamp, child: Timestamp) -> bool {
        self.policy.window.matches(parent, child)
    }
}

// Resolve the model of a hooked record through the host.
fn resolve_model(
    host: &dyn RecordHost,
    key: &RecordKey,
) -> Result<&'static EntityModel, InternalError> {
    host.entity_model(key.entity)
        .ok_or_else(|| InternalError::unsupported_entity_path(key.entity))
}

// Relation behind a declared cascade name. Hooks validate first, so a miss
// here means the operation was called directly on an unvalidated model.
fn cascade_relation(
    model: &'static EntityModel,
    name: &str,
) -> Result<&'static RelationModel, InternalError> {
    model.relation(name).ok_or_else(|| {
        CascadeError::InvalidCascadeRelationship {
            entity: model.path.to_string(),
            relations: vec![name.to_string()],
        }
        .into()
    })
}

///
/// InFlight
///
/// Marks one record as mid-cascade for the lifetime of the guard.
///

struct InFlight<'a> {
    set: &'a RefCell<BTreeSet<RecordKey>>,
    key: RecordKey,
}

impl<'a> InFlight<'a> {
    // `None` when the record is already being cascaded higher up the chain.
    fn enter(set: &'a RefCell<BTreeSet<RecordKey>>, key: &RecordKey) -> Option<Self> {
        if !set.borrow_mut().insert(*key) {
            return None;
        }

        Some(Self { set, key: *key })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.borrow_mut().remove(&self.key);
    }
}
