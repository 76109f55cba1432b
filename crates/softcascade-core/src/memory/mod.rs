//! In-memory reference host.
//!
//! Implements [`RecordHost`] over `BTreeMap` tables so the cascade behavior
//! can be driven end to end without an external ORM. Rows carry only their
//! deletion timestamp; there is no query language and nothing persists.


use crate::{
    error::InternalError,
    hooks::{self, LifecycleEvent, LifecycleHooks},
    host::{RecordHost, RecordSnapshot, RelatedRecord, RelatedScope},
    model::{
        entity::EntityModel,
        relation::{RelationKind, RelationModel},
    },
    traits::EntityKind,
    types::{PivotKey, RecordKey, Timestamp},
};
use std::collections::BTreeMap;
use ulid::Ulid;

///
/// PivotRow
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PivotRow {
    parent: RecordKey,
    accessor: &'static str,
    related: RecordKey,
}

///
/// MemoryHost
///
/// Row semantics follow a soft-deleting ORM:
/// - `delete` fires "deleting" hooks, then stamps `deleted_at` with the host
///   clock (or removes the row when the entity cannot soft-delete). Deleting
///   a trashed row stamps it again, so it stays correlated with whatever its
///   hooks just cascaded to.
/// - `restore` fires "restoring" hooks while the row still carries its
///   timestamp, then clears it.
///

#[derive(Debug, Default)]
pub struct MemoryHost {
    models: BTreeMap<&'static str, &'static EntityModel>,
    rows: BTreeMap<RecordKey, Option<Timestamp>>,
    links: BTreeMap<RecordKey, BTreeMap<&'static str, Vec<RecordKey>>>,
    pivots: BTreeMap<PivotKey, PivotRow>,
    hooks: LifecycleHooks,
    clock: Option<Timestamp>,
    next_pivot_id: u128,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────

    /// Register the model of entity type `E`.
    pub fn register<E: EntityKind>(&mut self) -> &mut Self {
        self.register_model(E::MODEL)
    }

    pub fn register_model(&mut self, model: &'static EntityModel) -> &mut Self {
        self.models.insert(model.path, model);
        self
    }

    pub const fn hooks_mut(&mut self) -> &mut LifecycleHooks {
        &mut self.hooks
    }

    /// Pin the host clock; `None` falls back to wall-clock time.
    pub const fn set_now(&mut self, now: Option<Timestamp>) {
        self.clock = now;
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.unwrap_or_else(Timestamp::now)
    }

    /// Insert a live row.
    pub fn insert(&mut self, key: RecordKey) -> Result<(), InternalError> {
        self.insert_with(key, None)
    }

    /// Insert a row that was soft-deleted at `deleted_at`.
    pub fn insert_deleted(
        &mut self,
        key: RecordKey,
        deleted_at: Timestamp,
    ) -> Result<(), InternalError> {
        let model = self.model_for(&key)?;
        if !model.supports_soft_delete() {
            return Err(InternalError::host_unsupported(format!(
                "cannot seed deleted row {key}: {} does not support soft deletes",
                model.entity_name
            )));
        }

        self.insert_with(key, Some(deleted_at))
    }

    fn insert_with(
        &mut self,
        key: RecordKey,
        deleted_at: Option<Timestamp>,
    ) -> Result<(), InternalError> {
        self.model_for(&key)?;
        if self.rows.contains_key(&key) {
            return Err(InternalError::host_invariant(format!(
                "row already exists: {key}"
            )));
        }
        self.rows.insert(key, deleted_at);

        Ok(())
    }

    /// Link `child` to `parent` through a one-to-one or one-to-many accessor.
    pub fn relate(
        &mut self,
        parent: RecordKey,
        accessor: &'static str,
        child: RecordKey,
    ) -> Result<(), InternalError> {
        let relation = self.checked_relation(&parent, accessor, &child)?;
        let children = self
            .links
            .entry(parent)
            .or_default()
            .entry(accessor)
            .or_default();

        match relation.kind {
            RelationKind::HasOne if !children.is_empty() => Err(InternalError::host_invariant(
                format!("{parent}.{accessor} is has-one and already linked"),
            )),
            RelationKind::HasOne | RelationKind::HasMany => {
                children.push(child);
                Ok(())
            }
            RelationKind::BelongsToMany { .. } => Err(InternalError::host_unsupported(format!(
                "{parent}.{accessor} is many-to-many; use attach"
            ))),
        }
    }

    /// Associate `related` with `parent` through a new pivot row.
    pub fn attach(
        &mut self,
        parent: RecordKey,
        accessor: &'static str,
        related: RecordKey,
    ) -> Result<PivotKey, InternalError> {
        let relation = self.checked_relation(&parent, accessor, &related)?;
        let Some(pivot) = relation.pivot() else {
            return Err(InternalError::host_unsupported(format!(
                "{parent}.{accessor} has no pivot; use relate"
            )));
        };

        self.next_pivot_id += 1;
        let key = PivotKey::new(pivot, Ulid::from(self.next_pivot_id));
        self.pivots.insert(
            key,
            PivotRow {
                parent,
                accessor,
                related,
            },
        );

        Ok(key)
    }

    // Both rows must exist and the accessor must be a relation targeting `child`.
    fn checked_relation(
        &self,
        parent: &RecordKey,
        accessor: &str,
        child: &RecordKey,
    ) -> Result<&'static RelationModel, InternalError> {
        let model = self.model_for(parent)?;
        for key in [parent, child] {
            if !self.rows.contains_key(key) {
                return Err(InternalError::host_not_found(key));
            }
        }

        let relation = model.relation(accessor).ok_or_else(|| {
            InternalError::host_unsupported(format!(
                "{} has no relation accessor '{accessor}'",
                model.path
            ))
        })?;
        if relation.target_path != child.entity {
            return Err(InternalError::host_invariant(format!(
                "{}.{accessor} targets {}, not {}",
                model.path, relation.target_path, child.entity
            )));
        }

        Ok(relation)
    }

    // ─────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────

    #[must_use]
    pub fn contains(&self, key: &RecordKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Deletion timestamp of a row; `None` when the row does not exist.
    #[must_use]
    pub fn deleted_at(&self, key: &RecordKey) -> Option<Option<Timestamp>> {
        self.rows.get(key).copied()
    }

    #[must_use]
    pub fn is_trashed(&self, key: &RecordKey) -> bool {
        matches!(self.rows.get(key), Some(Some(_)))
    }

    #[must_use]
    pub fn contains_pivot(&self, key: &PivotKey) -> bool {
        self.pivots.contains_key(key)
    }

    fn model_for(&self, key: &RecordKey) -> Result<&'static EntityModel, InternalError> {
        self.entity_model(key.entity)
            .ok_or_else(|| InternalError::unsupported_entity_path(key.entity))
    }

    fn row(&self, key: &RecordKey) -> Result<Option<Timestamp>, InternalError> {
        self.rows
            .get(key)
            .copied()
            .ok_or_else(|| InternalError::host_not_found(key))
    }
}

impl RecordHost for MemoryHost {
    fn entity_model(&self, path: &str) -> Option<&'static EntityModel> {
        self.models.get(path).copied()
    }

    fn related(
        &self,
        parent: &RecordKey,
        accessor: &str,
        relation: &RelationModel,
        scope: RelatedScope,
    ) -> Result<Vec<RelatedRecord>, InternalError> {
        let target = self
            .entity_model(relation.target_path)
            .ok_or_else(|| InternalError::unsupported_entity_path(relation.target_path))?;

        let candidates: Vec<(RecordKey, Option<PivotKey>)> = match relation.kind {
            RelationKind::BelongsToMany { .. } => self
                .pivots
                .iter()
                .filter(|(_, row)| row.parent == *parent && row.accessor == accessor)
                .map(|(pivot, row)| (row.related, Some(*pivot)))
                .collect(),
            RelationKind::HasOne | RelationKind::HasMany => self
                .links
                .get(parent)
                .and_then(|links| links.get(accessor))
                .map(|children| children.iter().map(|child| (*child, None)).collect())
                .unwrap_or_default(),
        };

        // Hard-deleted rows drop out; soft-deleted ones are filtered by scope.
        let related = candidates
            .into_iter()
            .filter_map(|(key, pivot)| {
                let deleted_at = self.rows.get(&key).copied()?;
                let in_scope = match scope {
                    RelatedScope::Active => deleted_at.is_none() || !target.supports_soft_delete(),
                    RelatedScope::Trashed => deleted_at.is_some(),
                };
                in_scope.then_some(RelatedRecord {
                    key,
                    deleted_at,
                    pivot,
                })
            })
            .collect();

        Ok(related)
    }

    fn delete(&mut self, record: &RecordKey) -> Result<(), InternalError> {
        let deleted_at = self.row(record)?;
        let model = self.model_for(record)?;

        let listeners = self.hooks.listeners(record.entity, LifecycleEvent::Deleting);
        hooks::fire(self, &listeners, &RecordSnapshot::new(*record, deleted_at))?;

        if model.supports_soft_delete() {
            let now = self.now();
            if let Some(slot) = self.rows.get_mut(record) {
                *slot = Some(now);
            }
        } else {
            self.rows.remove(record);
            self.links.remove(record);
            self.pivots.retain(|_, row| row.parent != *record && row.related != *record);
        }

        Ok(())
    }

    fn restore(&mut self, record: &RecordKey) -> Result<(), InternalError> {
        let deleted_at = self.row(record)?;
        let model = self.model_for(record)?;

        let listeners = self.hooks.listeners(record.entity, LifecycleEvent::Restoring);
        hooks::fire(self, &listeners, &RecordSnapshot::new(*record, deleted_at))?;

        if !model.supports_soft_delete() {
            return Err(InternalError::host_unsupported(format!(
                "cannot restore {record}: {} does not support soft deletes",
                model.entity_name
            )));
        }
        if let Some(slot) = self.rows.get_mut(record) {
            *slot = None;
        }

        Ok(())
    }

    fn delete_pivot(&mut self, pivot: &PivotKey) -> Result<(), InternalError> {
        self.pivots
            .remove(pivot)
            .map(|_| ())
            .ok_or_else(|| InternalError::host_not_found(pivot))
    }
}
