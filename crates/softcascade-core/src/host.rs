//! Capabilities consumed from the host ORM.
//!
//! The cascade never touches storage itself. Everything it needs from the
//! host (model lookup, relation queries, per-record delete/restore) goes
//! through [`RecordHost`].

use crate::{
    error::InternalError,
    model::{entity::EntityModel, relation::RelationModel},
    types::{PivotKey, RecordKey, Timestamp},
};

///
/// RelatedScope
///
/// Which related rows a relation query returns.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelatedScope {
    /// Rows not soft-deleted. Targets without soft-delete return every row.
    Active,

    /// Only soft-deleted rows.
    Trashed,
}

///
/// RelatedRecord
///
/// One row returned by a relation query, as the host currently sees it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelatedRecord {
    pub key: RecordKey,
    pub deleted_at: Option<Timestamp>,

    /// Present only for rows reached through a many-to-many pivot.
    pub pivot: Option<PivotKey>,
}

impl RelatedRecord {
    #[must_use]
    pub const fn new(key: RecordKey, deleted_at: Option<Timestamp>) -> Self {
        Self {
            key,
            deleted_at,
            pivot: None,
        }
    }

    #[must_use]
    pub const fn with_pivot(mut self, pivot: PivotKey) -> Self {
        self.pivot = Some(pivot);
        self
    }
}

///
/// RecordSnapshot
///
/// Record state handed to lifecycle hooks before the host mutates it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecordSnapshot {
    pub key: RecordKey,
    pub deleted_at: Option<Timestamp>,
}

impl RecordSnapshot {
    #[must_use]
    pub const fn new(key: RecordKey, deleted_at: Option<Timestamp>) -> Self {
        Self { key, deleted_at }
    }
}

///
/// RecordHost
///
/// `delete` and `restore` are the host's full lifecycle operations: they
/// must fire the registered hooks for the record's entity before mutating
/// it. The cascade relies on that to reach grandchildren.
///

pub trait RecordHost {
    /// Resolve the model registered for an entity path.
    fn entity_model(&self, path: &str) -> Option<&'static EntityModel>;

    /// Run a fresh query for the rows related to `parent` through `accessor`.
    fn related(
        &self,
        parent: &RecordKey,
        accessor: &str,
        relation: &RelationModel,
        scope: RelatedScope,
    ) -> Result<Vec<RelatedRecord>, InternalError>;

    /// Soft-delete (or, without the capability, delete) one record.
    fn delete(&mut self, record: &RecordKey) -> Result<(), InternalError>;

    /// Restore one soft-deleted record.
    fn restore(&mut self, record: &RecordKey) -> Result<(), InternalError>;

    /// Remove one many-to-many pivot row.
    fn delete_pivot(&mut self, pivot: &PivotKey) -> Result<(), InternalError>;
}
