use crate::traits::EntityKind;
use std::fmt;
use ulid::Ulid;

///
/// RecordKey
///
/// Untyped record address: entity path plus primary key.
/// Relations are polymorphic, so cascades carry keys in this erased form.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RecordKey {
    pub entity: &'static str,
    pub id: Ulid,
}

impl RecordKey {
    #[must_use]
    pub const fn new(entity: &'static str, id: Ulid) -> Self {
        Self { entity, id }
    }

    /// Address a record of a typed entity.
    #[must_use]
    pub const fn of<E: EntityKind>(id: Ulid) -> Self {
        Self::new(E::PATH, id)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity, self.id)
    }
}

///
/// PivotKey
///
/// Address of one intermediate row of a many-to-many association.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PivotKey {
    pub pivot: &'static str,
    pub id: Ulid,
}

impl PivotKey {
    #[must_use]
    pub const fn new(pivot: &'static str, id: Ulid) -> Self {
        Self { pivot, id }
    }
}

impl fmt::Display for PivotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.pivot, self.id)
    }
}
