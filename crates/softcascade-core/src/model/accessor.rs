use crate::model::relation::RelationModel;

///
/// AccessorModel
/// One named accessor published by an entity type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccessorModel {
    pub name: &'static str,
    pub kind: AccessorKind,
}

impl AccessorModel {
    /// Declare a relation accessor.
    #[must_use]
    pub const fn relation(name: &'static str, relation: RelationModel) -> Self {
        Self {
            name,
            kind: AccessorKind::Relation(relation),
        }
    }

    /// Declare an accessor that yields something other than a relation.
    #[must_use]
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: AccessorKind::Value,
        }
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self.kind, AccessorKind::Relation(_))
    }
}

///
/// AccessorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessorKind {
    Relation(RelationModel),

    /// Computed attribute or scalar getter; never a cascade target.
    Value,
}
