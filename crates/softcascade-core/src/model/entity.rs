use crate::model::{
    accessor::{AccessorKind, AccessorModel},
    relation::RelationModel,
};

///
/// EntityModel
/// Minimal runtime model for one entity type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name used in diagnostics.
    pub entity_name: &'static str,
    /// Soft-delete capability marker; `None` means rows are hard-deleted.
    pub soft_delete: Option<SoftDeleteModel>,
    /// Every named accessor the entity exposes, relation or not.
    pub accessors: &'static [AccessorModel],
    /// Relations cascaded on soft-delete and restore, in declaration order.
    pub cascade: CascadeRelations,
}

impl EntityModel {
    #[must_use]
    pub const fn supports_soft_delete(&self) -> bool {
        self.soft_delete.is_some()
    }

    /// Look up an accessor by name.
    #[must_use]
    pub fn accessor(&self, name: &str) -> Option<&'static AccessorModel> {
        self.accessors.iter().find(|accessor| accessor.name == name)
    }

    /// Resolve a relation accessor by name; `None` for missing or non-relation accessors.
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&'static RelationModel> {
        let accessor = self.accessor(name)?;

        match &accessor.kind {
            AccessorKind::Relation(relation) => Some(relation),
            AccessorKind::Value => None,
        }
    }
}

///
/// SoftDeleteModel
///
/// Capability marker for soft-deletable entities. The host owns the
/// deletion timestamp; the cascade only needs to know it exists.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SoftDeleteModel;

impl SoftDeleteModel {
    pub const DEFAULT: Self = Self;
}

///
/// CascadeRelations
///
/// Declared cascade list. Accepts a single relation name or an ordered list.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CascadeRelations {
    #[default]
    None,
    One(&'static str),
    Many(&'static [&'static str]),
}

impl CascadeRelations {
    /// Borrow the declared names in declaration order.
    #[must_use]
    pub const fn as_slice(&self) -> &[&'static str] {
        match self {
            Self::None => &[],
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&'static str> for CascadeRelations {
    fn from(name: &'static str) -> Self {
        Self::One(name)
    }
}

impl From<&'static [&'static str]> for CascadeRelations {
    fn from(names: &'static [&'static str]) -> Self {
        Self::Many(names)
    }
}
