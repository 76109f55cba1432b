///
/// RelationModel
///
/// Static relation descriptor. Resolution of the related rows is the host's
/// job; the model only names the target and the association shape.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelationModel {
    pub kind: RelationKind,
    /// Entity path of the related type.
    pub target_path: &'static str,
}

impl RelationModel {
    #[must_use]
    pub const fn has_one(target_path: &'static str) -> Self {
        Self {
            kind: RelationKind::HasOne,
            target_path,
        }
    }

    #[must_use]
    pub const fn has_many(target_path: &'static str) -> Self {
        Self {
            kind: RelationKind::HasMany,
            target_path,
        }
    }

    #[must_use]
    pub const fn belongs_to_many(target_path: &'static str, pivot: &'static str) -> Self {
        Self {
            kind: RelationKind::BelongsToMany { pivot },
            target_path,
        }
    }

    /// Pivot table name for many-to-many relations.
    #[must_use]
    pub const fn pivot(&self) -> Option<&'static str> {
        match self.kind {
            RelationKind::BelongsToMany { pivot } => Some(pivot),
            RelationKind::HasOne | RelationKind::HasMany => None,
        }
    }
}

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsToMany { pivot: &'static str },
}
