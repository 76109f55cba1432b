//! Build-time configuration check.
//!
//! Mirrors `validate_model` in `const` form so a misconfigured entity model
//! fails compilation through [`assert_cascade_model!`](crate::assert_cascade_model).

use crate::model::{
    accessor::{AccessorKind, AccessorModel},
    entity::EntityModel,
};

// Byte-wise string equality usable in const context.
const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }

    true
}

/// True when `name` resolves to a relation accessor in `accessors`.
#[must_use]
pub const fn names_relation(accessors: &[AccessorModel], name: &str) -> bool {
    let mut i = 0;
    while i < accessors.len() {
        if str_eq(accessors[i].name, name) {
            return matches!(accessors[i].kind, AccessorKind::Relation(_));
        }
        i += 1;
    }

    false
}

/// True when the model may carry the cascade behavior: it is soft-deletable
/// and every declared cascade name resolves to a relation accessor.
#[must_use]
pub const fn cascade_model_is_valid(model: &EntityModel) -> bool {
    if model.soft_delete.is_none() {
        return false;
    }

    let names = model.cascade.as_slice();
    let mut i = 0;
    while i < names.len() {
        if !names_relation(model.accessors, names[i]) {
            return false;
        }
        i += 1;
    }

    true
}

///
/// Macro
///
/// Reject an entity type whose model could never pass cascade validation.
///

#[macro_export]
macro_rules! assert_cascade_model {
    ($ty:ty) => {
        const _: () = assert!(
            $crate::cascade::check::cascade_model_is_valid(
                <$ty as $crate::traits::EntityKind>::MODEL
            ),
            "cascade model must be soft-deletable and cascade only relation accessors"
        );
    };
}

///
/// TESTS
///
