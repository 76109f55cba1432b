//! Core runtime for SoftCascade: entity models, the host capability trait,
//! lifecycle hooks, and the cascading soft-delete / restore behavior.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cascade;
pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod memory;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, host implementations, or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cascade::{CascadeBehavior, CascadePolicy, RestoreMatch, RestoreWindow},
        hooks::LifecycleHooks,
        host::RecordHost,
        model::{
            accessor::AccessorModel,
            entity::{CascadeRelations, EntityModel, SoftDeleteModel},
            relation::RelationModel,
        },
        traits::{EntityKind, Path},
        types::{PivotKey, RecordKey, Timestamp},
    };
}
