//! ## Crate layout
//! - `core`: entity models, the host capability trait, lifecycle hooks, the
//!   cascade behavior, configuration, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries everything needed to declare cascading
//! entities and attach the behavior to a host.

pub use softcascade_core as core;

pub mod error;

pub use error::{CascadeErrorKind, Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use softcascade_core::assert_cascade_model;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        cascade::{CascadeBehavior, CascadePolicy, RestoreMatch, RestoreWindow},
        config::CascadeConfig,
        hooks::LifecycleHooks,
        host::{RecordHost as _, RelatedScope},
        memory::MemoryHost,
        model::{
            accessor::AccessorModel,
            entity::{CascadeRelations, EntityModel, SoftDeleteModel},
            relation::RelationModel,
        },
        traits::{EntityKind, Path},
        types::{PivotKey, RecordKey, Timestamp, Ulid},
    };
}
