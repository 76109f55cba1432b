use crate::model::entity::EntityModel;

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// Binds a Rust type to the static model the cascade reads at hook time.
/// `MODEL.path` must equal `PATH`.
///

pub trait EntityKind: Path + 'static {
    const MODEL: &'static EntityModel;
}
