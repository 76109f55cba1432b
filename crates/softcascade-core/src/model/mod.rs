//! Runtime data model definitions.
//!
//! Types in `model` are the static descriptors an entity type publishes about
//! itself: its soft-delete capability, the accessors it exposes, and the
//! relations it cascades. They are plain `'static` data so they can be
//! declared in `const` items and checked at build time.
//!
//! In general:
//! - Entity types define *what exists*
//! - `cascade` defines *what runs*
pub mod accessor;
pub mod entity;
pub mod relation;
