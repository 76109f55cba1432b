use crate::{error::CascadeError, model::entity::EntityModel};

/// Declared cascade names that do not resolve to a relation accessor, in
/// declaration order.
#[must_use]
pub fn invalid_cascade_relations(model: &EntityModel) -> Vec<&'static str> {
    model
        .cascade
        .as_slice()
        .iter()
        .copied()
        .filter(|name| model.relation(name).is_none())
        .collect()
}

/// Validate that a model is correctly set up for cascading soft deletes.
///
/// Runs on every hook invocation; nothing is memoized.
pub fn validate_model(model: &EntityModel) -> Result<(), CascadeError> {
    if !model.supports_soft_delete() {
        return Err(CascadeError::NotSoftDeletable {
            entity: model.path.to_string(),
        });
    }

    let invalid = invalid_cascade_relations(model);
    if !invalid.is_empty() {
        return Err(CascadeError::InvalidCascadeRelationship {
            entity: model.path.to_string(),
            relations: invalid.into_iter().map(str::to_string).collect(),
        });
    }

    Ok(())
}

///
/// TESTS
///
