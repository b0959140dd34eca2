use thiserror::Error;

use crate::materials::MaterialId;

/// Material catalog configuration errors. These are fatal at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("material id {id} registered twice ('{existing}' and '{name}')")]
    DuplicateId {
        id: MaterialId,
        existing: String,
        name: String,
    },
    #[error("material name '{name}' registered twice (ids {existing} and {id})")]
    DuplicateName {
        name: String,
        existing: MaterialId,
        id: MaterialId,
    },
    #[error("material '{name}' uses id 0, which is reserved for empty space")]
    ReservedEmptyId { name: String },
    #[error("material id {id} is not registered")]
    UnknownMaterial { id: MaterialId },
    #[error("empty space has no material definition")]
    EmptyHasNoDefinition,
}
