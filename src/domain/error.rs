//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the food web's structural rules.
///
/// Every variant is recoverable: the tree is left untouched by the failing
/// operation and stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodWebError {
    #[error("plants cannot be predators")]
    IsPlant,

    #[error("this prey cannot be added as it does not match the diet of the predator")]
    DietMismatch,

    #[error("there is no more room for more prey for this predator")]
    PositionNotAvailable,

    #[error("prey already exists for this predator: {0}")]
    DuplicateName(String),

    #[error("not a direct prey of the cursor: {0}")]
    NotFound(String),

    #[error("invalid diet choice: {0:?} (expected H, C or O)")]
    InvalidDiet(String),

    #[error("cursor is not reachable from the apex predator")]
    CursorDetached,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, FoodWebError>;
