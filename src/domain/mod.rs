//! Domain layer: organisms, the food web tree and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod tree;

pub use entities::{Diet, NameMatch, OrganismNode, PreyKind, Slot};
pub use error::{DomainResult, FoodWebError};
pub use tree::{OrganismTree, PreOrderIterator, NO_PLANTS_FOUND};
