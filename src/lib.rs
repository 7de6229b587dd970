//! Food pyramid modelling.
//!
//! A food web is a tree rooted at an apex predator. Every organism eats up to
//! three others; plants are always leaves. The [`domain::OrganismTree`] keeps a
//! cursor that all edits and queries are relative to.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{Diet, FoodWebError, OrganismNode, OrganismTree};
