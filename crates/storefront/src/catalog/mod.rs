//! Product catalog helpers.

pub mod variant;

pub use variant::{Selection, resolve_variant, selection_from_params};
