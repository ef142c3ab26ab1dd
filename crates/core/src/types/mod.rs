//! Core types for Driftwood Supply.
//!
//! This module provides type-safe wrappers for common commerce concepts.

pub mod id;
pub mod money;

pub use id::{Gid, GidError};
pub use money::{Money, MoneyError};
