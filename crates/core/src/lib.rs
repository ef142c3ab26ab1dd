//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across Driftwood Supply components:
//! - `storefront` - Public-facing e-commerce site
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money values and global-ID handling

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
