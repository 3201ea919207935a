//! Campus Core - Shared types library.
//!
//! This crate provides common types used across all Campus components:
//! - `node` - The rollup node binary processing advance/inspect requests
//! - `integration-tests` - End-to-end tests against a mock rollup host
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
