//! Core types and error handling for distforge.
//!
//! This module hosts the shared error types used across the library and the
//! CLI. See [`error`] for the design of the two-layer error system
//! (typed [`DistforgeError`] plus user-facing [`ErrorContext`]).

pub mod error;

pub use error::{DistforgeError, ErrorContext, user_friendly_error};
