//! Integration test utilities for the gateway engine
//!
//! Provides a stub REST collaborator, an engine harness, and payload
//! builders for driving full event sequences through `dispatch`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
