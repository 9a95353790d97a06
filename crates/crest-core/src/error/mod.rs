//! Engine error types

mod engine_error;

pub use engine_error::{EngineError, EngineResult};
