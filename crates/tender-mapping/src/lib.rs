//! Procurement timeline and tender-type mapping engine.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
