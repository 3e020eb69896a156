//! Error types.
//!
//! Only precondition violations are errors. Infeasible solutions, empty
//! neighborhoods and exhausted time budgets are ordinary outcomes.

use thiserror::Error;

/// Errors raised when building an instance or validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A per-item array does not have `item_count` entries.
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Capacity below zero.
    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),

    /// An item value below zero.
    #[error("value of item {index} must be non-negative, got {value}")]
    NegativeValue { index: usize, value: i64 },

    /// An item weight below zero.
    #[error("weight of item {index} must be non-negative, got {weight}")]
    NegativeWeight { index: usize, weight: i64 },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
