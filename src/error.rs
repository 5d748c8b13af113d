//! Error types for modifier evaluation.
//!
//! Structural problems (a multiplier tag dividing by zero, a query with
//! no target names, unreadable configuration) are represented by the
//! `ModError` enum. Stat lines the parser cannot understand are not
//! errors; they are reported as [`ParseDiagnostic`](crate::node::ParseDiagnostic)s.

use crate::mod_name::ModName;
use thiserror::Error;

/// Errors that abort a single query or setup step.
///
/// # Examples
///
/// ```rust
/// use zzmod::{ModError, ModName};
///
/// let err = ModError::ZeroDivision {
///     name: ModName::from_str("Life"),
/// };
/// assert_eq!(err.to_string(), "Multiplier tag on Life divides by zero");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModError {
    /// A multiplier tag has a division of zero.
    ///
    /// Contains the name of the modifier carrying the tag.
    #[error("Multiplier tag on {name} divides by zero")]
    ZeroDivision { name: ModName },

    /// A multiplier tag produced a NaN or infinite value, either from a
    /// non-finite division or from a non-finite multiplier variable.
    #[error("Multiplier tag on {name} produced a non-finite value")]
    NonFinite { name: ModName },

    /// A query was issued without any target names.
    #[error("Query requires at least one modifier name")]
    EmptyNames,

    /// The environment configuration could not be read.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
