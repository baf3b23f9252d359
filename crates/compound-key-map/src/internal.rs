//! Types used by the consistency checks in tests.

use alloc::string::String;
use core::fmt;

pub use crate::support::alloc::Global;

/// A map failed its internal consistency check.
#[derive(Debug)]
pub enum ValidationError {
    /// The underlying table is inconsistent.
    Table {
        /// The name of the table.
        name: &'static str,
        /// The error reported by the table.
        error: TableValidationError,
    },
    /// Any other inconsistency.
    General(String),
}

impl ValidationError {
    pub(crate) fn general(msg: impl Into<String>) -> Self {
        ValidationError::General(msg.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, error } => {
                write!(f, "validation error in table {name}: {error}")
            }
            Self::General(msg) => msg.fmt(f),
        }
    }
}

impl core::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ValidationError::Table { error, .. } => Some(error),
            ValidationError::General(_) => None,
        }
    }
}

/// The sizing bookkeeping of a table disagrees with its contents.
#[derive(Debug)]
pub struct TableValidationError(String);

impl TableValidationError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        TableValidationError(msg.into())
    }
}

impl fmt::Display for TableValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl core::error::Error for TableValidationError {}
