//! Ports infrastructure for the persistence boundary
//!
//! Each domain defines port traits for its persistence collaborator; the
//! types here give every port a common error vocabulary. Adapters (a
//! document store, an in-memory mock) implement the traits without the
//! domains knowing which one is behind them.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// A unified error type that all port implementations use, so services get
/// consistent error handling regardless of the adapter behind the trait.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred in the adapter
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// An internal adapter error occurred
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker to ensure implementations are
/// thread-safe and usable in async contexts.
pub trait DomainPort: Send + Sync + 'static {}
