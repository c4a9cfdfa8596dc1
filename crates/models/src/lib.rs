pub mod catalog;
pub mod filters;
pub mod identity;
pub mod order;
pub mod pagination;
pub mod representation;

pub use filters::FilterError;
pub use identity::UserContext;

use thiserror::Error;

/// A request payload that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
