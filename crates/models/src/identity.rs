use serde::{Deserialize, Serialize};

/// The identity a request is made on behalf of.
///
/// Every operation that is scoped to a user takes this explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserContext {
    /// Subject of the verified token, used as the owner key of orders
    pub subject: String,
}

impl UserContext {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}
