use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A seat requested as part of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewTicket {
    pub movie_session: i32,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    pub tickets: Vec<NewTicket>,
}

impl OrderInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tickets.is_empty() {
            return Err(ValidationError::new(
                "tickets",
                "an order needs at least one ticket",
            ));
        }
        Ok(())
    }

    /// First ticket that repeats a seat already requested earlier in the payload
    pub fn first_duplicate(&self) -> Option<NewTicket> {
        let mut seen = HashSet::new();
        self.tickets
            .iter()
            .copied()
            .find(|ticket| !seen.insert(*ticket))
    }
}
