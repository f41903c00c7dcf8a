use serde::{Deserialize, Serialize};

/// A single backer's position in one creator.
///
/// Within the set of investments for a creator every `backer_id` is unique and
/// `tokens_invested` is positive. The compute crate checks both before using a
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Investment {
    pub backer_id: String,
    pub tokens_invested: u64,
}

impl Investment {
    pub fn new(backer_id: impl Into<String>, tokens_invested: u64) -> Self {
        Self {
            backer_id: backer_id.into(),
            tokens_invested,
        }
    }
}
