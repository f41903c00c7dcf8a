use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a backer's portfolio: how many tokens of a creator they hold,
/// what they paid in total and what a token is worth now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub creator_id: String,
    pub tokens: u64,
    /// Total amount paid for `tokens`.
    pub cost_basis: Decimal,
    pub current_price: Decimal,
}

impl Holding {
    pub fn new(
        creator_id: impl Into<String>,
        tokens: u64,
        cost_basis: Decimal,
        current_price: Decimal,
    ) -> Self {
        Self {
            creator_id: creator_id.into(),
            tokens,
            cost_basis,
            current_price,
        }
    }
}
