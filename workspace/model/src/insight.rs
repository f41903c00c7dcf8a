use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The creator facts handed to the investment advisor.
///
/// Field names match the JSON embedded in the advisor prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorInsight {
    pub name: String,
    pub stock_price: Decimal,
    /// Positive-sentiment score in `0..=100`; creators never scored rank last.
    pub sentiment: Option<u8>,
    pub followers: u64,
    pub bio: Option<String>,
}

impl CreatorInsight {
    /// Sentiment used for ranking, treating a missing score as zero.
    pub fn sentiment_or_zero(&self) -> u8 {
        self.sentiment.unwrap_or(0)
    }
}
