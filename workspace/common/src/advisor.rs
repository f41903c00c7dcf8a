use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Creator facts the advisor reasons about.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct CreatorInsightDto {
    pub name: String,
    pub stock_price: Decimal,
    /// Positive-sentiment score, 0-100
    pub sentiment: Option<u8>,
    #[serde(default)]
    pub followers: u64,
    pub bio: Option<String>,
}

/// The advisor's reply.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AdvisorAnswer {
    pub answer: String,
    /// True when served from the answer cache
    pub cached: bool,
}

/// Sentiment score of a post on the 10-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SentimentScore {
    pub score: u8,
}
