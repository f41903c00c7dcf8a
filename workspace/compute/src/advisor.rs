//! Conversational investment advice over the current creator line-up.

use std::sync::Arc;

use model::CreatorInsight;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::error::Result;
use crate::generator::TextGenerator;

/// Number of creators handed to the model.
pub const RANKED_CREATOR_LIMIT: usize = 10;

pub const PLATFORM_INFO_ANSWER: &str = "Creator stake allows you to invest in promising social media creators. You can buy creator tokens that increase in value as the creator grows in popularity. The platform uses sentiment analysis to help identify promising investment opportunities.";
pub const NO_CREATORS_ANSWER: &str =
    "I couldn't find any creators to analyze. Please try again later.";
pub const ANALYSIS_UNAVAILABLE_ANSWER: &str = "I'm having trouble analyzing investment opportunities at the moment. Please try again later.";
pub const DEFAULT_QUERY: &str = "Who are the best creators to invest in right now?";

/// What a user is asking the advisor for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// Asks which creators to back.
    Recommendation,
    /// Asks how the platform works.
    PlatformInfo,
    /// Anything else; answered as a recommendation request.
    General,
}

impl QueryIntent {
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();
        let asks_for_picks = ["best creator", "recommend", "top creator", "invest in"]
            .iter()
            .any(|phrase| query.contains(phrase));
        if asks_for_picks {
            return QueryIntent::Recommendation;
        }
        if query.contains("how does") && (query.contains("work") || query.contains("platform")) {
            return QueryIntent::PlatformInfo;
        }
        QueryIntent::General
    }
}

/// Highest sentiment first; at most `limit` creators.
pub fn rank_creators(creators: &[CreatorInsight], limit: usize) -> Vec<CreatorInsight> {
    let mut ranked = creators.to_vec();
    ranked.sort_by(|a, b| b.sentiment_or_zero().cmp(&a.sentiment_or_zero()));
    ranked.truncate(limit);
    ranked
}

const MISSING_BIO: &str = "No bio available";

/// A creator as shown to the model, with gaps filled in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptCreator<'a> {
    name: &'a str,
    stock_price: Decimal,
    sentiment: u8,
    followers: u64,
    bio: &'a str,
}

impl<'a> From<&'a CreatorInsight> for PromptCreator<'a> {
    fn from(insight: &'a CreatorInsight) -> Self {
        Self {
            name: &insight.name,
            stock_price: insight.stock_price,
            sentiment: insight.sentiment_or_zero(),
            followers: insight.followers,
            bio: insight
                .bio
                .as_deref()
                .filter(|bio| !bio.is_empty())
                .unwrap_or(MISSING_BIO),
        }
    }
}

/// Builds the advice prompt embedding the ranked creators as JSON.
pub fn build_advice_prompt(creators: &[CreatorInsight], query: &str) -> Result<String> {
    let shown: Vec<PromptCreator<'_>> = creators.iter().map(PromptCreator::from).collect();
    let creators_json = serde_json::to_string_pretty(&shown)?;
    Ok(format!(
        "You are an investment advisor for a social media creator investment platform called Starvest.\n\
         Users can invest in creators and earn returns based on the creator's success.\n\n\
         Here's data about our top creators:\n\
         {creators_json}\n\n\
         The user has asked: \"{query}\"\n\n\
         Based on sentiment scores and stock prices, provide investment advice.\n\
         Higher sentiment scores (closer to 100) indicate positive investor sentiment.\n\
         Consider both sentiment and current stock price - sometimes lower priced creators with high sentiment offer better growth opportunities.\n\n\
         Respond in a conversational but professional tone, offering specific recommendations with brief explanations.\n\
         Limit your response to 3 top creator recommendations maximum.\n\n\
         Note: Avoid using special formatting characters like asterisks. Present names and values in plain text.\n"
    ))
}

/// Answers investment questions using a text generator.
pub struct InvestmentAdvisor {
    generator: Arc<dyn TextGenerator>,
}

impl InvestmentAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answers `query` about the given creators.
    ///
    /// Never fails: provider errors are turned into an apology so the chat can
    /// keep going.
    #[instrument(skip(self, creators), fields(num_creators = creators.len()))]
    pub async fn answer(&self, query: &str, creators: &[CreatorInsight]) -> String {
        let intent = QueryIntent::classify(query);
        debug!(?intent, "Classified advisor query");

        let query = match intent {
            QueryIntent::PlatformInfo => return PLATFORM_INFO_ANSWER.to_string(),
            QueryIntent::Recommendation => query,
            QueryIntent::General => DEFAULT_QUERY,
        };

        match self.recommend(query, creators).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to analyze investment opportunities: {}", e);
                ANALYSIS_UNAVAILABLE_ANSWER.to_string()
            }
        }
    }

    async fn recommend(&self, query: &str, creators: &[CreatorInsight]) -> Result<String> {
        let ranked = rank_creators(creators, RANKED_CREATOR_LIMIT);
        if ranked.is_empty() {
            return Ok(NO_CREATORS_ANSWER.to_string());
        }
        let prompt = build_advice_prompt(&ranked, query)?;
        let answer = self.generator.generate(&prompt).await?;
        info!(provider = self.generator.name(), "Advisor answer generated");
        Ok(answer.trim().to_string())
    }
}
