//! Investor-sentiment scoring of creator posts.
//!
//! The language model is asked for a score between 0.1 and 1.0; the stored
//! score is that value clamped and scaled to `10..=100`.

use std::sync::LazyLock;

use model::Post;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, instrument, warn};

use crate::generator::TextGenerator;

/// Used when the model replied but no number could be read from it.
pub const UNPARSEABLE_SCORE: u8 = 65;
/// Used when the provider could not be reached at all.
pub const PROVIDER_ERROR_SCORE: u8 = 50;

const MIN_RAW_SCORE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.?[0-9]*").expect("number pattern is valid")
});

/// Builds the rating prompt for a post.
pub fn build_sentiment_prompt(text: &str, image_url: Option<&str>) -> String {
    let mut content = text.to_string();
    if let Some(url) = image_url {
        content.push_str(&format!(
            "\n\nThe post also includes an image at: {}. Please consider that this post has visual content.",
            url
        ));
    }

    let image_note = if image_url.is_some() {
        "This post includes an image which you cannot see, but please consider that visual content usually increases engagement.\n"
    } else {
        ""
    };
    let image_factor = if image_url.is_some() {
        "- The fact that the creator included visual content, which typically increases engagement\n"
    } else {
        ""
    };

    format!(
        "Analyze the sentiment of this social media post from an investor's perspective.\n\
         {image_note}\n\
         Focus on how positive or engaging the content would be for potential investors.\n\
         Rate the sentiment on a scale from 0.1 to 1.0, where:\n\
         - 0.1-0.25: Very negative (concerning for investors)\n\
         - 0.26-0.45: Negative (raises concerns)\n\
         - 0.46-0.63: Somewhat negative/neutral (neither attractive nor concerning)\n\
         - 0.64-0.75: Somewhat positive (mildly attractive to investors)\n\
         - 0.76-0.85: Positive (attractive to investors)\n\
         - 0.86-0.95: Very positive (highly attractive)\n\
         - 0.96-1.00: Extremely positive (exceptional investment opportunity)\n\n\
         Post content: \"{content}\"\n\n\
         Consider factors like:\n\
         - Tone and language\n\
         - Specific financial or business terms\n\
         - Mentions of growth, opportunity, or success\n\
         - Any warning signs or negative indicators\n\
         {image_factor}\n\
         Only respond with a single decimal number between 0.1 and 1.0 representing the sentiment score.\n"
    )
}

/// Reads the first number in a model reply and maps it to `10..=100`.
///
/// Returns [`UNPARSEABLE_SCORE`] when the reply contains no number.
pub fn parse_sentiment_score(response: &str) -> u8 {
    let Some(found) = NUMBER.find(response.trim()) else {
        debug!("No score in response, using default");
        return UNPARSEABLE_SCORE;
    };
    let raw = found.as_str().trim_end_matches('.');
    let Some(value) = parse_raw_score(raw) else {
        return UNPARSEABLE_SCORE;
    };

    let clamped = value.clamp(MIN_RAW_SCORE, Decimal::ONE);
    (clamped * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(UNPARSEABLE_SCORE)
}

/// Reads an ASCII decimal that may carry more digits than a `Decimal` holds.
///
/// A non-zero integer part that overflows is above any valid score, so it
/// maps to `Decimal::MAX` and later clamps to the top of the scale.
fn parse_raw_score(raw: &str) -> Option<Decimal> {
    if let Ok(value) = raw.parse::<Decimal>() {
        return Some(value);
    }
    let (integer, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if integer.bytes().any(|digit| digit != b'0') {
        return Some(Decimal::MAX);
    }
    let leading = &fraction[..fraction.len().min(20)];
    format!("0.{}", leading).parse().ok()
}

/// Scores a post with the given generator.
///
/// Provider failures are not surfaced; the post gets [`PROVIDER_ERROR_SCORE`].
#[instrument(skip(generator, post), fields(provider = generator.name(), has_image = post.image().is_some()))]
pub async fn score_post(generator: &dyn TextGenerator, post: &Post) -> u8 {
    let prompt = build_sentiment_prompt(&post.text, post.image());
    match generator.generate(&prompt).await {
        Ok(response) => parse_sentiment_score(&response),
        Err(e) => {
            warn!(error = %e, "Sentiment analysis failed");
            PROVIDER_ERROR_SCORE
        }
    }
}
