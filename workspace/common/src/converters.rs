//! Converter functions for bridging transport DTOs and model snapshots.
//!
//! Only the input direction lives here. Building response DTOs needs the
//! formatting helpers of the compute crate, so the service does that itself.

use model::{Creator, CreatorInsight, Holding, Investment};

use crate::advisor::CreatorInsightDto;
use crate::portfolio::HoldingDto;
use crate::valuation::{CreatorSnapshotDto, InvestmentDto};

impl From<CreatorSnapshotDto> for Creator {
    fn from(dto: CreatorSnapshotDto) -> Self {
        Creator {
            id: dto.id,
            token_price: dto.token_price,
            followers_count: dto.followers_count,
            created_at: dto.created_at,
        }
    }
}

impl From<InvestmentDto> for Investment {
    fn from(dto: InvestmentDto) -> Self {
        Investment::new(dto.backer_id, dto.tokens_invested)
    }
}

impl From<HoldingDto> for Holding {
    fn from(dto: HoldingDto) -> Self {
        Holding::new(dto.creator_id, dto.tokens, dto.cost_basis, dto.current_price)
    }
}

impl From<CreatorInsightDto> for CreatorInsight {
    fn from(dto: CreatorInsightDto) -> Self {
        CreatorInsight {
            name: dto.name,
            stock_price: dto.stock_price,
            sentiment: dto.sentiment,
            followers: dto.followers,
            bio: dto.bio,
        }
    }
}

/// Converts a batch of investment DTOs.
pub fn investments_from_dtos(dtos: Vec<InvestmentDto>) -> Vec<Investment> {
    dtos.into_iter().map(Investment::from).collect()
}

/// Converts a batch of holding DTOs.
pub fn holdings_from_dtos(dtos: Vec<HoldingDto>) -> Vec<Holding> {
    dtos.into_iter().map(Holding::from).collect()
}

/// Converts a batch of creator insight DTOs.
pub fn insights_from_dtos(dtos: Vec<CreatorInsightDto>) -> Vec<CreatorInsight> {
    dtos.into_iter().map(CreatorInsight::from).collect()
}
