//! Instrument domain — market search, market data, instrument details.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::Epic;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Tradable product category.
///
/// The gateway grows new categories occasionally; unrecognized values fall
/// back to [`InstrumentType::Unknown`] rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    Binary,
    Commodities,
    Currencies,
    Indices,
    OptCommodities,
    OptCurrencies,
    OptIndices,
    OptRates,
    OptShares,
    Rates,
    Sectors,
    Shares,
    SprintMarket,
    TestMarket,
    #[serde(other)]
    Unknown,
}

/// Market dealing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    Closed,
    EditsOnly,
    Offline,
    OnAuction,
    OnAuctionNoEdits,
    Suspended,
    Tradeable,
    #[serde(other)]
    Unknown,
}

impl MarketStatus {
    /// Whether new deals are accepted right now.
    pub fn is_tradeable(&self) -> bool {
        matches!(self, Self::Tradeable)
    }
}

// ─── Market ──────────────────────────────────────────────────────────────────

/// Current market data for one instrument, as returned by search results
/// and embedded in position listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub epic: Epic,
    pub name: String,
    pub instrument_type: InstrumentType,
    pub expiry: String,
    pub status: MarketStatus,
    pub bid: Option<Decimal>,
    pub offer: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub net_change: Option<Decimal>,
    pub percentage_change: Option<Decimal>,
    /// Exchange-local time of the last update, `HH:MM:SS`.
    pub update_time: Option<String>,
    pub scaling_factor: Option<Decimal>,
    pub streaming_prices_available: bool,
}

impl Market {
    /// Midpoint of the current bid/offer spread.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.bid, self.offer) {
            (Some(bid), Some(offer)) => Some((bid + offer) / Decimal::TWO),
            _ => None,
        }
    }
}

// ─── Instrument ──────────────────────────────────────────────────────────────

/// A dealing rule: a value with its unit (points or percentage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealingRule {
    pub unit: String,
    pub value: Decimal,
}

/// Dealing constraints for an instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealingRules {
    pub min_deal_size: Option<DealingRule>,
    pub min_normal_stop_or_limit_distance: Option<DealingRule>,
    pub min_controlled_risk_stop_distance: Option<DealingRule>,
    pub max_stop_or_limit_distance: Option<DealingRule>,
}

/// Full instrument details with a current market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub epic: Epic,
    pub name: String,
    pub instrument_type: InstrumentType,
    pub expiry: String,
    pub lot_size: Option<Decimal>,
    /// Currency codes the instrument can be dealt in.
    pub currencies: Vec<String>,
    pub margin_factor: Option<Decimal>,
    pub margin_factor_unit: Option<String>,
    pub dealing_rules: DealingRules,
    pub snapshot: MarketSnapshot,
}

/// Current prices and status from the instrument details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub status: MarketStatus,
    pub bid: Option<Decimal>,
    pub offer: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub net_change: Option<Decimal>,
    pub percentage_change: Option<Decimal>,
    pub update_time: Option<String>,
    pub decimal_places_factor: Option<i32>,
    pub scaling_factor: Option<Decimal>,
}
