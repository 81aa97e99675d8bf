//! Position domain — open positions and the OTC dealing flow.

pub mod client;
mod convert;
pub mod wire;

use crate::domain::instrument::Market;
use crate::shared::{DealId, Direction};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// How a dealing request is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Fill at current market level.
    #[default]
    Market,
    /// Fill at the specified level or better.
    Limit,
}

/// Outcome of a deal as reported by the confirms endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStatus {
    Accepted,
    Rejected,
}

// ─── Position ────────────────────────────────────────────────────────────────

/// An open trade held by the account, with current market data for its
/// instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub deal_id: DealId,
    pub direction: Direction,
    pub size: Decimal,
    pub open_level: Decimal,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub controlled_risk: bool,
    pub limit_level: Option<Decimal>,
    pub stop_level: Option<Decimal>,
    pub trailing_stop_distance: Option<Decimal>,
    pub market: Market,
}

impl Position {
    /// Running profit/loss in points against the closeable side of the
    /// current quote (bid for longs, offer for shorts).
    pub fn profit_loss_points(&self) -> Option<Decimal> {
        match self.direction {
            Direction::Buy => self.market.bid.map(|bid| bid - self.open_level),
            Direction::Sell => self.market.offer.map(|offer| self.open_level - offer),
        }
    }
}

// ─── Dealing ─────────────────────────────────────────────────────────────────

/// Reference handed back by the dealing endpoints, used to confirm the
/// outcome via `GET /confirms/{reference}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealReference(pub String);

impl DealReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DealReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confirmed outcome of a dealing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealConfirmation {
    pub reference: DealReference,
    pub deal_id: Option<DealId>,
    pub status: DealStatus,
    /// Rejection reason code; `SUCCESS` on accepted deals.
    pub reason: Option<String>,
    pub direction: Option<Direction>,
    pub size: Option<Decimal>,
    pub level: Option<Decimal>,
}

impl DealConfirmation {
    pub fn is_accepted(&self) -> bool {
        self.status == DealStatus::Accepted
    }
}
