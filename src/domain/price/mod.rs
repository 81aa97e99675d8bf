//! Price domain — historical candles, query parameters, API allowance.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::Resolution;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bid/ask pair at one point of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
}

impl Quote {
    /// Midpoint of bid and ask.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}

/// One aggregated price candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Exchange-local snapshot time of the candle.
    pub time: NaiveDateTime,
    pub open: Quote,
    pub close: Quote,
    pub high: Quote,
    pub low: Quote,
    pub volume: Option<Decimal>,
}

/// Remaining historical-data allowance for the API key.
///
/// IG meters price requests per week; exhausting the allowance turns
/// further price calls into 403s until `expires_in_secs` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allowance {
    pub remaining: i64,
    pub total: i64,
    pub expires_in_secs: i64,
}

/// Historical prices for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub candles: Vec<Candle>,
    pub allowance: Option<Allowance>,
}

/// Query parameters for a price request.
///
/// `from`/`to` and `max` are alternative ways to bound the window; when a
/// date range is given the gateway ignores `max`.
#[derive(Debug, Clone, Default)]
pub struct PriceQuery {
    pub resolution: Resolution,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub max: Option<u32>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
}

impl PriceQuery {
    pub fn resolution(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }
}
