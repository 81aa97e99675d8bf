//! Wire types for historical price responses (REST).

use crate::domain::instrument::InstrumentType;
use crate::shared::serde_util::snapshot_timestamp;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw bid/ask/last-traded triple.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteResponse {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    /// Only populated for exchange-traded instruments.
    pub last_traded: Option<Decimal>,
}

/// One price point from `GET /prices/{epic}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricePointResponse {
    #[serde(with = "snapshot_timestamp")]
    pub snapshot_time: NaiveDateTime,
    pub open_price: PriceQuoteResponse,
    pub close_price: PriceQuoteResponse,
    pub high_price: PriceQuoteResponse,
    pub low_price: PriceQuoteResponse,
    pub last_traded_volume: Option<Decimal>,
}

/// Weekly data-allowance block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceResponse {
    pub remaining_allowance: i64,
    pub total_allowance: i64,
    /// Seconds until the allowance window resets.
    pub allowance_expiry: i64,
}

/// Paging block of the price metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageDataResponse {
    pub page_size: i64,
    pub page_number: i64,
    pub total_pages: i64,
}

/// Metadata block of `GET /prices/{epic}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceMetadataResponse {
    pub allowance: AllowanceResponse,
    pub page_data: Option<PageDataResponse>,
    pub size: i64,
}

/// REST response for historical prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResponse {
    pub prices: Vec<PricePointResponse>,
    pub instrument_type: Option<InstrumentType>,
    pub metadata: Option<PriceMetadataResponse>,
}
