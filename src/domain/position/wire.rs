//! Wire types for position listings and OTC dealing (REST).

use crate::domain::instrument::wire::MarketData;
use crate::domain::position::{DealStatus, OrderType};
use crate::shared::serde_util::deal_timestamp;
use crate::shared::{DealId, Direction, Epic};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Listings ────────────────────────────────────────────────────────────────

/// Raw position block of `GET /positions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub contract_size: Option<Decimal>,
    #[serde(with = "deal_timestamp")]
    pub created_date: NaiveDateTime,
    pub deal_id: DealId,
    pub deal_size: Decimal,
    pub direction: Direction,
    pub limit_level: Option<Decimal>,
    pub open_level: Decimal,
    pub currency: String,
    #[serde(default)]
    pub controlled_risk: bool,
    pub stop_level: Option<Decimal>,
    pub trailing_step: Option<Decimal>,
    pub trailing_stop_distance: Option<Decimal>,
    pub limited_risk_premium: Option<Decimal>,
}

/// One entry of the positions list: the deal plus current market data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionEnvelopeResponse {
    pub position: PositionResponse,
    pub market: MarketData,
}

/// REST response for the positions list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub positions: Vec<PositionEnvelopeResponse>,
}

// ─── Dealing requests ────────────────────────────────────────────────────────

/// Request body for `POST /positions/otc` (open).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionRequest {
    pub epic: Epic,
    pub expiry: String,
    pub direction: Direction,
    pub size: Decimal,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Decimal>,
    pub guaranteed_stop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_level: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_distance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_level: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_distance: Option<Decimal>,
    pub force_open: bool,
    pub currency_code: String,
}

impl CreatePositionRequest {
    /// A plain market order on a dated-for-breakfast (`DFB`) instrument.
    pub fn market(epic: Epic, direction: Direction, size: Decimal, currency: &str) -> Self {
        Self {
            epic,
            expiry: "DFB".to_string(),
            direction,
            size,
            order_type: OrderType::Market,
            level: None,
            guaranteed_stop: false,
            stop_level: None,
            stop_distance: None,
            limit_level: None,
            limit_distance: None,
            force_open: false,
            currency_code: currency.to_string(),
        }
    }
}

/// Request body for closing a position (`POST /positions/otc` with the
/// DELETE method override).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionRequest {
    pub deal_id: DealId,
    /// Must be the opposite of the open direction.
    pub direction: Direction,
    pub size: Decimal,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Decimal>,
}

// ─── Dealing responses ───────────────────────────────────────────────────────

/// Response of both dealing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealReferenceResponse {
    pub deal_reference: String,
}

/// Response of `GET /confirms/{dealReference}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealConfirmationResponse {
    pub deal_reference: String,
    pub deal_id: Option<DealId>,
    pub deal_status: DealStatus,
    pub reason: Option<String>,
    pub epic: Option<Epic>,
    pub expiry: Option<String>,
    pub direction: Option<Direction>,
    pub size: Option<Decimal>,
    pub level: Option<Decimal>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const POSITIONS_JSON: &str = r#"{
        "positions": [
            {
                "position": {
                    "contractSize": 1.0,
                    "createdDate": "2021/02/10 11:42:56:000",
                    "dealId": "DIAAAAGB25EY6AN",
                    "dealSize": 0.1,
                    "direction": "BUY",
                    "limitLevel": null,
                    "openLevel": 13664.0,
                    "currency": "GBP",
                    "controlledRisk": false,
                    "stopLevel": null,
                    "trailingStep": null,
                    "trailingStopDistance": null,
                    "limitedRiskPremium": null
                },
                "market": {
                    "instrumentName": "Apple Inc (All Sessions)",
                    "expiry": "DFB",
                    "epic": "UA.D.AAPL.DAILY.IP",
                    "instrumentType": "SHARES",
                    "lotSize": 1.0,
                    "high": 13498.0,
                    "low": 13324.0,
                    "percentageChange": -0.34,
                    "netChange": -46.0,
                    "bid": 13398.0,
                    "offer": 13411.0,
                    "updateTime": "21:59:15",
                    "delayTime": 0,
                    "streamingPricesAvailable": false,
                    "marketStatus": "EDITS_ONLY",
                    "scalingFactor": 1
                }
            }
        ]
    }"#;

    #[test]
    fn test_positions_response_deserialize() {
        let resp: PositionsResponse = serde_json::from_str(POSITIONS_JSON).unwrap();
        assert_eq!(resp.positions.len(), 1);

        let position = &resp.positions[0].position;
        assert_eq!(position.deal_id.as_str(), "DIAAAAGB25EY6AN");
        assert_eq!(position.direction, Direction::Buy);
        assert_eq!(position.open_level, Decimal::new(13664, 0));
        assert_eq!(
            position.created_date,
            NaiveDate::from_ymd_opt(2021, 2, 10)
                .unwrap()
                .and_hms_opt(11, 42, 56)
                .unwrap()
        );
        assert!(position.limit_level.is_none());

        let market = &resp.positions[0].market;
        assert_eq!(market.instrument_name, "Apple Inc (All Sessions)");
    }

    #[test]
    fn test_create_request_omits_unset_levels() {
        let req = CreatePositionRequest::market(
            Epic::from("UA.D.AAPL.DAILY.IP"),
            Direction::Buy,
            Decimal::new(1, 1),
            "GBP",
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["direction"], "BUY");
        assert_eq!(json["orderType"], "MARKET");
        assert_eq!(json["expiry"], "DFB");
        assert!(json.get("stopLevel").is_none());
        assert!(json.get("limitLevel").is_none());
        assert_eq!(json["guaranteedStop"], false);
    }

    #[test]
    fn test_confirmation_deserialize_rejected() {
        let json = r#"{
            "dealReference": "H7MR2CFGVKVUS2K",
            "dealId": null,
            "dealStatus": "REJECTED",
            "reason": "MARKET_CLOSED_WITH_EDITS",
            "epic": "UA.D.AAPL.DAILY.IP",
            "expiry": "DFB",
            "direction": "BUY",
            "size": 0.1,
            "level": null,
            "status": null
        }"#;
        let confirm: DealConfirmationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(confirm.deal_status, DealStatus::Rejected);
        assert_eq!(confirm.reason.as_deref(), Some("MARKET_CLOSED_WITH_EDITS"));
        assert!(confirm.deal_id.is_none());
    }
}
