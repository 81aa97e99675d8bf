//! Wire types for market and instrument responses (REST).

use crate::domain::instrument::{InstrumentType, MarketStatus};
use crate::shared::Epic;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw market data record. Shared by `GET /markets?searchTerm=` results and
/// the `market` block of position listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub instrument_name: String,
    pub expiry: String,
    pub epic: Epic,
    pub instrument_type: InstrumentType,
    pub market_status: MarketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub percentage_change: Option<Decimal>,
    pub net_change: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub offer: Option<Decimal>,
    pub update_time: Option<String>,
    #[serde(default)]
    pub delay_time: i64,
    #[serde(default)]
    pub streaming_prices_available: bool,
    pub scaling_factor: Option<Decimal>,
}

/// REST response for a market search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSearchResponse {
    pub markets: Vec<MarketData>,
}

/// Currency entry within instrument details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentCurrencyResponse {
    pub code: String,
    pub symbol: Option<String>,
    pub base_exchange_rate: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    pub is_default: Option<bool>,
}

/// Raw instrument block of `GET /markets/{epic}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetailsResponse {
    pub epic: Epic,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
    pub expiry: String,
    pub lot_size: Option<Decimal>,
    #[serde(default)]
    pub currencies: Vec<InstrumentCurrencyResponse>,
    pub margin_factor: Option<Decimal>,
    pub margin_factor_unit: Option<String>,
    pub controlled_risk_allowed: Option<bool>,
    pub streaming_prices_available: Option<bool>,
    pub market_id: Option<String>,
}

/// A dealing rule value with its unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealingRuleResponse {
    pub unit: String,
    pub value: Decimal,
}

/// Raw dealing rules block of `GET /markets/{epic}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealingRulesResponse {
    pub min_deal_size: Option<DealingRuleResponse>,
    pub min_normal_stop_or_limit_distance: Option<DealingRuleResponse>,
    pub min_controlled_risk_stop_distance: Option<DealingRuleResponse>,
    pub max_stop_or_limit_distance: Option<DealingRuleResponse>,
    pub market_order_preference: Option<String>,
    pub trailing_stops_preference: Option<String>,
}

/// Raw snapshot block of `GET /markets/{epic}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshotResponse {
    pub market_status: MarketStatus,
    pub net_change: Option<Decimal>,
    pub percentage_change: Option<Decimal>,
    pub update_time: Option<String>,
    #[serde(default)]
    pub delay_time: i64,
    pub bid: Option<Decimal>,
    pub offer: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub decimal_places_factor: Option<i32>,
    pub scaling_factor: Option<Decimal>,
    pub controlled_risk_extra_spread: Option<Decimal>,
}

/// REST response for instrument details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDetailsResponse {
    pub instrument: InstrumentDetailsResponse,
    #[serde(default)]
    pub dealing_rules: DealingRulesResponse,
    pub snapshot: MarketSnapshotResponse,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const MARKET_JSON: &str = r#"{
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
    }"#;

    #[test]
    fn test_market_data_deserialize() {
        let market: MarketData = serde_json::from_str(MARKET_JSON).unwrap();
        assert_eq!(market.epic.as_str(), "UA.D.AAPL.DAILY.IP");
        assert_eq!(market.instrument_type, InstrumentType::Shares);
        assert_eq!(market.market_status, MarketStatus::EditsOnly);
        assert_eq!(market.update_time.as_deref(), Some("21:59:15"));
    }

    #[test]
    fn test_unknown_instrument_type_tolerated() {
        let json = MARKET_JSON.replace("\"SHARES\"", "\"QUANTUM_WIDGETS\"");
        let market: MarketData = serde_json::from_str(&json).unwrap();
        assert_eq!(market.instrument_type, InstrumentType::Unknown);
    }

    #[test]
    fn test_search_response_deserialize() {
        let json = format!(r#"{{"markets": [{MARKET_JSON}]}}"#);
        let resp: MarketSearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp.markets.len(), 1);
    }

    #[test]
    fn test_market_details_deserialize_without_dealing_rules() {
        let json = r#"{
            "instrument": {
                "epic": "IX.D.FTSE.DAILY.IP",
                "name": "FTSE 100",
                "type": "INDICES",
                "expiry": "DFB",
                "lotSize": 10.0,
                "currencies": [{"code": "GBP", "symbol": "£", "isDefault": true}],
                "marginFactor": 5,
                "marginFactorUnit": "PERCENTAGE"
            },
            "snapshot": {
                "marketStatus": "TRADEABLE",
                "netChange": 12.5,
                "percentageChange": 0.17,
                "updateTime": "16:30:02",
                "delayTime": 0,
                "bid": 7433.1,
                "offer": 7434.1,
                "high": 7450.0,
                "low": 7401.3,
                "decimalPlacesFactor": 1,
                "scalingFactor": 1
            }
        }"#;
        let details: MarketDetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(details.instrument.instrument_type, InstrumentType::Indices);
        assert!(details.dealing_rules.min_deal_size.is_none());
        assert!(details.snapshot.market_status.is_tradeable());
    }
}
