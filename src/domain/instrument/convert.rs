//! Conversion: wire market/instrument responses → domain types.

use super::wire;
use super::{DealingRule, DealingRules, Instrument, Market, MarketSnapshot};

impl From<wire::MarketData> for Market {
    fn from(source: wire::MarketData) -> Self {
        Self {
            epic: source.epic,
            name: source.instrument_name,
            instrument_type: source.instrument_type,
            expiry: source.expiry,
            status: source.market_status,
            bid: source.bid,
            offer: source.offer,
            high: source.high,
            low: source.low,
            net_change: source.net_change,
            percentage_change: source.percentage_change,
            update_time: source.update_time,
            scaling_factor: source.scaling_factor,
            streaming_prices_available: source.streaming_prices_available,
        }
    }
}

impl From<wire::DealingRuleResponse> for DealingRule {
    fn from(source: wire::DealingRuleResponse) -> Self {
        Self {
            unit: source.unit,
            value: source.value,
        }
    }
}

impl From<wire::MarketDetailsResponse> for Instrument {
    fn from(source: wire::MarketDetailsResponse) -> Self {
        let rules = source.dealing_rules;
        Self {
            epic: source.instrument.epic,
            name: source.instrument.name,
            instrument_type: source.instrument.instrument_type,
            expiry: source.instrument.expiry,
            lot_size: source.instrument.lot_size,
            currencies: source
                .instrument
                .currencies
                .into_iter()
                .map(|c| c.code)
                .collect(),
            margin_factor: source.instrument.margin_factor,
            margin_factor_unit: source.instrument.margin_factor_unit,
            dealing_rules: DealingRules {
                min_deal_size: rules.min_deal_size.map(Into::into),
                min_normal_stop_or_limit_distance: rules
                    .min_normal_stop_or_limit_distance
                    .map(Into::into),
                min_controlled_risk_stop_distance: rules
                    .min_controlled_risk_stop_distance
                    .map(Into::into),
                max_stop_or_limit_distance: rules.max_stop_or_limit_distance.map(Into::into),
            },
            snapshot: MarketSnapshot {
                status: source.snapshot.market_status,
                bid: source.snapshot.bid,
                offer: source.snapshot.offer,
                high: source.snapshot.high,
                low: source.snapshot.low,
                net_change: source.snapshot.net_change,
                percentage_change: source.snapshot.percentage_change,
                update_time: source.snapshot.update_time,
                decimal_places_factor: source.snapshot.decimal_places_factor,
                scaling_factor: source.snapshot.scaling_factor,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::InstrumentType;
    use rust_decimal::Decimal;

    #[test]
    fn test_market_conversion_keeps_quotes() {
        let json = r#"{
            "instrumentName": "Apple Inc (All Sessions)",
            "expiry": "DFB",
            "epic": "UA.D.AAPL.DAILY.IP",
            "instrumentType": "SHARES",
            "marketStatus": "TRADEABLE",
            "high": 13498.0,
            "low": 13324.0,
            "percentageChange": -0.34,
            "netChange": -46.0,
            "bid": 13398.0,
            "offer": 13400.0,
            "updateTime": "21:59:15",
            "scalingFactor": 1
        }"#;
        let market: Market = serde_json::from_str::<wire::MarketData>(json).unwrap().into();
        assert_eq!(market.name, "Apple Inc (All Sessions)");
        assert_eq!(market.instrument_type, InstrumentType::Shares);
        assert_eq!(market.mid(), Some(Decimal::new(13399, 0)));
    }

    #[test]
    fn test_mid_requires_both_sides() {
        let json = r#"{
            "instrumentName": "Closed market",
            "expiry": "-",
            "epic": "IX.D.TEST.IP",
            "instrumentType": "INDICES",
            "marketStatus": "CLOSED",
            "high": null,
            "low": null,
            "percentageChange": null,
            "netChange": null,
            "bid": null,
            "offer": null,
            "updateTime": null,
            "scalingFactor": null
        }"#;
        let market: Market = serde_json::from_str::<wire::MarketData>(json).unwrap().into();
        assert_eq!(market.mid(), None);
    }
}
