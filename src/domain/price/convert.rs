//! Conversion: price wire responses → domain candles.

use super::wire;
use super::{Allowance, Candle, PriceHistory, Quote};

impl From<wire::PriceQuoteResponse> for Quote {
    fn from(source: wire::PriceQuoteResponse) -> Self {
        Self {
            bid: source.bid,
            ask: source.ask,
        }
    }
}

impl From<wire::PricePointResponse> for Candle {
    fn from(source: wire::PricePointResponse) -> Self {
        Self {
            time: source.snapshot_time,
            open: source.open_price.into(),
            close: source.close_price.into(),
            high: source.high_price.into(),
            low: source.low_price.into(),
            volume: source.last_traded_volume,
        }
    }
}

impl From<wire::AllowanceResponse> for Allowance {
    fn from(source: wire::AllowanceResponse) -> Self {
        Self {
            remaining: source.remaining_allowance,
            total: source.total_allowance,
            expires_in_secs: source.allowance_expiry,
        }
    }
}

impl From<wire::PricesResponse> for PriceHistory {
    fn from(source: wire::PricesResponse) -> Self {
        Self {
            candles: source.prices.into_iter().map(Candle::from).collect(),
            allowance: source.metadata.map(|m| m.allowance.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::wire::tests::PRICES_JSON;
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_price_history_conversion() {
        let resp: wire::PricesResponse = serde_json::from_str(PRICES_JSON).unwrap();
        let history = PriceHistory::from(resp);
        assert_eq!(history.candles.len(), 2);

        let first = &history.candles[0];
        assert_eq!(first.open.mid(), Some(Decimal::new(13396, 0)));
        assert_eq!(first.volume, Some(Decimal::from(12345)));

        let allowance = history.allowance.unwrap();
        assert_eq!(allowance.remaining, 9990);
        assert_eq!(allowance.total, 10000);
    }
}
