//! Conversion: position wire responses → domain types.

use super::wire;
use super::{DealConfirmation, DealReference, Position};

impl From<wire::PositionEnvelopeResponse> for Position {
    fn from(source: wire::PositionEnvelopeResponse) -> Self {
        Self {
            deal_id: source.position.deal_id,
            direction: source.position.direction,
            size: source.position.deal_size,
            open_level: source.position.open_level,
            currency: source.position.currency,
            created_at: source.position.created_date,
            controlled_risk: source.position.controlled_risk,
            limit_level: source.position.limit_level,
            stop_level: source.position.stop_level,
            trailing_stop_distance: source.position.trailing_stop_distance,
            market: source.market.into(),
        }
    }
}

impl From<wire::DealConfirmationResponse> for DealConfirmation {
    fn from(source: wire::DealConfirmationResponse) -> Self {
        Self {
            reference: DealReference(source.deal_reference),
            deal_id: source.deal_id,
            status: source.deal_status,
            reason: source.reason,
            direction: source.direction,
            size: source.size,
            level: source.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Direction;
    use rust_decimal::Decimal;

    #[test]
    fn test_position_conversion_and_pl_points() {
        let json = r#"{
            "position": {
                "contractSize": 1.0,
                "createdDate": "2021/02/10 11:42:56:000",
                "dealId": "DIAAAAGB25EY6AN",
                "dealSize": 0.1,
                "direction": "BUY",
                "limitLevel": null,
                "openLevel": 13300.0,
                "currency": "GBP",
                "controlledRisk": false,
                "stopLevel": 13000.0,
                "trailingStep": null,
                "trailingStopDistance": null,
                "limitedRiskPremium": null
            },
            "market": {
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
                "offer": 13411.0,
                "updateTime": "21:59:15",
                "scalingFactor": 1
            }
        }"#;
        let envelope: wire::PositionEnvelopeResponse = serde_json::from_str(json).unwrap();
        let position = Position::from(envelope);

        assert_eq!(position.size, Decimal::new(1, 1));
        assert_eq!(position.stop_level, Some(Decimal::new(13000, 0)));
        assert_eq!(position.market.epic.as_str(), "UA.D.AAPL.DAILY.IP");
        // Long at 13300, bid now 13398 -> +98 points.
        assert_eq!(position.profit_loss_points(), Some(Decimal::new(98, 0)));
    }

    #[test]
    fn test_short_position_pl_uses_offer() {
        let json = r#"{
            "position": {
                "contractSize": 1.0,
                "createdDate": "2021/03/01 09:00:00:000",
                "dealId": "DIAAAAGB25EY6AO",
                "dealSize": 2,
                "direction": "SELL",
                "limitLevel": null,
                "openLevel": 7500.0,
                "currency": "GBP",
                "controlledRisk": false,
                "stopLevel": null,
                "trailingStep": null,
                "trailingStopDistance": null,
                "limitedRiskPremium": null
            },
            "market": {
                "instrumentName": "FTSE 100",
                "expiry": "DFB",
                "epic": "IX.D.FTSE.DAILY.IP",
                "instrumentType": "INDICES",
                "marketStatus": "TRADEABLE",
                "high": null,
                "low": null,
                "percentageChange": null,
                "netChange": null,
                "bid": 7433.1,
                "offer": 7434.1,
                "updateTime": null,
                "scalingFactor": 1
            }
        }"#;
        let envelope: wire::PositionEnvelopeResponse = serde_json::from_str(json).unwrap();
        let position = Position::from(envelope);

        assert_eq!(position.direction, Direction::Sell);
        // Short at 7500, offer now 7434.1 -> +65.9 points.
        assert_eq!(position.profit_loss_points(), Some(Decimal::new(659, 1)));
    }
}
