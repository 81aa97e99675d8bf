//! Prices sub-client — historical candle queries.

use crate::client::IgClient;
use crate::domain::price::wire::PricesResponse;
use crate::domain::price::{PriceHistory, PriceQuery};
use crate::error::IgError;
use crate::http::RetryPolicy;
use crate::shared::Epic;

/// `from`/`to` query format expected by the gateway.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Sub-client for historical price operations.
pub struct Prices<'a> {
    pub(crate) client: &'a IgClient,
}

impl<'a> Prices<'a> {
    /// Fetch historical candles for one instrument (`GET /prices/{epic}`).
    pub async fn get(&self, epic: &Epic, query: &PriceQuery) -> Result<PriceHistory, IgError> {
        let mut path = format!("/prices/{}?resolution={}", epic, query.resolution);
        if let Some(from) = query.from {
            path.push_str(&format!("&from={}", from.format(QUERY_TIME_FORMAT)));
        }
        if let Some(to) = query.to {
            path.push_str(&format!("&to={}", to.format(QUERY_TIME_FORMAT)));
        }
        if let Some(max) = query.max {
            path.push_str(&format!("&max={max}"));
        }
        if let Some(page_size) = query.page_size {
            path.push_str(&format!("&pageSize={page_size}"));
        }
        if let Some(page_number) = query.page_number {
            path.push_str(&format!("&pageNumber={page_number}"));
        }

        let resp: PricesResponse = self
            .client
            .http
            .get(&path, 3, RetryPolicy::Idempotent)
            .await?;

        if let Some(meta) = &resp.metadata {
            tracing::debug!(
                remaining = meta.allowance.remaining_allowance,
                total = meta.allowance.total_allowance,
                "price data allowance"
            );
        }

        Ok(resp.into())
    }
}
