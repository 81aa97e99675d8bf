//! Instruments sub-client — search and details.

use crate::client::IgClient;
use crate::domain::instrument::wire::{MarketDetailsResponse, MarketSearchResponse};
use crate::domain::instrument::{Instrument, Market};
use crate::error::IgError;
use crate::http::RetryPolicy;
use crate::shared::Epic;

/// Sub-client for instrument operations.
pub struct Instruments<'a> {
    pub(crate) client: &'a IgClient,
}

impl<'a> Instruments<'a> {
    /// Search markets by free-text term (`GET /markets?searchTerm=`).
    pub async fn search(&self, term: &str) -> Result<Vec<Market>, IgError> {
        let path = format!("/markets?searchTerm={}", urlencoding::encode(term));
        let resp: MarketSearchResponse = self
            .client
            .http
            .get(&path, 1, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.markets.into_iter().map(Market::from).collect())
    }

    /// Fetch full details for one instrument (`GET /markets/{epic}`).
    pub async fn get(&self, epic: &Epic) -> Result<Instrument, IgError> {
        let path = format!("/markets/{}", epic);
        let resp: MarketDetailsResponse = self
            .client
            .http
            .get(&path, 3, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.into())
    }
}
