//! Positions sub-client — listing and the OTC dealing flow.

use crate::client::IgClient;
use crate::domain::position::wire::{
    ClosePositionRequest, CreatePositionRequest, DealConfirmationResponse, DealReferenceResponse,
    PositionsResponse,
};
use crate::domain::position::{DealConfirmation, DealReference, Position};
use crate::error::IgError;
use crate::http::RetryPolicy;

/// Sub-client for position operations.
pub struct Positions<'a> {
    pub(crate) client: &'a IgClient,
}

impl<'a> Positions<'a> {
    /// List all open positions for the authenticated account.
    pub async fn list(&self) -> Result<Vec<Position>, IgError> {
        let resp: PositionsResponse = self
            .client
            .http
            .get("/positions", 1, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.positions.into_iter().map(Position::from).collect())
    }

    /// Open a position (`POST /positions/otc`).
    ///
    /// Dealing is asynchronous: the gateway returns a deal reference
    /// immediately; pass it to [`Positions::confirm`] for the outcome.
    pub async fn open(&self, request: &CreatePositionRequest) -> Result<DealReference, IgError> {
        tracing::info!(
            epic = %request.epic,
            direction = %request.direction,
            size = %request.size,
            "opening position"
        );
        let resp: DealReferenceResponse =
            self.client.http.post("/positions/otc", 2, request).await?;
        Ok(DealReference(resp.deal_reference))
    }

    /// Close (part of) a position.
    pub async fn close(&self, request: &ClosePositionRequest) -> Result<DealReference, IgError> {
        tracing::info!(
            deal_id = %request.deal_id,
            direction = %request.direction,
            size = %request.size,
            "closing position"
        );
        let resp: DealReferenceResponse = self
            .client
            .http
            .delete_via_post("/positions/otc", 1, request)
            .await?;
        Ok(DealReference(resp.deal_reference))
    }

    /// Confirm the outcome of a dealing request
    /// (`GET /confirms/{dealReference}`).
    pub async fn confirm(&self, reference: &DealReference) -> Result<DealConfirmation, IgError> {
        let path = format!("/confirms/{}", reference);
        let resp: DealConfirmationResponse = self
            .client
            .http
            .get(&path, 1, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.into())
    }
}
