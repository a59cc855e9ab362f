use std::sync::Arc;

use log::info;

use crate::http::{ApiClient, ApiError};
use crate::models::{PayoutRequest, PayoutResponse};

#[derive(Clone)]
pub struct PayoutsService {
    client: Arc<ApiClient>,
}

impl PayoutsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Requests a payout. Not idempotent: callers must not retry it blindly.
    pub async fn create_payout(&self, request: &PayoutRequest) -> Result<PayoutResponse, ApiError> {
        let response: PayoutResponse = self.client.post("/payouts", request).await?;
        info!(
            payout_id = response.data.id,
            wallet_id = request.wallet_id,
            provider:% = request.provider,
            status = response.data.status.as_str();
            "Payout requested"
        );
        Ok(response)
    }
}
