use std::sync::Arc;

use crate::http::{ApiClient, ApiError};
use crate::models::WalletsResponse;

#[derive(Clone)]
pub struct WalletService {
    client: Arc<ApiClient>,
}

impl WalletService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Balances of every wallet owned by the signed-in user.
    pub async fn get_balances(&self) -> Result<WalletsResponse, ApiError> {
        self.client.get("/balances", None).await
    }
}
