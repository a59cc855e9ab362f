use std::sync::Arc;

use crate::http::{ApiClient, ApiError, QueryParams};
use crate::models::{TransactionsParams, TransactionsResponse};

#[derive(Clone)]
pub struct TransactionsService {
    client: Arc<ApiClient>,
}

impl TransactionsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches one page of transaction history. Unset filters are not sent.
    pub async fn get_transactions(&self, params: Option<&TransactionsParams>) -> Result<TransactionsResponse, ApiError> {
        let query = params.map(QueryParams::from_serializable).transpose()?;
        self.client.get("/transactions", query.as_ref()).await
    }
}

/// Parameters for the page following `response`, or `None` on the last page.
pub fn next_page(params: &TransactionsParams, response: &TransactionsResponse) -> Option<TransactionsParams> {
    if !response.data.has_more {
        return None;
    }

    let page = response.data.current_page.checked_add(1)?;
    Some(TransactionsParams {
        page: Some(page),
        ..params.clone()
    })
}
