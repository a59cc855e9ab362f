//! Payload types exchanged with the wallet backend.
//!
//! The client core is payload-agnostic; these types are the expected shape of
//! each endpoint and are decoded by the service wrappers.
//!
//! # Key Types
//!
//! - [`LoginRequest`] / [`LoginResponse`] - `POST /auth/login`
//! - [`WalletsResponse`] - `GET /balances`
//! - [`TransactionsParams`] / [`TransactionsResponse`] - `GET /transactions`
//! - [`PayoutRequest`] / [`PayoutResponse`] - `POST /payouts`
//! - [`Currency`] - the static currency table used when displaying amounts

use serde::{Deserialize, Serialize};

pub mod currency;
pub use currency::{Currency, currency};
pub mod kinds;
pub use kinds::{PayoutProvider, TransactionStatus, TransactionType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Tokens issued on login. Expiry timestamps are informational; the client
/// does not enforce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub access_token_expire: String,
    pub refresh_token: String,
    pub refresh_token_expire: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TwoFactorInfo {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth: AuthTokens,
    #[serde(default)]
    pub tfa: TwoFactorInfo,
}

/// A currency account held by the user. Balances are decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: u64,
    pub user_id: String,
    pub currency_id: u32,
    pub available_balance: String,
    pub current_balance: String,
    pub reserved_balance: String,
    pub reference_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletsResponse {
    pub data: Vec<Wallet>,
    #[serde(default)]
    pub message: Vec<String>,
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub wallet_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    pub reason: String,
    pub amount: f64,
    pub currency_id: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsPagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    pub has_more: bool,
    pub items: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub data: TransactionsPagination,
    #[serde(default)]
    pub message: String,
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Filters for `GET /transactions`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub wallet_id: u64,
    pub provider: PayoutProvider,
    pub amount: f64,
    pub currency_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutResponseData {
    pub id: u64,
    pub status: String,
    pub amount: f64,
    pub provider: PayoutProvider,
    pub wallet_id: u64,
    pub currency_id: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutResponse {
    pub data: PayoutResponseData,
    #[serde(default)]
    pub message: String,
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
}
