//! Typed wrappers over [`ApiClient`](crate::http::ApiClient), one per backend area.
//!
//! Each service is constructed with a shared `Arc<ApiClient>` and knows the
//! endpoint path and payload shape of its calls.

mod auth;
mod payouts;
pub mod retry;
mod transactions;
mod wallet;

pub use auth::AuthService;
pub use payouts::PayoutsService;
pub use transactions::{TransactionsService, next_page};
pub use wallet::WalletService;
