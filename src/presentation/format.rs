use chrono::DateTime;

use crate::models::{TransactionStatus, TransactionType, currency};

const FALLBACK_CURRENCY_CODE: &str = "EUR";

/// Signed amount with two decimals and the currency code, e.g. `+12.50 EUR`.
///
/// Top-ups are credits, withdrawals debits; the sign of `amount` itself is
/// ignored. Unknown currency ids fall back to EUR.
pub fn format_amount(amount: f64, currency_id: u32, kind: TransactionType) -> String {
    let prefix = match kind {
        TransactionType::TopUp => '+',
        TransactionType::Withdrawal => '-',
    };
    let code = currency(currency_id).map_or(FALLBACK_CURRENCY_CODE, |c| c.code);
    format!("{prefix}{:.2} {code}", amount.abs())
}

pub fn status_text(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Completed => "Completed",
        TransactionStatus::Failed => "Declined",
        TransactionStatus::Pending => "Pending",
    }
}

/// `dd/mm/yyyy` for an RFC 3339 timestamp; unparsable input is returned as-is.
pub fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// `dd/mm/yyyy HH:MM AM|PM` in the timestamp's own offset.
pub fn format_date_with_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%d/%m/%Y %H:%M %p").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
