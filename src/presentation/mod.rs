//! Helpers that turn client results into text for the user.

mod format;
mod messages;

pub use format::{format_amount, format_date, format_date_with_time, status_text};
pub use messages::{
    DEFAULT_MESSAGE, NETWORK_MESSAGE, NOT_FOUND_MESSAGE, SERVER_MESSAGE, TIMEOUT_MESSAGE, UNAUTHORIZED_MESSAGE,
    VALIDATION_MESSAGE, api_error_message, error_message,
};
