use oneinch_types::OrderError;

/// Result type for [`OrderbookClient`] operations.
///
/// [`OrderbookClient`]: crate::client::OrderbookClient
pub type Result<T> = std::result::Result<T, OrderbookError>;

/// Errors returned by the [`OrderbookClient`].
///
/// [`OrderbookClient`]: crate::client::OrderbookClient
#[derive(thiserror::Error, Debug)]
pub enum OrderbookError {
    /// The requested order or event is not known to the service.
    #[error("Order not found")]
    NotFound,
    /// The API key was missing or rejected.
    #[error("Request was not authorized, check the API key")]
    Unauthorized,
    /// The service throttled the request.
    #[error("Rate limited by the order-book service")]
    RateLimited,

    /// The order failed local validation before any request was made.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The service only accepts orders that allow partial and multiple
    /// fills.
    #[error("Orders must allow partial and multiple fills")]
    RestrictedFills,

    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// An error occurred while contacting the order-book service.
    #[error("Error contacting the order-book service: {0}")]
    Reqwest(reqwest::Error),
}

impl From<reqwest::Error> for OrderbookError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(reqwest::StatusCode::NOT_FOUND) => Self::NotFound,
            Some(reqwest::StatusCode::UNAUTHORIZED) => Self::Unauthorized,
            Some(reqwest::StatusCode::TOO_MANY_REQUESTS) => Self::RateLimited,
            _ => Self::Reqwest(err),
        }
    }
}
