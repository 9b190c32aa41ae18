//! Error types for the giveaway client.
//!
//! Two layers of errors live here:
//!
//! - [`GiveawayError`]: internal failures raised while building the client,
//!   reading configuration or touching local storage. Implemented with
//!   `thiserror` and paired with the [`Result`] alias.
//! - [`ApiError`]: the small, closed set of failures a screen can show to the
//!   user. Every state manager stores at most one of these as its visible error.

use thiserror::Error;

/// The main error type for giveaway client operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use giveaway::GiveawayError;
///
/// fn read_storage() -> Result<(), GiveawayError> {
///     Err(GiveawayError::Storage("Failed to read file".to_string()))
/// }
/// assert!(read_storage().is_err());
/// ```
#[derive(Debug, Error)]
pub enum GiveawayError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be built or a request failed outright.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A base URL or endpoint path could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A specialized `Result` type for giveaway client operations.
pub type Result<T> = std::result::Result<T, GiveawayError>;

/// User-facing failure shown by a screen.
///
/// Network and decode failures come straight from the catalog client. `NoData`
/// and `SearchError` are produced by the state managers themselves and must
/// stay distinguishable: the first means the catalog returned nothing, the
/// second means the local search text matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ApiError {
    /// The request URL or query could not be constructed.
    #[error("invalid request")]
    InvalidRequest,

    /// The response body was not valid JSON for the expected model.
    #[error("failed to decode response")]
    DecodeFailed,

    /// The response body was not valid UTF-8.
    #[error("failed to decode response text")]
    StringDecodeFailed,

    /// The server answered with a non-success status code.
    #[error("HTTP error {0}")]
    HttpStatus(u16),

    /// The device is offline or the host could not be reached.
    #[error("no network connection")]
    NoNetwork,

    /// The transport failed in a way that left no usable response.
    #[error("invalid response")]
    InvalidResponse,

    /// The catalog returned an empty or absent payload.
    #[error("no data")]
    NoData,

    /// The catalog has items but none match the current search text.
    #[error("no search results")]
    SearchError,
}

/// Result of a catalog operation as seen by the state managers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Short headline for an error screen.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Something went wrong",
            Self::DecodeFailed | Self::StringDecodeFailed | Self::InvalidResponse => {
                "Unexpected response"
            }
            Self::HttpStatus(_) => "Server error",
            Self::NoNetwork => "No internet connection",
            Self::NoData => "No giveaways",
            Self::SearchError => "No results",
        }
    }

    /// Longer explanation shown under the title.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InvalidRequest => "We couldn't build the request. Please try again.".to_string(),
            Self::DecodeFailed | Self::StringDecodeFailed => {
                "The server sent data we couldn't read.".to_string()
            }
            Self::HttpStatus(code) => {
                format!("The server responded with status {code}. Please try again later.")
            }
            Self::NoNetwork => "Check your connection and try again.".to_string(),
            Self::InvalidResponse => "The server response was incomplete.".to_string(),
            Self::NoData => "There are no active giveaways right now.".to_string(),
            Self::SearchError => "No giveaway matches your search.".to_string(),
        }
    }

    /// Name of the illustration asset for this error.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::NoNetwork => "error_no_network",
            Self::NoData => "error_no_data",
            Self::SearchError => "error_search",
            Self::HttpStatus(_) => "error_server",
            Self::InvalidRequest
            | Self::DecodeFailed
            | Self::StringDecodeFailed
            | Self::InvalidResponse => "error_generic",
        }
    }

    /// Whether a retry button makes sense.
    ///
    /// Decode failures and empty results would reproduce the same outcome, so
    /// they are not retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NoNetwork | Self::HttpStatus(_) | Self::InvalidRequest)
    }
}
