use thiserror::Error;

/// Errors produced while exchanging messages with the chat completion API.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request could not be delivered or the server rejected it.
    #[error("chat completion request failed: {0}")]
    Request(String),

    /// The server answered, but the content was not usable.
    #[error("chat completion response was malformed: {0}")]
    Malformed(String),

    /// The request itself was invalid and will not succeed on retry.
    #[error("chat completion request is invalid: {0}")]
    InvalidRequest(String),
}

impl ChatError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChatError::Request(_) | ChatError::Malformed(_))
    }
}

/// Terminal failure of a recommendation strategy.
///
/// Callers get one uniform failure signal: a remote API outage and a
/// persistently malformed response both end up here once the retry budget
/// is spent.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The retry budget ran out; `source` is the last underlying failure.
    #[error("recommendation strategy gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: ChatError,
    },

    /// A failure that retrying cannot fix.
    #[error("recommendation strategy failed: {0}")]
    Fatal(#[from] ChatError),
}

/// The country resolver could not match the input to any known country.
#[derive(Debug, Error)]
#[error("unknown country {input:?}")]
pub struct UnknownCountryError {
    pub input: String,
}

impl UnknownCountryError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Result alias used throughout the strategy layer.
pub type Result<T> = std::result::Result<T, StrategyError>;
