use thiserror::Error;

/// Errors surfaced to callers of the client.
///
/// `fetch_article_by_slug` only ever returns [`ClientError::InvalidSlug`];
/// the remaining variants come from listing, commerce and configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Slug was empty after trimming.
    #[error("article slug must not be empty")]
    InvalidSlug,

    /// Product id was empty after trimming.
    #[error("product id must not be empty")]
    InvalidProductId,

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A single upstream request failed.
    #[error(transparent)]
    Upstream(#[from] AttemptFailure),
}

impl From<::config::ConfigError> for ClientError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Why one upstream attempt did not yield a post.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// Request never produced a response (DNS, connect, reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Response carried a non-success HTTP status.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Well-formed response with a GraphQL `errors` array.
    #[error("graphql errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// Body could not be decoded into the expected shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// Query succeeded but no matching post came back.
    #[error("post not found")]
    NotFound,
}

impl AttemptFailure {
    /// True for HTTP 4xx responses, which select the mock placeholder.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status(code) if (400..500).contains(code))
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status(status.as_u16());
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}
