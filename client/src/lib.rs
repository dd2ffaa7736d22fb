//! Article content client for a Hashnode-backed blog.
//!
//! [`ContentClient::fetch_article_by_slug`] always resolves to an article:
//! the detailed query first, then a scan of recent posts, and finally a
//! placeholder when both fail. Real results are cached per slug.

mod articles;
pub mod cache;
pub mod commerce;
pub mod config;
mod error;
pub mod graphql;
pub mod markdown;
pub mod normalize;
pub mod pagination;
pub mod placeholder;
pub mod tags;
pub mod upstream;

pub use articles::{ArticleOrigin, ContentClient, FetchedArticle};
pub use commerce::CommerceClient;
pub use config::ClientConfig;
pub use error::{AttemptFailure, ClientError};
pub use hashblog_shared as model;
pub use pagination::{collect_all_articles, ArticleFeed};

/// Trimmed value, or `None` when missing or blank.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
