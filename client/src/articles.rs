use std::{fmt, num::NonZeroUsize, sync::Arc};

use chrono::Utc;
use hashblog_shared::{Article, ArticlePage};
use serde_json::json;

use crate::{
    cache::ArticleCache,
    config::ClientConfig,
    error::{AttemptFailure, ClientError},
    graphql::{GraphqlTransport, POSTS_PAGE_QUERY, POST_BY_SLUG_QUERY, RECENT_POSTS_QUERY},
    normalize::normalize,
    pagination::collect_all_articles,
    placeholder::Placeholder,
    upstream::{PostBySlugData, PostsData, RawPost, UpstreamPost},
};

/// Where a served article came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleOrigin {
    Cache,
    /// Detailed per-slug query.
    Primary,
    /// Simplified recent-posts scan.
    Fallback,
    /// Mock placeholder after a 4xx.
    Mock,
    /// "Article Not Available" placeholder.
    Unavailable,
}

impl ArticleOrigin {
    /// False for the two placeholders.
    pub fn is_real(self) -> bool {
        !matches!(self, Self::Mock | Self::Unavailable)
    }
}

impl From<Placeholder> for ArticleOrigin {
    fn from(placeholder: Placeholder) -> Self {
        match placeholder {
            Placeholder::Mock => Self::Mock,
            Placeholder::Unavailable => Self::Unavailable,
        }
    }
}

/// An article plus the stage that produced it.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub article: Arc<Article>,
    pub origin: ArticleOrigin,
}

#[derive(Debug, Clone, Copy)]
enum Attempt {
    Primary,
    Fallback,
}

impl Attempt {
    const CASCADE: [Attempt; 2] = [Attempt::Primary, Attempt::Fallback];

    fn origin(self) -> ArticleOrigin {
        match self {
            Self::Primary => ArticleOrigin::Primary,
            Self::Fallback => ArticleOrigin::Fallback,
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Article client for the headless CMS.
///
/// Cheap to clone; clones share the HTTP client and the cache.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    config: ClientConfig,
    transport: GraphqlTransport,
    cache: ArticleCache,
}

impl ContentClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.cache_capacity)
            .ok_or_else(|| ClientError::Config("`cache_capacity` must be positive".to_string()))?;
        let transport = GraphqlTransport::new(&config)?;

        Ok(Self {
            inner: Arc::new(ContentClientInner {
                config,
                transport,
                cache: ArticleCache::new(capacity),
            }),
        })
    }

    /// Build from the layered configuration (defaults, file, environment).
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::load()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.inner.cache
    }

    /// Drop one cached article so the next fetch goes back to the CMS.
    pub fn invalidate(&self, slug: &str) -> bool {
        self.inner.cache.invalidate(slug.trim())
    }

    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.inner.cache.len()
    }

    /// Fetch one article. Only an empty slug is an error; every upstream
    /// failure degrades to a placeholder article instead.
    pub async fn fetch_article_by_slug(&self, slug: &str) -> Result<Arc<Article>, ClientError> {
        Ok(self.fetch_article_with_origin(slug).await?.article)
    }

    /// Like [`Self::fetch_article_by_slug`], also reporting which stage
    /// produced the article.
    pub async fn fetch_article_with_origin(
        &self,
        slug: &str,
    ) -> Result<FetchedArticle, ClientError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ClientError::InvalidSlug);
        }

        if let Some(article) = self.inner.cache.get(slug) {
            tracing::debug!(slug, "article cache hit");
            return Ok(FetchedArticle {
                article,
                origin: ArticleOrigin::Cache,
            });
        }

        let gate = self.inner.cache.gate(slug);
        let _held = gate.lock().await;
        // Another caller may have filled the entry while we waited.
        let fetched = match self.inner.cache.get(slug) {
            Some(article) => FetchedArticle {
                article,
                origin: ArticleOrigin::Cache,
            },
            None => self.resolve(slug).await,
        };

        Ok(fetched)
    }

    async fn resolve(&self, slug: &str) -> FetchedArticle {
        let mut failures = Vec::with_capacity(Attempt::CASCADE.len());

        for attempt in Attempt::CASCADE {
            tracing::info!(slug, %attempt, "fetching article");
            match self.run_attempt(attempt, slug).await {
                Ok(post) => {
                    let article = Arc::new(normalize(post, slug, Utc::now()));
                    self.inner.cache.insert(slug, article.clone());
                    tracing::info!(slug, %attempt, "article served from cms");
                    return FetchedArticle {
                        article,
                        origin: attempt.origin(),
                    };
                },
                Err(failure) => {
                    tracing::warn!(slug, %attempt, "article attempt failed: {failure}");
                    failures.push(failure);
                },
            }
        }

        let placeholder = Placeholder::for_failures(&failures);
        tracing::warn!(slug, ?placeholder, "all article attempts failed, serving placeholder");
        FetchedArticle {
            article: Arc::new(placeholder.build(slug, Utc::now())),
            origin: placeholder.into(),
        }
    }

    async fn run_attempt(
        &self,
        attempt: Attempt,
        slug: &str,
    ) -> Result<UpstreamPost, AttemptFailure> {
        match attempt {
            Attempt::Primary => self.fetch_detailed(slug).await.map(UpstreamPost::Detailed),
            Attempt::Fallback => self.scan_recent(slug).await.map(UpstreamPost::Summary),
        }
    }

    async fn fetch_detailed(&self, slug: &str) -> Result<RawPost, AttemptFailure> {
        let data: PostBySlugData = self
            .inner
            .transport
            .execute(
                POST_BY_SLUG_QUERY,
                json!({
                    "host": self.inner.config.publication_host,
                    "slug": slug,
                }),
            )
            .await?;

        data.publication
            .and_then(|publication| publication.post)
            .ok_or(AttemptFailure::NotFound)
    }

    async fn scan_recent(&self, slug: &str) -> Result<RawPost, AttemptFailure> {
        let data: PostsData = self
            .inner
            .transport
            .execute(
                RECENT_POSTS_QUERY,
                json!({
                    "host": self.inner.config.publication_host,
                    "first": self.inner.config.fallback_scan_size,
                }),
            )
            .await?;

        let posts = data.publication.map(|publication| publication.posts.edges);
        posts
            .unwrap_or_default()
            .into_iter()
            .map(|edge| edge.node)
            .find(|post| post.slug_matches(slug))
            .ok_or(AttemptFailure::NotFound)
    }

    /// One listing page, newest first as the CMS orders it.
    pub async fn fetch_articles(&self, cursor: Option<&str>) -> Result<ArticlePage, ClientError> {
        let data: PostsData = self
            .inner
            .transport
            .execute(
                POSTS_PAGE_QUERY,
                json!({
                    "host": self.inner.config.publication_host,
                    "first": self.inner.config.page_size,
                    "after": cursor,
                }),
            )
            .await?;

        let connection = data
            .publication
            .map(|publication| publication.posts)
            .ok_or(AttemptFailure::NotFound)?;
        let fetched_at = Utc::now();
        let articles = connection
            .edges
            .into_iter()
            .filter_map(|edge| {
                let slug = edge
                    .node
                    .slug
                    .as_deref()
                    .map(str::trim)
                    .filter(|slug| !slug.is_empty())?
                    .to_string();
                Some(normalize(UpstreamPost::Summary(edge.node), &slug, fetched_at))
            })
            .collect::<Vec<_>>();
        let (has_more, end_cursor) = connection
            .page_info
            .map(|info| (info.has_next_page, info.end_cursor))
            .unwrap_or((false, None));

        tracing::info!(count = articles.len(), has_more, "fetched article page");
        Ok(ArticlePage {
            articles,
            has_more,
            end_cursor,
        })
    }

    /// Follow cursors until the CMS reports no more pages or `max_pages` is hit.
    pub async fn fetch_all_articles(&self, max_pages: usize) -> Result<Vec<Article>, ClientError> {
        collect_all_articles(
            |cursor| {
                let client = self.clone();
                async move { client.fetch_articles(cursor.as_deref()).await }
            },
            max_pages,
        )
        .await
    }
}
