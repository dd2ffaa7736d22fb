use std::{collections::HashSet, future::Future};

use hashblog_shared::{Article, ArticlePage};

use crate::{articles::ContentClient, error::ClientError};

/// Accumulated article listing, deduplicated by slug in first-seen order.
#[derive(Debug)]
pub struct ArticleFeed {
    articles: Vec<Article>,
    seen: HashSet<String>,
    end_cursor: Option<String>,
    has_more: bool,
    pages_loaded: usize,
}

impl Default for ArticleFeed {
    /// Same as [`ArticleFeed::new`]: nothing loaded yet, first page pending.
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleFeed {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            seen: HashSet::new(),
            end_cursor: None,
            has_more: true,
            pages_loaded: 0,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Append unseen articles from `page`. Returns how many were added.
    ///
    /// A page that claims more results but hands back no cursor, or the same
    /// cursor again, ends the feed.
    pub fn push_page(&mut self, page: ArticlePage) -> usize {
        let before = self.articles.len();
        for article in page.articles {
            if self.seen.insert(article.slug.clone()) {
                self.articles.push(article);
            }
        }

        let cursor_advanced =
            page.end_cursor.is_some() && page.end_cursor.as_deref() != self.end_cursor();
        self.has_more = page.has_more && cursor_advanced;
        if page.end_cursor.is_some() {
            self.end_cursor = page.end_cursor;
        }
        self.pages_loaded += 1;
        self.articles.len() - before
    }

    /// Fetch and append the next page. A finished feed is left untouched.
    pub async fn load_next(&mut self, client: &ContentClient) -> Result<usize, ClientError> {
        if !self.has_more {
            return Ok(0);
        }
        let page = client.fetch_articles(self.end_cursor()).await?;
        Ok(self.push_page(page))
    }
}

/// Follow `fetch_page` from the first page until the feed ends or
/// `max_pages` pages have been read.
pub async fn collect_all_articles<F, Fut>(
    mut fetch_page: F,
    max_pages: usize,
) -> Result<Vec<Article>, ClientError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ArticlePage, ClientError>>,
{
    let mut feed = ArticleFeed::new();
    while feed.has_more() && feed.pages_loaded() < max_pages {
        let page = fetch_page(feed.end_cursor().map(str::to_string)).await?;
        let added = feed.push_page(page);
        tracing::debug!(added, total = feed.articles().len(), "article page collected");
    }
    Ok(feed.into_articles())
}
