//! Canonical data model shared by the content client and its consumers.
//!
//! Every record here is fully populated once it leaves the client: upstream
//! gaps are replaced with named defaults before construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cover image used when the CMS has none.
pub const DEFAULT_COVER_IMAGE: &str = "/images/default-cover.jpg";
/// Avatar used when the author has no profile picture.
pub const DEFAULT_AVATAR: &str = "/images/default-avatar.png";
/// Author display name used when the CMS omits the author.
pub const DEFAULT_AUTHOR_NAME: &str = "Anonymous";
/// Author handle used when the CMS omits the author.
pub const DEFAULT_AUTHOR_USERNAME: &str = "anonymous";

// 完整文章数据模型
/// A normalized article, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Rendered HTML body.
    pub content: String,
    pub content_markdown: String,
    pub cover_image: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Display string, e.g. `5 min read`.
    pub reading_time: String,
    pub views: u64,
    pub reaction_count: u64,
    /// Mirrors `reaction_count`; kept for templates that read `likes`.
    pub likes: u64,
    pub comment_count: u64,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub series: Option<Series>,
    pub category: Category,
    pub table_of_contents: Vec<TocEntry>,
    pub has_audio: bool,
    pub seo: Seo,
    pub og_image: String,
}

impl Article {
    /// Short form used by listings and series navigation.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            cover_image: self.cover_image.clone(),
            published_at: self.published_at,
            reading_time: self.reading_time.clone(),
            tags: self.tags.clone(),
        }
    }
}

// 列表项（精简版）
/// Listing row derived from an [`Article`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    pub published_at: DateTime<Utc>,
    pub reading_time: String,
    pub tags: Vec<Tag>,
}

/// Author record embedded in every article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub username: String,
    pub avatar: String,
    pub bio: String,
    pub tagline: String,
    /// Only links the author actually filled in, in a fixed platform order.
    pub social_links: Vec<SocialLink>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            username: DEFAULT_AUTHOR_USERNAME.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            bio: String::new(),
            tagline: String::new(),
            social_links: Vec::new(),
        }
    }
}

/// One social profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Tag with a display color derived from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// Category; the CMS has none, so every article lands in [`Category::blog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

impl Category {
    /// The single default category.
    pub fn blog() -> Self {
        Self {
            name: "Blog".to_string(),
            slug: "blog".to_string(),
        }
    }
}

/// Series the article belongs to, with its sibling articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub slug: String,
    pub articles: Vec<SeriesEntry>,
}

/// Sibling article inside a [`Series`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub title: String,
    pub slug: String,
}

/// Table-of-contents heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub id: String,
    pub level: u32,
    pub slug: String,
    pub title: String,
    /// `None` for top-level headings.
    pub parent_id: Option<String>,
}

/// SEO metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
}

/// One page of the article listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub has_more: bool,
    pub end_cursor: Option<String>,
}

/// Commerce product metadata shown by the ebook banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display price, e.g. `$19`.
    pub price: String,
    pub price_cents: u64,
    pub currency: String,
    pub rating: ProductRating,
    pub url: String,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRating {
    pub count: u64,
    pub average: f64,
}
