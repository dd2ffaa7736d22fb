//! Raw CMS response shapes.
//!
//! Everything is optional here; [`crate::normalize`] turns these into fully
//! populated articles.

use serde::{Deserialize, Deserializer};

/// Fields only the detailed query requests. The summary shape never carries
/// them, so they are cleared before normalization.
pub const SUMMARY_OMITTED_FIELDS: &[&str] = &[
    "subtitle",
    "features.tableOfContents",
    "features.audioBlog",
    "author.bio",
    "author.tagline",
    "author.socialMediaLinks",
    "author.isDeactivated",
    "series",
    "ogMetaData",
    "seo",
];

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A post together with the query shape it came from.
#[derive(Debug, Clone)]
pub enum UpstreamPost {
    /// From the slug-filtered detailed query.
    Detailed(RawPost),
    /// From the simplified list query.
    Summary(RawPost),
}

impl UpstreamPost {
    /// The raw post with every field the shape cannot carry cleared.
    pub fn into_raw(self) -> RawPost {
        match self {
            Self::Detailed(post) => post,
            Self::Summary(mut post) => {
                post.clear_detail_fields();
                post
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPost {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub brief: Option<String>,
    pub content: Option<RawContent>,
    pub cover_image: Option<RawImage>,
    pub read_time_in_minutes: Option<u32>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub reaction_count: Option<u64>,
    pub response_count: Option<u64>,
    pub views: Option<u64>,
    pub features: Option<RawFeatures>,
    pub author: Option<RawAuthor>,
    pub series: Option<RawSeries>,
    pub tags: Option<Vec<RawTag>>,
    pub og_meta_data: Option<RawOgMeta>,
    pub seo: Option<RawSeo>,
}

impl RawPost {
    fn clear_detail_fields(&mut self) {
        self.subtitle = None;
        self.features = None;
        self.series = None;
        self.og_meta_data = None;
        self.seo = None;
        if let Some(author) = self.author.as_mut() {
            author.bio = None;
            author.tagline = None;
            author.social_media_links = None;
            author.is_deactivated = None;
        }
    }

    pub fn slug_matches(&self, slug: &str) -> bool {
        self.slug.as_deref().map(str::trim) == Some(slug)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContent {
    pub html: Option<String>,
    pub markdown: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFeatures {
    pub table_of_contents: Option<RawTableOfContents>,
    pub audio_blog: Option<RawToggle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTableOfContents {
    pub is_enabled: Option<bool>,
    pub items: Option<Vec<RawTocItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTocItem {
    pub id: Option<String>,
    pub level: Option<u32>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawToggle {
    pub is_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAuthor {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<RawText>,
    pub tagline: Option<String>,
    pub social_media_links: Option<RawSocialLinks>,
    pub is_deactivated: Option<bool>,
}

/// Bio comes back either as a plain string or as `{ text, html }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Plain(String),
    Rich {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        html: Option<String>,
    },
}

impl RawText {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Plain(value) => Some(value.as_str()),
            Self::Rich {
                text,
                html,
            } => text.as_deref().or(html.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSocialLinks {
    pub website: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub stackoverflow: Option<String>,
}

impl RawSocialLinks {
    /// Platform/url pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("website", self.website.as_deref()),
            ("github", self.github.as_deref()),
            ("twitter", self.twitter.as_deref()),
            ("linkedin", self.linkedin.as_deref()),
            ("youtube", self.youtube.as_deref()),
            ("instagram", self.instagram.as_deref()),
            ("facebook", self.facebook.as_deref()),
            ("stackoverflow", self.stackoverflow.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeries {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub posts: Option<RawSeriesPosts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeriesPosts {
    #[serde(deserialize_with = "null_as_default")]
    pub edges: Vec<RawSeriesEdge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeriesEdge {
    #[serde(deserialize_with = "null_as_default")]
    pub node: RawSeriesNode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeriesNode {
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTag {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOgMeta {
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

// ---- query envelopes ----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostBySlugData {
    pub publication: Option<PublicationPost>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PublicationPost {
    pub post: Option<RawPost>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostsData {
    pub publication: Option<PublicationPosts>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PublicationPosts {
    #[serde(deserialize_with = "null_as_default")]
    pub posts: PostConnection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostConnection {
    #[serde(deserialize_with = "null_as_default")]
    pub edges: Vec<PostEdge>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostEdge {
    #[serde(deserialize_with = "null_as_default")]
    pub node: RawPost,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}
