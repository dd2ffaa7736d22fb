use chrono::{DateTime, Utc};
use hashblog_shared::{
    Article, Author, Category, Series, SeriesEntry, Seo, SocialLink, Tag, TocEntry,
    DEFAULT_AUTHOR_NAME, DEFAULT_AUTHOR_USERNAME, DEFAULT_AVATAR, DEFAULT_COVER_IMAGE,
};

use crate::{
    markdown::{estimate_read_minutes, markdown_to_html, plain_excerpt, reading_time_label},
    non_empty,
    tags::{build_tag, slugify},
    upstream::{RawAuthor, RawPost, RawSeries, RawTableOfContents, RawTag, UpstreamPost},
};

const UNTITLED: &str = "Untitled";
const DESCRIPTION_EXCERPT_CHARS: usize = 160;

/// Normalize either upstream shape into a fully populated [`Article`].
///
/// `requested_slug` fills in when the post itself carries no slug; timestamps
/// missing upstream default to `fetched_at`.
pub fn normalize(post: UpstreamPost, requested_slug: &str, fetched_at: DateTime<Utc>) -> Article {
    let post = post.into_raw();
    let RawPost {
        id,
        slug,
        title,
        subtitle,
        brief,
        content,
        cover_image,
        read_time_in_minutes,
        published_at,
        updated_at,
        reaction_count,
        response_count,
        views,
        features,
        author,
        series,
        tags,
        og_meta_data,
        seo,
    } = post;

    let slug = non_empty(slug).unwrap_or_else(|| requested_slug.to_string());
    let id = non_empty(id).unwrap_or_else(|| format!("post-{slug}"));
    let title = non_empty(title).unwrap_or_else(|| UNTITLED.to_string());

    let (html, markdown) = content
        .map(|content| (non_empty(content.html), non_empty(content.markdown)))
        .unwrap_or((None, None));
    let content_markdown = markdown.unwrap_or_default();
    let content = html.unwrap_or_else(|| markdown_to_html(&content_markdown));

    let description = non_empty(brief)
        .or_else(|| {
            Some(plain_excerpt(&content_markdown, DESCRIPTION_EXCERPT_CHARS))
                .filter(|excerpt| !excerpt.is_empty())
        })
        .unwrap_or_default();

    let cover_image = cover_image
        .and_then(|image| non_empty(image.url))
        .unwrap_or_else(|| DEFAULT_COVER_IMAGE.to_string());

    let minutes = read_time_in_minutes
        .filter(|minutes| *minutes > 0)
        .unwrap_or_else(|| estimate_read_minutes(&content_markdown));

    let reaction_count = reaction_count.unwrap_or(0);

    let (table_of_contents, has_audio) = match features {
        Some(features) => (
            features
                .table_of_contents
                .map(normalize_toc)
                .unwrap_or_default(),
            features
                .audio_blog
                .and_then(|audio| audio.is_enabled)
                .unwrap_or(false),
        ),
        None => (Vec::new(), false),
    };

    let seo = seo.unwrap_or_default();
    let seo = Seo {
        title: non_empty(seo.title).unwrap_or_else(|| title.clone()),
        description: non_empty(seo.description).unwrap_or_else(|| description.clone()),
    };
    let og_image = og_meta_data
        .and_then(|meta| non_empty(meta.image))
        .unwrap_or_else(|| cover_image.clone());

    Article {
        id,
        slug,
        title,
        subtitle: non_empty(subtitle).unwrap_or_default(),
        description,
        content,
        content_markdown,
        cover_image,
        published_at: parse_timestamp(published_at.as_deref()).unwrap_or(fetched_at),
        updated_at: parse_timestamp(updated_at.as_deref()).unwrap_or(fetched_at),
        reading_time: reading_time_label(minutes),
        views: views.unwrap_or(0),
        reaction_count,
        likes: reaction_count,
        comment_count: response_count.unwrap_or(0),
        author: author.map(normalize_author).unwrap_or_default(),
        tags: normalize_tags(tags.unwrap_or_default()),
        series: series.and_then(normalize_series),
        category: Category::blog(),
        table_of_contents,
        has_audio,
        seo,
        og_image,
    }
}

fn normalize_author(author: RawAuthor) -> Author {
    if author.is_deactivated.unwrap_or(false) {
        return Author::default();
    }

    let social_links = author
        .social_media_links
        .as_ref()
        .map(|links| {
            links
                .entries()
                .into_iter()
                .filter_map(|(platform, url)| {
                    let url = url.map(str::trim).filter(|url| !url.is_empty())?;
                    Some(SocialLink {
                        platform: platform.to_string(),
                        url: url.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Author {
        name: non_empty(author.name).unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
        username: non_empty(author.username)
            .unwrap_or_else(|| DEFAULT_AUTHOR_USERNAME.to_string()),
        avatar: non_empty(author.profile_picture).unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        bio: author
            .bio
            .as_ref()
            .and_then(|bio| bio.text())
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        tagline: non_empty(author.tagline).unwrap_or_default(),
        social_links,
    }
}

fn normalize_tags(tags: Vec<RawTag>) -> Vec<Tag> {
    tags.into_iter()
        .filter_map(|tag| {
            let name = non_empty(tag.name)?;
            Some(build_tag(&name, tag.slug.as_deref()))
        })
        .collect()
}

fn normalize_series(series: RawSeries) -> Option<Series> {
    let name = non_empty(series.name)?;
    let slug = non_empty(series.slug).unwrap_or_else(|| slugify(&name));
    let articles = series
        .posts
        .map(|posts| {
            posts
                .edges
                .into_iter()
                .filter_map(|edge| {
                    let slug = non_empty(edge.node.slug)?;
                    Some(SeriesEntry {
                        title: non_empty(edge.node.title).unwrap_or_else(|| UNTITLED.to_string()),
                        slug,
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    Some(Series {
        name,
        slug,
        articles,
    })
}

fn normalize_toc(toc: RawTableOfContents) -> Vec<TocEntry> {
    if !toc.is_enabled.unwrap_or(true) {
        return Vec::new();
    }
    toc.items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let title = non_empty(item.title)?;
            let slug = non_empty(item.slug).unwrap_or_else(|| slugify(&title));
            Some(TocEntry {
                id: non_empty(item.id).unwrap_or_else(|| slug.clone()),
                level: item.level.unwrap_or(1),
                slug,
                title,
                parent_id: non_empty(item.parent_id),
            })
        })
        .collect()
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hashblog_shared::DEFAULT_COVER_IMAGE;
    use serde_json::json;

    use super::normalize;
    use crate::{
        tags::tag_color,
        upstream::{RawPost, UpstreamPost},
    };

    fn raw(value: serde_json::Value) -> RawPost {
        serde_json::from_value(value).expect("decode raw post")
    }

    #[test]
    fn empty_post_is_fully_defaulted() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid time");
        let article = normalize(UpstreamPost::Detailed(RawPost::default()), "my-post", now);

        assert_eq!(article.slug, "my-post");
        assert_eq!(article.id, "post-my-post");
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.cover_image, DEFAULT_COVER_IMAGE);
        assert_eq!(article.og_image, DEFAULT_COVER_IMAGE);
        assert_eq!(article.published_at, now);
        assert_eq!(article.updated_at, now);
        assert_eq!(article.reading_time, "1 min read");
        assert_eq!(article.views, 0);
        assert_eq!(article.author.name, "Anonymous");
        assert_eq!(article.category.name, "Blog");
        assert_eq!(article.seo.title, "Untitled");
        assert!(article.series.is_none());
    }

    #[test]
    fn detailed_post_maps_every_field() {
        let post = raw(json!({
            "id": "abc",
            "slug": "rust-tips",
            "title": "Rust Tips",
            "subtitle": "Small things",
            "brief": "Some tips",
            "content": { "html": "<p>hi</p>", "markdown": "hi" },
            "coverImage": { "url": "https://cdn/cover.png" },
            "readTimeInMinutes": 7,
            "publishedAt": "2025-03-01T10:00:00.000Z",
            "updatedAt": "2025-03-02T10:00:00+02:00",
            "reactionCount": 12,
            "responseCount": 3,
            "views": 400,
            "features": {
                "tableOfContents": {
                    "isEnabled": true,
                    "items": [
                        { "id": "h1", "level": 2, "slug": "intro", "title": "Intro", "parentId": null }
                    ]
                },
                "audioBlog": { "isEnabled": true }
            },
            "author": {
                "name": "Ada",
                "username": "ada",
                "profilePicture": "https://cdn/ada.png",
                "bio": { "text": "Hacker" },
                "socialMediaLinks": { "github": "https://github.com/ada", "twitter": "" }
            },
            "series": {
                "name": "Rust Basics",
                "slug": "rust-basics",
                "posts": { "edges": [{ "node": { "title": "Part 1", "slug": "part-1" } }] }
            },
            "tags": [{ "name": "Rust", "slug": "rust" }],
            "seo": { "title": null, "description": "SEO desc" }
        }));
        let article = normalize(UpstreamPost::Detailed(post), "rust-tips", Utc::now());

        assert_eq!(article.id, "abc");
        assert_eq!(article.content, "<p>hi</p>");
        assert_eq!(article.reading_time, "7 min read");
        assert_eq!(article.likes, 12);
        assert_eq!(article.comment_count, 3);
        assert!(article.has_audio);
        assert_eq!(article.table_of_contents.len(), 1);
        assert_eq!(article.table_of_contents[0].parent_id, None);
        assert_eq!(article.author.social_links.len(), 1);
        assert_eq!(article.author.social_links[0].platform, "github");
        assert_eq!(article.author.bio, "Hacker");
        let series = article.series.expect("series present");
        assert_eq!(series.articles[0].slug, "part-1");
        assert_eq!(article.tags[0].color, tag_color("Rust"));
        assert_eq!(article.seo.title, "Rust Tips");
        assert_eq!(article.seo.description, "SEO desc");
        assert_eq!(article.og_image, "https://cdn/cover.png");
        assert_eq!(article.updated_at.to_rfc3339(), "2025-03-02T08:00:00+00:00");
    }

    #[test]
    fn summary_shape_never_mixes_in_detail_fields() {
        let post = raw(json!({
            "slug": "s",
            "title": "T",
            "author": { "name": "Ada", "socialMediaLinks": { "github": "https://github.com/ada" } },
            "series": { "name": "X" },
            "features": { "audioBlog": { "isEnabled": true } }
        }));
        let article = normalize(UpstreamPost::Summary(post), "s", Utc::now());

        assert_eq!(article.author.name, "Ada");
        assert!(article.author.social_links.is_empty());
        assert!(article.series.is_none());
        assert!(!article.has_audio);
        assert!(article.table_of_contents.is_empty());
    }

    #[test]
    fn markdown_only_content_is_rendered_and_summarized() {
        let post = raw(json!({
            "slug": "md",
            "content": { "html": null, "markdown": "# Heading\n\nBody text here." }
        }));
        let article = normalize(UpstreamPost::Summary(post), "md", Utc::now());
        assert!(article.content.contains("<h1>Heading</h1>"));
        assert_eq!(article.description, "Heading Body text here.");
    }

    #[test]
    fn null_tag_slug_is_derived_from_name() {
        let post = raw(json!({ "slug": "p", "tags": [{ "name": "React", "slug": null }, { "name": "" }] }));
        let article = normalize(UpstreamPost::Detailed(post), "p", Utc::now());
        assert_eq!(article.tags.len(), 1);
        assert_eq!(article.tags[0].slug, "react");
    }

    #[test]
    fn null_series_posts_keep_the_series() {
        let post = raw(json!({
            "slug": "real",
            "title": "Real Post",
            "series": { "name": "S", "posts": { "edges": null } }
        }));
        let article = normalize(UpstreamPost::Detailed(post), "real", Utc::now());
        assert_eq!(article.title, "Real Post");
        let series = article.series.expect("series present");
        assert_eq!(series.slug, "s");
        assert!(series.articles.is_empty());
    }

    #[test]
    fn deactivated_author_is_anonymized() {
        let post = raw(json!({ "author": { "name": "Gone", "isDeactivated": true } }));
        let article = normalize(UpstreamPost::Detailed(post), "p", Utc::now());
        assert_eq!(article.author.name, "Anonymous");
    }
}
