//! Stand-in articles served when the CMS cannot produce the real one.

use chrono::{DateTime, Utc};
use hashblog_shared::{Article, Author, Category, Seo, DEFAULT_AVATAR, DEFAULT_COVER_IMAGE};

use crate::{
    error::AttemptFailure,
    markdown::{markdown_to_html, reading_time_label},
    tags::{build_tag, titleize},
};

/// Exact title of the unavailable placeholder.
pub const UNAVAILABLE_TITLE: &str = "Article Not Available";

const UNAVAILABLE_BODY: &str = "This article is currently unavailable. It may have been moved \
                                or the content service may be temporarily down. Please try \
                                again later.";

const MOCK_VIEWS: u64 = 1_024;
const MOCK_REACTIONS: u64 = 42;
const MOCK_COMMENTS: u64 = 7;
const MOCK_READ_MINUTES: u32 = 5;

/// Which placeholder a failed cascade resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Plausible article shaped from the slug.
    Mock,
    /// Explicit "not available" notice.
    Unavailable,
}

impl Placeholder {
    /// Any 4xx among the failures selects [`Placeholder::Mock`].
    pub fn for_failures(failures: &[AttemptFailure]) -> Self {
        if failures.iter().any(AttemptFailure::is_client_error) {
            Self::Mock
        } else {
            Self::Unavailable
        }
    }

    pub fn build(self, slug: &str, now: DateTime<Utc>) -> Article {
        match self {
            Self::Mock => mock_article(slug, now),
            Self::Unavailable => unavailable_article(slug, now),
        }
    }
}

/// Article-shaped filler titled after the slug.
pub fn mock_article(slug: &str, now: DateTime<Utc>) -> Article {
    let title = titleize(slug);
    let description = format!("An overview of {title}: key ideas, practical tips and examples.");
    let markdown = format!(
        "# {title}\n\n{description}\n\n## Getting started\n\nEvery topic starts with the \
         fundamentals. This section walks through the core concepts and the vocabulary used in \
         the rest of the article.\n\n## Putting it into practice\n\n- Start small and iterate\n- \
         Measure before optimizing\n- Keep the feedback loop short\n\n## Wrapping up\n\nThanks \
         for reading. More in-depth posts on {title} are on the way.\n"
    );

    Article {
        id: format!("mock-{slug}"),
        slug: slug.to_string(),
        title: title.clone(),
        subtitle: String::new(),
        description: description.clone(),
        content: markdown_to_html(&markdown),
        content_markdown: markdown,
        cover_image: DEFAULT_COVER_IMAGE.to_string(),
        published_at: now,
        updated_at: now,
        reading_time: reading_time_label(MOCK_READ_MINUTES),
        views: MOCK_VIEWS,
        reaction_count: MOCK_REACTIONS,
        likes: MOCK_REACTIONS,
        comment_count: MOCK_COMMENTS,
        author: Author {
            name: "Tech Blogger".to_string(),
            username: "techblogger".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            bio: "Writing about software, tooling and the web.".to_string(),
            tagline: "Software engineer".to_string(),
            social_links: Vec::new(),
        },
        tags: vec![build_tag("Programming", None), build_tag("Web Development", None)],
        series: None,
        category: Category::blog(),
        table_of_contents: Vec::new(),
        has_audio: false,
        seo: Seo {
            title,
            description,
        },
        og_image: DEFAULT_COVER_IMAGE.to_string(),
    }
}

/// Explicit "Article Not Available" notice.
pub fn unavailable_article(slug: &str, now: DateTime<Utc>) -> Article {
    let markdown = format!("# {UNAVAILABLE_TITLE}\n\n{UNAVAILABLE_BODY}\n");

    Article {
        id: format!("unavailable-{slug}"),
        slug: slug.to_string(),
        title: UNAVAILABLE_TITLE.to_string(),
        subtitle: String::new(),
        description: UNAVAILABLE_BODY.to_string(),
        content: markdown_to_html(&markdown),
        content_markdown: markdown,
        cover_image: DEFAULT_COVER_IMAGE.to_string(),
        published_at: now,
        updated_at: now,
        reading_time: reading_time_label(1),
        views: 0,
        reaction_count: 0,
        likes: 0,
        comment_count: 0,
        author: Author::default(),
        tags: Vec::new(),
        series: None,
        category: Category::blog(),
        table_of_contents: Vec::new(),
        has_audio: false,
        seo: Seo {
            title: UNAVAILABLE_TITLE.to_string(),
            description: UNAVAILABLE_BODY.to_string(),
        },
        og_image: DEFAULT_COVER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Placeholder, UNAVAILABLE_TITLE};
    use crate::error::AttemptFailure;

    #[test]
    fn client_error_in_either_attempt_selects_mock() {
        let failures = [AttemptFailure::Status(400), AttemptFailure::NotFound];
        assert_eq!(Placeholder::for_failures(&failures), Placeholder::Mock);
        let failures = [AttemptFailure::Transport("reset".to_string()), AttemptFailure::Status(403)];
        assert_eq!(Placeholder::for_failures(&failures), Placeholder::Mock);
    }

    #[test]
    fn other_failures_select_unavailable() {
        let failures = [AttemptFailure::Status(500), AttemptFailure::NotFound];
        assert_eq!(Placeholder::for_failures(&failures), Placeholder::Unavailable);
        assert_eq!(Placeholder::for_failures(&[]), Placeholder::Unavailable);
    }

    #[test]
    fn mock_is_titled_from_slug() {
        let article = Placeholder::Mock.build("my-great-post", Utc::now());
        assert!(article.title.contains("My Great Post"));
        assert!(article.content.contains("<h2>"));
        assert_eq!(article.likes, article.reaction_count);
    }

    #[test]
    fn unavailable_says_so() {
        let article = Placeholder::Unavailable.build("gone", Utc::now());
        assert_eq!(article.title, UNAVAILABLE_TITLE);
        assert!(article.content.contains("currently unavailable"));
        assert_eq!(article.slug, "gone");
    }
}
