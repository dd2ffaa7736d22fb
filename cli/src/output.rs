use hashblog_client::ArticleOrigin;
use hashblog_shared::{Article, Product};
use serde::Serialize;

const TITLE_WIDTH: usize = 48;

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn origin_label(origin: ArticleOrigin) -> &'static str {
    match origin {
        ArticleOrigin::Cache => "cache",
        ArticleOrigin::Primary => "cms (detailed)",
        ArticleOrigin::Fallback => "cms (recent posts)",
        ArticleOrigin::Mock => "mock placeholder",
        ArticleOrigin::Unavailable => "unavailable placeholder",
    }
}

/// One `key: value` line per field.
pub fn render_article_vertical(article: &Article, origin: ArticleOrigin) -> String {
    let tags = article
        .tags
        .iter()
        .map(|tag| format!("{} ({})", tag.name, tag.color))
        .collect::<Vec<_>>()
        .join(", ");
    let series = article
        .series
        .as_ref()
        .map(|series| format!("{} ({} parts)", series.name, series.articles.len()))
        .unwrap_or_else(|| "-".to_string());

    let rows = [
        ("source", origin_label(origin).to_string()),
        ("slug", article.slug.clone()),
        ("title", article.title.clone()),
        ("author", format!("{} (@{})", article.author.name, article.author.username)),
        ("published", article.published_at.format("%Y-%m-%d").to_string()),
        ("reading time", article.reading_time.clone()),
        ("views", article.views.to_string()),
        ("likes", article.likes.to_string()),
        ("comments", article.comment_count.to_string()),
        ("tags", if tags.is_empty() { "-".to_string() } else { tags }),
        ("series", series),
        ("cover", article.cover_image.clone()),
        ("description", article.description.clone()),
    ];
    render_rows(&rows)
}

pub fn render_product_vertical(product: &Product) -> String {
    let rows = [
        ("id", product.id.clone()),
        ("name", product.name.clone()),
        ("price", product.price.clone()),
        (
            "rating",
            format!("{:.1} ({} ratings)", product.rating.average, product.rating.count),
        ),
        ("url", product.url.clone()),
        ("description", product.description.clone()),
    ];
    render_rows(&rows)
}

/// Fixed-width table: slug, title, date, reading time.
pub fn render_article_table(articles: &[Article]) -> String {
    let slug_width = articles
        .iter()
        .map(|article| article.slug.chars().count())
        .max()
        .unwrap_or(0)
        .max("slug".len());

    let header = format!(
        "{:<slug_width$}  {:<TITLE_WIDTH$}  {:<10}  {}",
        "slug", "title", "published", "reading time"
    );
    let mut lines = Vec::with_capacity(articles.len() + 2);
    lines.push(header);
    lines.extend(articles.iter().map(|article| {
        format!(
            "{:<slug_width$}  {:<TITLE_WIDTH$}  {:<10}  {}",
            article.slug,
            truncate(&article.title, TITLE_WIDTH),
            article.published_at.format("%Y-%m-%d"),
            article.reading_time
        )
    }));
    lines.push(format!("{} article(s)", articles.len()));
    lines.join("\n")
}

fn render_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{key:>width$}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
