use anyhow::{Context, Result};
use hashblog_client::{ClientConfig, ContentClient};
use serde::Serialize;

use crate::{cli::OutputFormat, output};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    total: usize,
    has_more: bool,
    end_cursor: Option<&'a str>,
    articles: Vec<hashblog_shared::ArticleSummary>,
}

pub async fn run(
    config: ClientConfig,
    cursor: Option<String>,
    all: bool,
    max_pages: usize,
    format: OutputFormat,
) -> Result<()> {
    let client = ContentClient::new(config).context("failed to build content client")?;

    let (articles, has_more, end_cursor) = if all {
        let articles = client
            .fetch_all_articles(max_pages.max(1))
            .await
            .context("failed to list articles")?;
        (articles, false, None)
    } else {
        let page = client
            .fetch_articles(cursor.as_deref())
            .await
            .context("failed to list articles")?;
        (page.articles, page.has_more, page.end_cursor)
    };

    match format {
        OutputFormat::Json => {
            let listing = ListOutput {
                total: articles.len(),
                has_more,
                end_cursor: end_cursor.as_deref(),
                articles: articles.iter().map(|article| article.summary()).collect(),
            };
            println!("{}", output::to_json(&listing)?);
        },
        OutputFormat::Table | OutputFormat::Vertical => {
            println!("{}", output::render_article_table(&articles));
            if let Some(cursor) = end_cursor.filter(|_| has_more) {
                println!("next page: --cursor {cursor}");
            }
        },
    }
    Ok(())
}
