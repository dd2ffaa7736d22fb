use anyhow::{Context, Result};
use hashblog_client::{ClientConfig, ContentClient};

use crate::{cli::OutputFormat, output};

pub async fn run(
    config: ClientConfig,
    slug: &str,
    format: OutputFormat,
    with_body: bool,
) -> Result<()> {
    let client = ContentClient::new(config).context("failed to build content client")?;
    let fetched = client.fetch_article_with_origin(slug).await?;
    if !fetched.origin.is_real() {
        tracing::warn!(slug, origin = output::origin_label(fetched.origin), "served a placeholder");
    }

    match format {
        OutputFormat::Json => println!("{}", output::to_json(fetched.article.as_ref())?),
        OutputFormat::Table | OutputFormat::Vertical => {
            println!("{}", output::render_article_vertical(&fetched.article, fetched.origin));
            if with_body {
                println!("\n{}", fetched.article.content);
            }
        },
    }
    Ok(())
}
