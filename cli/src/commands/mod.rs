pub mod article;
pub mod list;
pub mod product;

use std::path::Path;

use anyhow::{Context, Result};
use hashblog_client::ClientConfig;

use crate::cli::{Cli, Commands};

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    match cli.command {
        Commands::Article {
            slug,
            format,
            with_body,
        } => article::run(config, &slug, format, with_body).await,
        Commands::List {
            cursor,
            all,
            max_pages,
            format,
        } => list::run(config, cursor, all, max_pages, format).await,
        Commands::Product {
            product_id,
            format,
        } => product::run(config, &product_id, format).await,
    }
}

fn load_config(path: &Path) -> Result<ClientConfig> {
    ClientConfig::load_from(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}
