use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hashblog_client::config::DEFAULT_CONFIG_FILE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Vertical,
    Json,
}

#[derive(Parser)]
#[command(name = "hb-cli", version, about = "HashBlog content client CLI")]
pub struct Cli {
    /// Defaults file; `HASHBLOG_*` environment variables still take precedence.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one article by slug.
    Article {
        /// Article slug.
        slug: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Vertical)]
        format: OutputFormat,
        /// Print the rendered HTML body as well.
        #[arg(long)]
        with_body: bool,
    },
    /// List articles from the publication.
    List {
        /// Start after this cursor.
        #[arg(long)]
        cursor: Option<String>,
        /// Follow cursors until the last page.
        #[arg(long)]
        all: bool,
        /// Upper bound on pages read with --all.
        #[arg(long, default_value_t = 50)]
        max_pages: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show commerce product metadata.
    Product {
        /// Product id or permalink.
        product_id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Vertical)]
        format: OutputFormat,
    },
}
