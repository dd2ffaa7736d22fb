use anyhow::{Context, Result};
use hashblog_client::{ClientConfig, CommerceClient};

use crate::{cli::OutputFormat, output};

pub async fn run(config: ClientConfig, product_id: &str, format: OutputFormat) -> Result<()> {
    let client = CommerceClient::new(&config).context("failed to build commerce client")?;
    let product = client.fetch_product(product_id).await?;

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&product)?),
        OutputFormat::Table | OutputFormat::Vertical => {
            println!("{}", output::render_product_vertical(&product));
        },
    }
    Ok(())
}
