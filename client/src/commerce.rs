//! Read-only product metadata from the commerce platform.

use hashblog_shared::{Product, ProductRating};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{config::ClientConfig, error::AttemptFailure, non_empty, ClientError};

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    success: bool,
    product: Option<RawProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProduct {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    formatted_price: Option<String>,
    price: Option<u64>,
    currency: Option<String>,
    short_url: Option<String>,
    rating: Option<RawRating>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRating {
    count: Option<u64>,
    average: Option<f64>,
}

/// Product client; falls back to the configured default product on failure.
#[derive(Clone)]
pub struct CommerceClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
    fallback: Product,
}

impl CommerceClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.gumroad_endpoint.clone(),
            access_token: config.gumroad_access_token.clone(),
            fallback: Product {
                id: String::new(),
                name: config.default_product_name.clone(),
                description: config.default_product_description.clone(),
                price: config.default_product_price.clone(),
                price_cents: 0,
                currency: "usd".to_string(),
                rating: ProductRating::default(),
                url: config.default_product_url.clone(),
            },
        })
    }

    /// Product metadata, or the configured default when the platform is
    /// unreachable or does not know the product.
    pub async fn fetch_product(&self, product_id: &str) -> Result<Product, ClientError> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(ClientError::InvalidProductId);
        }

        match self.request_product(product_id).await {
            Ok(product) => Ok(product),
            Err(failure) => {
                tracing::warn!(product_id, "product lookup failed, using default: {failure}");
                Ok(Product {
                    id: product_id.to_string(),
                    ..self.fallback.clone()
                })
            },
        }
    }

    async fn request_product(&self, product_id: &str) -> Result<Product, AttemptFailure> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|err| AttemptFailure::Transport(format!("invalid endpoint: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| AttemptFailure::Transport("endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["products", product_id]);
        if let Some(token) = self.access_token.as_deref() {
            url.query_pairs_mut().append_pair("access_token", token);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AttemptFailure::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure::Status(status.as_u16()));
        }
        let body: ProductResponse = response
            .json()
            .await
            .map_err(|err| AttemptFailure::Decode(err.to_string()))?;

        let raw = match body.product {
            Some(product) if body.success => product,
            _ => return Err(AttemptFailure::NotFound),
        };
        Ok(self.normalize(product_id, raw))
    }

    fn normalize(&self, product_id: &str, raw: RawProduct) -> Product {
        let fallback = &self.fallback;
        let price_cents = raw.price.unwrap_or(0);
        let price = non_empty(raw.formatted_price).unwrap_or_else(|| {
            if price_cents > 0 {
                format!("${}", format_cents(price_cents))
            } else {
                fallback.price.clone()
            }
        });
        let rating = raw
            .rating
            .map(|rating| ProductRating {
                count: rating.count.unwrap_or(0),
                average: rating.average.unwrap_or(0.0),
            })
            .unwrap_or_default();

        Product {
            id: non_empty(raw.id).unwrap_or_else(|| product_id.to_string()),
            name: non_empty(raw.name).unwrap_or_else(|| fallback.name.clone()),
            description: non_empty(raw.description).unwrap_or_else(|| fallback.description.clone()),
            price,
            price_cents,
            currency: non_empty(raw.currency).unwrap_or_else(|| fallback.currency.clone()),
            rating,
            url: non_empty(raw.short_url).unwrap_or_else(|| fallback.url.clone()),
        }
    }
}

/// `1900` -> `19`, `1950` -> `19.50`.
fn format_cents(cents: u64) -> String {
    let (whole, rest) = (cents / 100, cents % 100);
    if rest == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{rest:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_cents;

    #[test]
    fn format_cents_drops_zero_fraction() {
        assert_eq!(format_cents(1900), "19");
        assert_eq!(format_cents(1950), "19.50");
        assert_eq!(format_cents(5), "0.05");
    }
}
