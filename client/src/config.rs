//! Layered client configuration.
//!
//! Precedence, lowest first: hard-coded defaults, the checked-in development
//! defaults file, then `HASHBLOG_*` environment variables.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::{error::ClientError, non_empty};

/// Development defaults file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config/development.toml";
/// Prefix for environment overrides, e.g. `HASHBLOG_API_TOKEN`.
pub const ENV_PREFIX: &str = "HASHBLOG";

const DEFAULT_ENDPOINT: &str = "https://gql.hashnode.com";
const DEFAULT_PUBLICATION_HOST: &str = "hashblog.hashnode.dev";
const DEFAULT_FALLBACK_SCAN_SIZE: usize = 20;
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_CACHE_CAPACITY: usize = 256;
const DEFAULT_GUMROAD_ENDPOINT: &str = "https://api.gumroad.com/v2";
const DEFAULT_PRODUCT_NAME: &str = "The Developer Ebook";
const DEFAULT_PRODUCT_DESCRIPTION: &str = "Hands-on guide collected from the blog.";
const DEFAULT_PRODUCT_PRICE: &str = "$19";
const DEFAULT_PRODUCT_URL: &str = "https://gumroad.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint of the CMS.
    pub endpoint: String,
    /// Publication host the queries are addressed to.
    pub publication_host: String,
    #[serde(default)]
    pub api_token: Option<String>,
    /// How many recent posts the fallback query scans for a slug.
    pub fallback_scan_size: usize,
    /// Listing page size.
    pub page_size: usize,
    pub cache_capacity: usize,
    /// Unset means the HTTP client's own defaults apply.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    pub gumroad_endpoint: String,
    #[serde(default)]
    pub gumroad_access_token: Option<String>,
    pub default_product_name: String,
    pub default_product_description: String,
    pub default_product_price: String,
    pub default_product_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            publication_host: DEFAULT_PUBLICATION_HOST.to_string(),
            api_token: None,
            fallback_scan_size: DEFAULT_FALLBACK_SCAN_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            request_timeout_secs: None,
            gumroad_endpoint: DEFAULT_GUMROAD_ENDPOINT.to_string(),
            gumroad_access_token: None,
            default_product_name: DEFAULT_PRODUCT_NAME.to_string(),
            default_product_description: DEFAULT_PRODUCT_DESCRIPTION.to_string(),
            default_product_price: DEFAULT_PRODUCT_PRICE.to_string(),
            default_product_url: DEFAULT_PRODUCT_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from [`DEFAULT_CONFIG_FILE`] (if present) and the environment.
    pub fn load() -> Result<Self, ClientError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load with `path` as the defaults file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ClientError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("publication_host", defaults.publication_host)?
            .set_default("fallback_scan_size", defaults.fallback_scan_size as u64)?
            .set_default("page_size", defaults.page_size as u64)?
            .set_default("cache_capacity", defaults.cache_capacity as u64)?
            .set_default("gumroad_endpoint", defaults.gumroad_endpoint)?
            .set_default("default_product_name", defaults.default_product_name)?
            .set_default("default_product_description", defaults.default_product_description)?
            .set_default("default_product_price", defaults.default_product_price)?
            .set_default("default_product_url", defaults.default_product_url)?
            .add_source(File::from(PathBuf::from(path)).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        let config = config.normalized();
        config.validate()?;
        tracing::debug!(
            endpoint = %config.endpoint,
            host = %config.publication_host,
            has_token = config.api_token.is_some(),
            "content client config loaded"
        );
        Ok(config)
    }

    /// Same defaults, pointed at another endpoint. Used for local mocks.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn normalized(mut self) -> Self {
        self.endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
        self.publication_host = self.publication_host.trim().to_string();
        self.gumroad_endpoint = self.gumroad_endpoint.trim().trim_end_matches('/').to_string();
        self.api_token = non_empty(self.api_token);
        self.gumroad_access_token = non_empty(self.gumroad_access_token);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        if self.endpoint.is_empty() {
            return Err(ClientError::Config("`endpoint` must not be empty".to_string()));
        }
        if self.publication_host.is_empty() {
            return Err(ClientError::Config("`publication_host` must not be empty".to_string()));
        }
        if self.cache_capacity == 0 {
            return Err(ClientError::Config("`cache_capacity` must be positive".to_string()));
        }
        if self.fallback_scan_size == 0 || self.page_size == 0 {
            return Err(ClientError::Config("page sizes must be positive".to_string()));
        }
        Ok(())
    }
}
