use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{config::ClientConfig, error::AttemptFailure, ClientError};

/// Detailed, slug-filtered query.
pub const POST_BY_SLUG_QUERY: &str = r#"
query PostBySlug($host: String!, $slug: String!) {
  publication(host: $host) {
    post(slug: $slug) {
      id
      title
      slug
      subtitle
      brief
      content { html markdown }
      coverImage { url }
      readTimeInMinutes
      publishedAt
      updatedAt
      reactionCount
      responseCount
      views
      features {
        tableOfContents { isEnabled items { id level slug title parentId } }
        audioBlog { isEnabled }
      }
      author {
        name
        username
        profilePicture
        bio { text }
        tagline
        isDeactivated
        socialMediaLinks { website github twitter linkedin youtube instagram facebook stackoverflow }
      }
      series {
        name
        slug
        posts(first: 20) { edges { node { title slug } } }
      }
      tags { name slug logo }
      ogMetaData { image }
      seo { title description }
    }
  }
}
"#;

/// Simplified recent-posts query scanned by slug when the detailed one fails.
pub const RECENT_POSTS_QUERY: &str = r#"
query RecentPosts($host: String!, $first: Int!) {
  publication(host: $host) {
    posts(first: $first) {
      edges {
        node {
          id
          title
          slug
          brief
          content { html markdown }
          coverImage { url }
          readTimeInMinutes
          publishedAt
          updatedAt
          reactionCount
          responseCount
          views
          author { name username profilePicture }
          tags { name slug }
        }
      }
    }
  }
}
"#;

/// Cursor-paged listing query.
pub const POSTS_PAGE_QUERY: &str = r#"
query PostsPage($host: String!, $first: Int!, $after: String) {
  publication(host: $host) {
    posts(first: $first, after: $after) {
      edges {
        node {
          id
          title
          slug
          brief
          content { markdown }
          coverImage { url }
          readTimeInMinutes
          publishedAt
          updatedAt
          reactionCount
          responseCount
          views
          author { name username profilePicture }
          tags { name slug }
        }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

/// Thin GraphQL-over-HTTP transport.
#[derive(Clone)]
pub struct GraphqlTransport {
    client: Client,
    endpoint: String,
}

impl GraphqlTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.api_token.as_deref() {
            let value = HeaderValue::from_str(token)
                .map_err(|_| ClientError::Config("api token is not a valid header".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Run one query. Any transport, status, decode or GraphQL-level problem
    /// comes back as an [`AttemptFailure`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, AttemptFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest {
                query,
                variables,
            })
            .send()
            .await
            .map_err(AttemptFailure::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure::Status(status.as_u16()));
        }

        let body: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|err| AttemptFailure::Decode(err.to_string()))?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            return Err(AttemptFailure::Graphql(
                errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        body.data
            .ok_or_else(|| AttemptFailure::Decode("response carried no data".to_string()))
    }
}
