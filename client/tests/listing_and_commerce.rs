use hashblog_client::{ArticleFeed, ClientConfig, ClientError, CommerceClient, ContentClient};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, body_string_contains, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn node(slug: &str) -> Value {
    json!({
        "node": {
            "id": format!("id-{slug}"),
            "slug": slug,
            "title": slug.to_uppercase(),
            "content": { "markdown": "Some **markdown** body." },
            "author": { "name": "Ada" },
            "tags": [{ "name": "Web Dev", "slug": null }]
        }
    })
}

fn page_body(slugs: &[&str], has_next: bool, cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = slugs.iter().map(|slug| node(slug)).collect();
    json!({
        "data": {
            "publication": {
                "posts": {
                    "edges": edges,
                    "pageInfo": { "hasNextPage": has_next, "endCursor": cursor }
                }
            }
        }
    })
}

async fn mount_page(server: &MockServer, after: Value, body: Value) {
    Mock::given(method("POST"))
        .and(body_string_contains("PostsPage"))
        .and(body_partial_json(json!({ "variables": { "after": after } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_articles_normalizes_one_page() {
    let server = MockServer::start().await;
    mount_page(&server, Value::Null, page_body(&["a", "b"], true, Some("c1"))).await;
    let client = ContentClient::new(ClientConfig::with_endpoint(server.uri())).expect("client");

    let page = client.fetch_articles(None).await.expect("page");

    assert!(page.has_more);
    assert_eq!(page.end_cursor.as_deref(), Some("c1"));
    assert_eq!(page.articles.len(), 2);
    let first = &page.articles[0];
    assert_eq!(first.title, "A");
    assert!(first.content.contains("<strong>markdown</strong>"));
    assert_eq!(first.tags[0].slug, "web-dev");
    assert!(first.series.is_none());
}

#[tokio::test]
async fn fetch_all_articles_follows_cursors_and_dedupes() {
    let server = MockServer::start().await;
    mount_page(&server, Value::Null, page_body(&["a", "b"], true, Some("c1"))).await;
    mount_page(&server, json!("c1"), page_body(&["b", "c"], true, Some("c2"))).await;
    mount_page(&server, json!("c2"), page_body(&["d"], false, None)).await;
    let client = ContentClient::new(ClientConfig::with_endpoint(server.uri())).expect("client");

    let articles = client.fetch_all_articles(10).await.expect("all pages");

    let slugs: Vec<_> = articles.iter().map(|article| article.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn feed_load_next_stops_when_exhausted() {
    let server = MockServer::start().await;
    mount_page(&server, Value::Null, page_body(&["a"], false, Some("c1"))).await;
    let client = ContentClient::new(ClientConfig::with_endpoint(server.uri())).expect("client");

    let mut feed = ArticleFeed::new();
    assert_eq!(feed.load_next(&client).await.expect("first page"), 1);
    assert!(!feed.has_more());
    assert_eq!(feed.load_next(&client).await.expect("no-op"), 0);
    assert_eq!(feed.articles().len(), 1);
}

#[tokio::test]
async fn default_feed_fetches_the_first_page() {
    let server = MockServer::start().await;
    mount_page(&server, Value::Null, page_body(&["a", "b"], false, None)).await;
    let client = ContentClient::new(ClientConfig::with_endpoint(server.uri())).expect("client");

    let mut feed = ArticleFeed::default();
    assert_eq!(feed.load_next(&client).await.expect("first page"), 2);
    assert!(!feed.has_more());
}

#[tokio::test]
async fn listing_errors_surface_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let client = ContentClient::new(ClientConfig::with_endpoint(server.uri())).expect("client");

    let err = client.fetch_articles(None).await.expect_err("must fail");
    assert!(matches!(err, ClientError::Upstream(_)));
}

fn commerce_client(server: &MockServer) -> CommerceClient {
    let config = ClientConfig {
        gumroad_endpoint: server.uri(),
        gumroad_access_token: Some("gum-token".to_string()),
        ..ClientConfig::default()
    };
    CommerceClient::new(&config).expect("commerce client")
}

#[tokio::test]
async fn fetch_product_reads_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ebook"))
        .and(query_param("access_token", "gum-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "product": {
                "id": "ebook",
                "name": "Systems Ebook",
                "description": "Deep dives",
                "price": 2450,
                "currency": "usd",
                "short_url": "https://gum.co/ebook",
                "rating": { "count": 12, "average": 4.5 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = commerce_client(&server)
        .fetch_product("ebook")
        .await
        .expect("product");

    assert_eq!(product.name, "Systems Ebook");
    assert_eq!(product.price, "$24.50");
    assert_eq!(product.price_cents, 2450);
    assert_eq!(product.rating.count, 12);
    assert_eq!(product.url, "https://gum.co/ebook");
}

#[tokio::test]
async fn fetch_product_falls_back_to_configured_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let product = commerce_client(&server)
        .fetch_product("missing")
        .await
        .expect("default product");

    let defaults = ClientConfig::default();
    assert_eq!(product.id, "missing");
    assert_eq!(product.name, defaults.default_product_name);
    assert_eq!(product.price, defaults.default_product_price);
}

#[tokio::test]
async fn empty_product_id_is_rejected() {
    let server = MockServer::start().await;
    let err = commerce_client(&server)
        .fetch_product(" ")
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::InvalidProductId));
}
