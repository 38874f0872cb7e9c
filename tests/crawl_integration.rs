use parking_lot::RwLock;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopcrawler::core::{CrawlEngine, CrawlResult, CrawlSession};
use shopcrawler::fetch::HttpFetcher;
use shopcrawler::sink::{FileSink, ResultSink};

#[derive(Clone, Default)]
struct VecSink {
    urls: Arc<RwLock<Vec<String>>>,
}

impl ResultSink for VecSink {
    fn record(&self, product_url: &str) -> CrawlResult<()> {
        self.urls.write().push(product_url.to_string());
        Ok(())
    }
}

async fn shop_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a href="/p/1">Product one</a>
                <a href="/category/shirts">Shirts</a>
                <a href="/about">About</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Product one</h1></body></html>"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/category/shirts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a href="/p/2">Product two</a>
                <a href="/broken">Broken</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Product two</h1></body></html>"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn http_crawl_discovers_products_over_the_wire() {
    let server = shop_server().await;
    let seed = format!("{}/", server.uri());

    let sink = VecSink::default();
    let session = Arc::new(CrawlSession::new(&seed, 2));

    let engine = CrawlEngine::new(Box::new(HttpFetcher::new().unwrap()), Arc::new(sink.clone()));
    engine.run(Arc::clone(&session)).await.unwrap();

    let mut recorded = sink.urls.read().clone();
    recorded.sort();
    assert_eq!(
        recorded,
        vec![
            format!("{}/p/1", server.uri()),
            format!("{}/p/2", server.uri()),
        ]
    );

    // /about is excluded, /broken failed; neither shows up as a product, and
    // the failed branch did not abort the crawl.
    assert_eq!(session.status().product_urls, 2);
    assert!(session.status().visited_urls >= 4);
}

#[tokio::test]
async fn file_sink_round_trips_with_the_session() {
    let server = shop_server().await;
    let seed = format!("{}/", server.uri());

    let output = std::env::temp_dir().join(format!(
        "shopcrawler_integration_{}.txt",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&output);

    let sink = Arc::new(FileSink::new(&output).unwrap());
    let session = Arc::new(CrawlSession::new(&seed, 2));

    let engine = CrawlEngine::new(Box::new(HttpFetcher::new().unwrap()), sink.clone());
    engine.run(Arc::clone(&session)).await.unwrap();

    let mut persisted = sink.recorded_urls().unwrap();
    persisted.sort();
    let mut in_session = session.product_urls();
    in_session.sort();
    assert_eq!(persisted, in_session);
    assert_eq!(persisted.len(), 2);

    let _ = std::fs::remove_file(&output);
}
