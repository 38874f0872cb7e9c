use std::sync::Arc;

use shopcrawler::core::{CrawlConfig, CrawlEngine, CrawlResult, CrawlSession};
use shopcrawler::fetch::HttpFetcher;
use shopcrawler::sink::FileSink;

const DEFAULT_MAX_DEPTH: usize = 10;

#[tokio::main]
async fn main() -> CrawlResult<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(seed_url) = args.next() else {
        eprintln!("Usage: shopcrawler <seed-url> [max-depth] [concurrency]");
        std::process::exit(2);
    };
    let max_depth = args
        .next()
        .and_then(|d| d.parse().ok())
        .unwrap_or(DEFAULT_MAX_DEPTH);
    let concurrency = args.next().and_then(|c| c.parse().ok()).unwrap_or(2);

    let session = Arc::new(CrawlSession::new(&seed_url, max_depth));
    let sink = Arc::new(FileSink::for_seed(&seed_url)?);

    let engine = CrawlEngine::new(Box::new(HttpFetcher::new()?), sink.clone())
        .with_config(CrawlConfig::default().with_concurrency(concurrency));

    // Ctrl-C requests a cooperative stop; in-flight fetches finish, then the
    // crawl winds down.
    let ctrl_c_session = Arc::clone(&session);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_session.cancel();
        }
    });

    engine.run(Arc::clone(&session)).await?;

    engine.stats().print_summary();
    println!(
        "\nStatus: {}",
        serde_json::to_string_pretty(&session.status())?
    );
    println!("Product URLs written to {}", sink.path().display());

    Ok(())
}
