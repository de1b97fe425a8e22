use clap::Parser;
use tokio_util::sync::CancellationToken;

use crawl_bound::Crawl;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if args.dynamic {
        println!("Note: dynamic rendering requires a WebDriver server (e.g., ChromeDriver).");
        println!("Use --webdriver-url if not running at {}", args.webdriver_url);
    }

    let request = args.to_request();
    ::log::info!("Starting crawl of {}", request.target_url);

    // Ctrl-C stops admitting new fetches and drains in-flight work
    let cancel = CancellationToken::new();
    let ctrlc_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::info!("Interrupt received, cancelling crawl");
            ctrlc_cancel.cancel();
        }
    });

    let started = std::time::Instant::now();
    let pages = match Crawl::from_request(request).run(cancel).await {
        Ok(pages) => pages,
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Collected {} pages in {:.2} seconds",
        pages.len(),
        started.elapsed().as_secs_f64()
    );

    match &args.output {
        Some(path) => match serde_json::to_string_pretty(&pages) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    ::log::error!("Failed to write {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                println!("Wrote results to {}", path.display());
            }
            Err(e) => {
                ::log::error!("Failed to serialize results: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            for page in &pages {
                println!("{} ({} links)", page.url, page.api_targets.len());
            }
        }
    }
}
