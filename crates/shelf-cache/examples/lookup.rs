//! Search Open Library through the caches and look up the first hit twice
//!
//! ```text
//! RUST_LOG=shelf_cache=debug cargo run -p shelf-cache --example lookup -- dune messiah
//! ```

use std::sync::Arc;

use shelf_cache::prelude::*;
use shelf_cache::{CoverSize, SystemClock};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true))
        .try_init()?;

    let settings = Settings::load()?;
    let client = OpenLibraryClient::new(settings.open_library.clone())?;
    let catalog = Catalog::with_clock_and_metrics(
        Arc::new(client),
        settings.cache.clone(),
        Arc::new(SystemClock),
        Arc::new(TracingMetrics::new().with_service_name("lookup-example")),
    );
    let _sweepers = catalog.spawn_sweepers();

    let keywords = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let keywords = if keywords.trim().is_empty() {
        "the lord of the rings".to_string()
    } else {
        keywords
    };

    let page = catalog.search(&keywords, 0, 5).await?;
    println!(
        "{} matches for {:?}, showing {} ({} skipped)",
        page.num_results,
        keywords,
        page.books.len(),
        page.skipped_books
    );
    for book in &page.books {
        println!(
            "  {} | {} | {}",
            book.book_id,
            book.title,
            book.primary_author().unwrap_or("unknown author")
        );
    }

    // Same page again: served from the search cache
    catalog.search(&keywords, 0, 5).await?;

    if let Some(first) = page.books.first() {
        // Cold, then warm
        catalog.get_by_id(&first.book_id).await?;
        if let Some(book) = catalog.get_by_id(&first.book_id).await? {
            println!(
                "\n{}: cover {}",
                book.title,
                book.cover_url(CoverSize::Medium).unwrap_or("none")
            );
        }
    }

    let stats = catalog.stats();
    println!(
        "\nhits {} / misses {} / hit ratio {:.2}",
        stats.hits,
        stats.misses,
        stats.hit_ratio()
    );

    Ok(())
}
