//! Benchmarks for shelf-cache lookup paths

use async_trait::async_trait;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use shelf_cache::{
    BookCache, BookRecord, CacheConfig, CatalogSource, Result, SearchCache, SearchResultPage,
};
use std::hint::black_box;
use tokio::runtime::Runtime;

/// Upstream that answers instantly, so only cache overhead is measured
struct InstantSource;

#[async_trait]
impl CatalogSource for InstantSource {
    async fn fetch_book_by_id(&self, book_id: &str) -> Result<Option<BookRecord>> {
        Ok(Some(BookRecord {
            book_id: book_id.to_string(),
            title: "Dune".to_string(),
            subtitle: None,
            authors: vec!["Frank Herbert".to_string()],
            description: Some("x".repeat(1024)),
            isbns: vec!["0441013597".to_string()],
            publish_date: Some("1965".to_string()),
            covers: None,
        }))
    }

    async fn fetch_book_by_isbn(&self, _isbn: &str) -> Result<Option<BookRecord>> {
        Ok(None)
    }

    async fn search(&self, _keywords: &str, offset: u32, _limit: u32) -> Result<SearchResultPage> {
        Ok(SearchResultPage::empty(offset))
    }
}

fn bench_book_cache(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = BookCache::with_config(InstantSource, CacheConfig::default());

    // Pre-populate
    rt.block_on(async {
        cache.get_by_id("OL1M").await.unwrap();
    });

    let mut group = c.benchmark_group("book_cache");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = cache.get_by_id(black_box("OL1M")).await.unwrap();
                black_box(result);
            });
        });
    });

    group.bench_function("miss_then_clear", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = cache.get_by_id(black_box("OL2M")).await.unwrap();
                black_box(result);
            });
            cache.clear_cache();
        });
    });

    group.finish();
}

fn bench_search_cache(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = SearchCache::new(InstantSource);

    rt.block_on(async {
        cache.search("lord of the rings", 0, 10).await.unwrap();
    });

    let mut group = c.benchmark_group("search_cache");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                let page = cache
                    .search(black_box("lord of the rings"), 0, 10)
                    .await
                    .unwrap();
                black_box(page);
            });
        });
    });

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = BookCache::new(InstantSource);

    rt.block_on(async {
        for i in 0..10_000 {
            cache.get_by_id(&format!("OL{i}M")).await.unwrap();
        }
    });

    let mut group = c.benchmark_group("sweep");
    group.throughput(Throughput::Elements(10_000));

    // Nothing is expired, so every sweep scans the full map
    group.bench_function("scan_10k_fresh", |b| {
        b.iter(|| black_box(cache.sweep()));
    });

    group.finish();
}

criterion_group!(benches, bench_book_cache, bench_search_cache, bench_sweep);
criterion_main!(benches);
