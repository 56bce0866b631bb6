//! Search post titles through the lazily loaded index

use anyhow::Result;

use crate::search::{ConfiguredSource, IndexSource, SearchHit, SearchIndexLoader};
use crate::Blog;

/// Run each query against one loader, so the index is fetched at most once
pub async fn run_queries<S: IndexSource>(
    loader: &SearchIndexLoader<S>,
    queries: &[String],
) -> Vec<(String, Vec<SearchHit>)> {
    let mut results = Vec::with_capacity(queries.len());
    for query in queries {
        let hits = loader.search(query).await;
        results.push((query.clone(), hits));
    }
    results
}

/// Print the hits of every query
pub async fn run(blog: &Blog, queries: &[String]) -> Result<()> {
    let source = ConfiguredSource::from_blog(blog)?;
    let loader = SearchIndexLoader::new(source).with_max_results(blog.config.search.max_results);

    for (query, hits) in run_queries(&loader, queries).await {
        println!("{} ({} results):", query, hits.len());
        for hit in hits {
            println!("  {} [{}]", hit.title, hit.slug);
        }
    }

    tracing::debug!("Search index fetched {} time(s)", loader.fetch_count());
    Ok(())
}
