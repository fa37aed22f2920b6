use std::collections::HashSet;

use anyhow::Result;

use crate::catalog::RecommendedFeed;
use crate::store::{FeedRow, FeedRowInsert, FeedStore};

/// Upserts the catalog into the store, keyed on URL, then re-reads the table
/// in sort order and prints it for operator verification. Returns how many
/// rows the store reported written.
pub fn sync_feeds(store: &FeedStore, feeds: &[RecommendedFeed]) -> Result<usize> {
    println!("Syncing {} recommended feeds...", feeds.len());

    let written = store.upsert_feeds(&insert_rows(feeds))?;
    println!("Successfully synced {} feeds", written.len());

    println!("\nCurrent recommended feeds in database:");
    println!("{}", "-".repeat(60));
    let all = store.list_feeds_ordered()?;
    for row in &all {
        let status = if row.is_active { "active" } else { "inactive" };
        println!("  [{:2}] {:<25} ({})", row.sort_order, row.name, status);
    }
    println!("{}", "-".repeat(60));
    println!("Total: {} feeds in database", all.len());

    Ok(written.len())
}

/// Soft-retires rows whose URL has been dropped from the catalog. Rows are
/// flagged inactive, never deleted, so ids held elsewhere stay valid.
pub fn deactivate_missing(store: &FeedStore, feeds: &[RecommendedFeed]) -> Result<()> {
    let stale = stale_ids(&store.list_feeds()?, feeds);

    if stale.is_empty() {
        println!("\nNo feeds to deactivate.");
        return Ok(());
    }

    println!("\nDeactivating {} feeds not in current list...", stale.len());
    store.deactivate_by_ids(&stale)?;
    println!("Done.");
    Ok(())
}

fn insert_rows(feeds: &[RecommendedFeed]) -> Vec<FeedRowInsert> {
    feeds
        .iter()
        .enumerate()
        .map(|(idx, feed)| FeedRowInsert {
            name: feed.name.to_string(),
            url: feed.url.to_string(),
            sort_order: idx as i64,
            is_active: true,
        })
        .collect()
}

fn stale_ids(rows: &[FeedRow], feeds: &[RecommendedFeed]) -> Vec<i64> {
    let current_urls: HashSet<&str> = feeds.iter().map(|f| f.url).collect();
    rows.iter()
        .filter(|row| row.is_active && !current_urls.contains(row.url.as_str()))
        .map(|row| row.id)
        .collect()
}
