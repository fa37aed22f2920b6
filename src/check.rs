use anyhow::Result;
use indicatif::ProgressBar;

use crate::catalog::RecommendedFeed;
use crate::http;
use crate::validate::{FETCH_TIMEOUT, validate_feed};

/// Validates every catalog entry in order, one summary line per feed, and
/// returns whether the whole list passed. An operator diagnostic, not a
/// gate: feeds are fetched one at a time and nothing is retried.
pub fn check_all_feeds(feeds: &[RecommendedFeed]) -> Result<bool> {
    let client = http::http_client(Some(FETCH_TIMEOUT))?;

    println!("Checking {} recommended feeds...\n", feeds.len());

    let pb = ProgressBar::new(feeds.len() as u64);
    let mut invalid = 0usize;
    for feed in feeds {
        pb.set_message(feed.url.to_string());
        let result = validate_feed(&client, feed.url);
        pb.suspend(|| {
            if result.valid {
                let format = result.format.map(|f| f.to_string()).unwrap_or_default();
                println!("  OK   {:<25} {}, {} items", feed.name, format, result.item_count);
            } else {
                let error = result.error.as_deref().unwrap_or("invalid");
                println!("  FAIL {:<25} {}", feed.name, error);
            }
        });
        if !result.valid {
            invalid += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("\n{} valid, {} invalid", feeds.len() - invalid, invalid);
    Ok(invalid == 0)
}

/// Validates one URL and dumps every field of the result.
pub fn test_single_feed(url: &str) -> Result<bool> {
    let client = http::http_client(Some(FETCH_TIMEOUT))?;

    println!("Testing feed: {url}\n");
    let result = validate_feed(&client, url);
    println!("  valid:  {}", result.valid);
    println!(
        "  format: {}",
        result.format.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("  title:  {}", result.title.as_deref().unwrap_or("-"));
    println!("  items:  {}", result.item_count);
    if let Some(error) = &result.error {
        println!("  error:  {error}");
    }
    Ok(result.valid)
}
