use clap::Parser;

use feedown_tools::catalog::RECOMMENDED_FEEDS;
use feedown_tools::check;
use feedown_tools::config::Config;
use feedown_tools::store::FeedStore;
use feedown_tools::sync;

/// Sync the recommended-feed catalog to the FeedOwn database
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Validate every catalog URL instead of syncing
    #[arg(long)]
    check: bool,
    /// Validate a single feed URL and exit
    #[arg(long, value_name = "URL", conflicts_with = "check")]
    test: Option<String>,
}

fn main() {
    let args = Args::parse();

    let outcome = if args.check {
        check::check_all_feeds(RECOMMENDED_FEEDS)
    } else if let Some(url) = args.test.as_deref() {
        check::test_single_feed(url)
    } else {
        run_sync().map(|()| true)
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run_sync() -> anyhow::Result<()> {
    println!("{}", "=".repeat(60));
    println!("FeedOwn - Recommended Feeds Sync");
    println!("{}", "=".repeat(60));

    println!("\nConnecting to Supabase...");
    let config = Config::from_env()?;
    let store = FeedStore::new(&config)?;
    println!("Connected!");

    sync::sync_feeds(&store, RECOMMENDED_FEEDS)?;
    sync::deactivate_missing(&store, RECOMMENDED_FEEDS)?;

    println!("\nSync complete!");
    Ok(())
}
