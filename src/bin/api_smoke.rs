use clap::Parser;

use feedown_tools::smoke::{self, SmokeConfig};

/// Run the scripted smoke test against a FeedOwn deployment
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Base URL of the deployment under test
    #[arg(long, default_value = smoke::DEFAULT_BASE_URL)]
    base_url: String,
    /// Feed URL used for the add/delete steps
    #[arg(long, default_value = smoke::DEFAULT_FEED_URL)]
    feed_url: String,
}

fn main() {
    let args = Args::parse();
    let config = SmokeConfig {
        base_url: args.base_url,
        feed_url: args.feed_url,
    };
    if let Err(e) = smoke::run(&config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
