use std::time::Duration;

/// Builds the blocking HTTP client shared by both tools. `timeout` caps the
/// whole request; `None` keeps the library default.
pub fn http_client(timeout: Option<Duration>) -> anyhow::Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(format!("feedown-tools/{}", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {}", e))
}
