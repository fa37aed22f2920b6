use anyhow::{Result, anyhow};

/// Connection settings for the Supabase project backing FeedOwn.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    /// Service role key; bypasses row-level security for write access.
    pub service_role_key: String,
}

impl Config {
    /// Reads the connection settings from the process environment,
    /// optionally seeded from `.env.shared` (the file shared with the web
    /// app) or a plain `.env` in the working directory.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.shared");
        if std::env::var("SUPABASE_URL").is_err() && std::env::var("VITE_SUPABASE_URL").is_err() {
            let _ = dotenvy::dotenv();
        }

        let supabase_url = std::env::var("SUPABASE_URL")
            .or_else(|_| std::env::var("VITE_SUPABASE_URL"))
            .map_err(|_| {
                anyhow!(
                    "SUPABASE_URL or VITE_SUPABASE_URL not found in environment; \
                     set the variable or create a .env.shared file"
                )
            })?;
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").map_err(|_| {
            anyhow!(
                "SUPABASE_SERVICE_ROLE_KEY not found in environment; writing to the \
                 database requires the service role key (Supabase dashboard, Settings > API)"
            )
        })?;

        Ok(Self { supabase_url, service_role_key })
    }
}
