use anyhow::{Context, Result, bail};
use reqwest::blocking::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::http;

const FEEDS_TABLE: &str = "recommended_feeds";

/// Row payload for the batch upsert. The store assigns ids, so inserts
/// carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRowInsert {
    pub name: String,
    pub url: String,
    pub sort_order: i64,
    pub is_active: bool,
}

/// A persisted row of the `recommended_feeds` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedRow {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub sort_order: i64,
    pub is_active: bool,
}

/// Thin client for the `recommended_feeds` table behind Supabase's REST
/// interface (PostgREST).
pub struct FeedStore {
    base_url: String,
    service_key: String,
    client: reqwest::blocking::Client,
}

impl FeedStore {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.supabase_url)
            .with_context(|| format!("invalid Supabase URL: {}", config.supabase_url))?;
        Ok(Self {
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.service_role_key.clone(),
            client: http::http_client(None)?,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, FEEDS_TABLE)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Inserts or updates the given rows in one batch, keyed on `url`.
    /// Returns the written rows as the store now holds them.
    pub fn upsert_feeds(&self, rows: &[FeedRowInsert]) -> Result<Vec<FeedRow>> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .query(&[("on_conflict", "url")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(rows)
            .send()
            .context("upsert request failed")?;
        json_body(response).context("upsert rejected by store")
    }

    /// All rows, ordered by `sort_order`.
    pub fn list_feeds_ordered(&self) -> Result<Vec<FeedRow>> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "sort_order")])
            .send()
            .context("select request failed")?;
        json_body(response).context("select rejected by store")
    }

    /// All rows, in whatever order the store returns them.
    pub fn list_feeds(&self) -> Result<Vec<FeedRow>> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*")])
            .send()
            .context("select request failed")?;
        json_body(response).context("select rejected by store")
    }

    /// Flips `is_active` off for the given row ids in one batch.
    pub fn deactivate_by_ids(&self, ids: &[i64]) -> Result<()> {
        let response = self
            .authed(self.client.patch(self.table_url()))
            .query(&[("id", in_filter(ids).as_str())])
            .json(&serde_json::json!({ "is_active": false }))
            .send()
            .context("update request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("store returned {}: {}", status, body);
        }
        Ok(())
    }
}

fn in_filter(ids: &[i64]) -> String {
    let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("in.({})", joined.join(","))
}

fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        bail!("store returned {}: {}", status, body);
    }
    response.json().context("store returned malformed JSON")
}
