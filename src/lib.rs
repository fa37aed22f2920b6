//! Operational tools for the FeedOwn RSS service.
//!
//! Two independent command-line utilities share this library: `feed-sync`
//! pushes the hand-maintained recommended-feed catalog into the Supabase
//! table (and can validate the catalog's URLs instead), and `api-smoke`
//! drives a fixed request sequence against a live deployment.

pub mod catalog;
pub mod check;
pub mod config;
pub mod http;
pub mod smoke;
pub mod store;
pub mod sync;
pub mod validate;
