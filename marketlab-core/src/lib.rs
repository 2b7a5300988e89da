//! marketlab-core — data pipeline and analytics for the market dashboard.
//!
//! The crate is organized leaf-first:
//! - [`data`] — CSV ingestion (per-symbol price files, sector mapping),
//!   spreadsheet date conversion, synthetic fallback data
//! - [`store`] — SQLite-backed relational store with full-replace bulk loads
//! - [`dataset`] — the combined price dataset with derived return columns
//! - [`views`] — pure view transforms consumed by the terminal dashboard
//! - [`config`] — externally supplied configuration, never hard-coded

pub mod config;
pub mod data;
pub mod dataset;
pub mod store;
pub mod views;

pub use config::{Config, DataPaths, StoreConfig};
pub use dataset::MarketData;
pub use store::MarketStore;
