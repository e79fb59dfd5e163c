//! clientboard core: client-analytics aggregation behind the dashboard.
//!
//! Pipeline: a ClientSource loads the book, a ClientFilter narrows it,
//! and the aggregation modules (metrics, time_series, segments,
//! rankings) turn the survivors into a DashboardView.

pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod filter;
pub mod generator;
pub mod metrics;
pub mod rankings;
pub mod rng;
pub mod segments;
pub mod source;
pub mod time_series;
pub mod types;
