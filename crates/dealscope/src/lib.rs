//! Deal scoring and underwriting core for the NJ/PA real-estate
//! investment dashboard.
//!
//! Two independent components share only the vocabulary of "a deal": the
//! scoring engine turns per-ZIP metrics into comparable 0-100 scores under
//! three weighting scenarios, and the underwriting calculator turns deal
//! economics into NOI, cap rate, DSCR, cash-on-cash, and flip metrics.
//! Ingestion, persistence, and the web frontend live behind the
//! [`scoring::MetricsCatalog`] and [`scoring::DealScoreRepository`]
//! boundaries.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
pub mod underwriting;
