//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - headline inputs and classified outputs (`HeadlineRecord`, `ClassifiedRecord`)
//! - the closed sentiment label set (`SentimentCategory`, `CategoryMap`)
//! - per-day reductions (`DailyAggregate`, `BaselineStats`, `Spike`)

pub mod types;

pub use types::*;
