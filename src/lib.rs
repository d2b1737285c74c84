//! `headline-sentiment` library crate.
//!
//! The binary (`sentiment`) is a thin wrapper around this library so that:
//!
//! - the classify/aggregate/spike core is testable without network or processes
//! - headline sources and scorers can be swapped behind their traits
//! - presentation stays out of the analysis modules

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
pub mod sentiment;
