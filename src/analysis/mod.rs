//! Daily aggregation and spike detection.
//!
//! Both stages are pure reductions over the fully classified batch:
//! classified records -> daily aggregates -> baselines -> spikes

pub mod aggregate;
pub mod spikes;

pub use aggregate::*;
pub use spikes::*;
