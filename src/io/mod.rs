//! Input/output helpers.
//!
//! - classified-record CSV export (`export`)

pub mod export;

pub use export::*;
