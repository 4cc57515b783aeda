//! Core domain models for transportation problem preprocessing.
//!
//! This module defines the typed node and edge records, the tables that hold
//! them, the supply/demand totals and the crate error type.

pub mod domain;
pub mod error;
pub mod totals;

pub use domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
pub use error::{PrepError, PrepResult};
pub use totals::CapacityTotals;
