//! Preprocessing of capacity and connection tables for transportation problems.
//!
//! The crate removes excluded providers, balances total supply against total
//! demand with a synthetic node, and trims whitespace from text columns. It
//! does not solve the problem.
//!
//! Diagnostics go through the [`log`] facade; installing a logger is left to
//! the application.

pub mod core;
pub mod parsing;
pub mod preprocessing;
pub mod transformations;

pub use crate::core::{
    CapacityTable, CapacityTotals, ConnectionTable, EdgeRecord, NodeRecord, PrepError, PrepResult,
};
pub use crate::preprocessing::{PreprocessConfig, PreprocessPipeline, PreprocessResult};
pub use crate::transformations::{
    adjust_imbalance, eliminate_provider, strip_columns, BalanceAdjustment, BalanceStatus,
};
