//! Table transformations applied before the problem reaches a solver.
//!
//! # Modules
//!
//! - [`elimination`]: Remove providers and every edge touching them
//! - [`balancing`]: Equalize supply and demand with a synthetic node
//! - [`cleaning`]: Strip whitespace from text columns
//!
//! # Example
//!
//! ```
//! use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
//! use transport_prep::transformations::{adjust_imbalance, eliminate_provider, BalanceStatus};
//!
//! let capacity = CapacityTable::new(vec![
//!     NodeRecord::new(0, "P1", 50.0),
//!     NodeRecord::new(1, "P2", 50.0),
//!     NodeRecord::new(2, "C1", 60.0),
//! ]);
//! let connections = ConnectionTable::new(vec![
//!     EdgeRecord::new("P1", "C1", 3.0, 1.0),
//!     EdgeRecord::new("P2", "C1", 4.0, 1.0),
//! ]);
//!
//! let (capacity, connections) = eliminate_provider(&capacity, &connections, &["P2"]);
//! let adjusted = adjust_imbalance(&capacity, &connections, 50.0, 60.0);
//! assert_eq!(adjusted.status, BalanceStatus::DemandSurplus(10.0));
//! ```

pub mod balancing;
pub mod cleaning;
pub mod elimination;


pub use balancing::{
    adjust_imbalance, adjust_imbalance_with, BalanceAdjustment, BalanceConfig, BalanceStatus,
    SYNTHETIC_CLIENT, SYNTHETIC_PROVIDER,
};
pub use cleaning::strip_columns;
pub use elimination::eliminate_provider;
