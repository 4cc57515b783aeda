//! Supply/demand balancing with a synthetic node.
//!
//! A transportation problem is only solvable when total supply equals total
//! demand. When it does not, one artificial node absorbs the surplus (a
//! client) or delivers the shortfall (a provider), connected to the existing
//! network through free edges.

use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
use crate::core::totals::CapacityTotals;

/// Default name of the artificial client that absorbs surplus supply.
pub const SYNTHETIC_CLIENT: &str = "Cliente Add";
/// Default name of the artificial provider that covers surplus demand.
pub const SYNTHETIC_PROVIDER: &str = "Prov Add";

/// Names used for synthetic nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    #[serde(default = "default_client_node_name")]
    pub client_node_name: String,
    #[serde(default = "default_provider_node_name")]
    pub provider_node_name: String,
}

fn default_client_node_name() -> String {
    SYNTHETIC_CLIENT.to_string()
}

fn default_provider_node_name() -> String {
    SYNTHETIC_PROVIDER.to_string()
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            client_node_name: default_client_node_name(),
            provider_node_name: default_provider_node_name(),
        }
    }
}

/// Which imbalance case was found, with the absolute gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BalanceStatus {
    Balanced,
    /// Supply exceeded demand; a synthetic client was added.
    SupplySurplus(f64),
    /// Demand exceeded supply; a synthetic provider was added.
    DemandSurplus(f64),
}

impl BalanceStatus {
    pub fn is_balanced(&self) -> bool {
        matches!(self, BalanceStatus::Balanced)
    }

    /// Capacity given to the synthetic node, zero when balanced.
    pub fn amount(&self) -> f64 {
        match self {
            BalanceStatus::Balanced => 0.0,
            BalanceStatus::SupplySurplus(amount) | BalanceStatus::DemandSurplus(amount) => *amount,
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Balanced => write!(f, "problem is balanced"),
            BalanceStatus::SupplySurplus(amount) => {
                write!(f, "supply exceeds demand by {}", amount)
            }
            BalanceStatus::DemandSurplus(amount) => {
                write!(f, "demand exceeds supply by {}", amount)
            }
        }
    }
}

/// Tables after balancing, together with the case that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceAdjustment {
    pub capacity: CapacityTable,
    pub connections: ConnectionTable,
    pub status: BalanceStatus,
}

/// Balance supply and demand using the default synthetic node names.
///
/// See [`adjust_imbalance_with`].
pub fn adjust_imbalance(
    capacity: &CapacityTable,
    connections: &ConnectionTable,
    total_provider_capacity: f64,
    total_client_capacity: f64,
) -> BalanceAdjustment {
    adjust_imbalance_with(
        capacity,
        connections,
        CapacityTotals::new(total_provider_capacity, total_client_capacity),
        &BalanceConfig::default(),
    )
}

/// Balance supply and demand by appending one synthetic node.
///
/// The totals are trusted as given; they are not recomputed from the
/// `Capacity` column.
///
/// - Supply > demand: a client node with capacity `|supply - demand|` is
///   appended, plus one free edge from every distinct `StartNode` to it.
/// - Demand > supply: a provider node with capacity `|supply - demand|` is
///   appended, plus one free edge from it to every distinct `EndNode`.
/// - Equal: both tables are returned unchanged.
///
/// The synthetic node gets [`CapacityTable::next_index`]. Distinct endpoints
/// are taken in order of first appearance.
///
/// # Examples
///
/// ```
/// use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
/// use transport_prep::core::CapacityTotals;
/// use transport_prep::transformations::{adjust_imbalance_with, BalanceConfig, BalanceStatus};
///
/// let capacity = CapacityTable::new(vec![
///     NodeRecord::new(0, "P1", 100.0),
///     NodeRecord::new(1, "C1", 60.0),
/// ]);
/// let connections = ConnectionTable::new(vec![EdgeRecord::new("P1", "C1", 5.0, 1.0)]);
///
/// let adjusted = adjust_imbalance_with(
///     &capacity,
///     &connections,
///     CapacityTotals::new(100.0, 60.0),
///     &BalanceConfig::default(),
/// );
/// assert_eq!(adjusted.status, BalanceStatus::SupplySurplus(40.0));
/// assert_eq!(adjusted.capacity.len(), 3);
/// ```
pub fn adjust_imbalance_with(
    capacity: &CapacityTable,
    connections: &ConnectionTable,
    totals: CapacityTotals,
    config: &BalanceConfig,
) -> BalanceAdjustment {
    let gap = totals.imbalance();

    if totals.provider > totals.client {
        info!("Problem is imbalanced, the supply is higher than the demand");
        info!(
            "Adding artificial client '{}' that absorbs {} of extra supply",
            config.client_node_name, gap
        );

        let name = config.client_node_name.as_str();
        let node = NodeRecord::new(capacity.next_index(), name, gap);
        let edges: Vec<EdgeRecord> = connections
            .distinct_starts()
            .into_iter()
            .map(|start| EdgeRecord::free(start, name))
            .collect();

        BalanceAdjustment {
            capacity: capacity.with_node(node),
            connections: connections.with_edges(edges),
            status: BalanceStatus::SupplySurplus(gap),
        }
    } else if totals.provider < totals.client {
        info!("Problem is imbalanced, the demand is higher than the supply");
        info!(
            "Adding artificial provider '{}' that delivers {} of missing supply",
            config.provider_node_name, gap
        );

        let name = config.provider_node_name.as_str();
        let node = NodeRecord::new(capacity.next_index(), name, gap);
        let edges: Vec<EdgeRecord> = connections
            .distinct_ends()
            .into_iter()
            .map(|end| EdgeRecord::free(name, end))
            .collect();

        BalanceAdjustment {
            capacity: capacity.with_node(node),
            connections: connections.with_edges(edges),
            status: BalanceStatus::DemandSurplus(gap),
        }
    } else {
        if totals.provider.is_nan() || totals.client.is_nan() {
            warn!(
                "Capacity totals are not comparable (provider={}, client={}), \
                 leaving tables unchanged",
                totals.provider,
                totals.client
            );
        } else {
            info!("Problem is balanced");
        }

        BalanceAdjustment {
            capacity: capacity.clone(),
            connections: connections.clone(),
            status: BalanceStatus::Balanced,
        }
    }
}
