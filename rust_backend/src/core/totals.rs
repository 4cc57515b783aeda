//! Aggregate supply and demand of a problem.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{CapacityTable, ConnectionTable};

/// Total provider capacity (supply) and total client capacity (demand).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityTotals {
    pub provider: f64,
    pub client: f64,
}

impl CapacityTotals {
    pub fn new(provider: f64, client: f64) -> Self {
        Self { provider, client }
    }

    /// Derives totals from the tables themselves.
    ///
    /// A node counts as a provider when it starts at least one edge, and as a
    /// client when it only ever ends edges. Nodes with no edges count toward
    /// neither side.
    ///
    /// # Examples
    ///
    /// ```
    /// use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
    /// use transport_prep::core::CapacityTotals;
    ///
    /// let capacity = CapacityTable::new(vec![
    ///     NodeRecord::new(0, "P1", 100.0),
    ///     NodeRecord::new(1, "C1", 60.0),
    /// ]);
    /// let connections = ConnectionTable::new(vec![EdgeRecord::new("P1", "C1", 5.0, 1.0)]);
    ///
    /// let totals = CapacityTotals::from_tables(&capacity, &connections);
    /// assert_eq!(totals, CapacityTotals::new(100.0, 60.0));
    /// ```
    pub fn from_tables(capacity: &CapacityTable, connections: &ConnectionTable) -> Self {
        let starts: HashSet<&str> = connections.edges().iter().map(|e| e.start.as_str()).collect();
        let ends: HashSet<&str> = connections.edges().iter().map(|e| e.end.as_str()).collect();

        let mut totals = Self::new(0.0, 0.0);
        for node in capacity.nodes() {
            if starts.contains(node.name.as_str()) {
                totals.provider += node.capacity;
            } else if ends.contains(node.name.as_str()) {
                totals.client += node.capacity;
            }
        }
        totals
    }

    /// Absolute gap between supply and demand.
    pub fn imbalance(&self) -> f64 {
        (self.provider - self.client).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{EdgeRecord, NodeRecord};

    #[test]
    fn test_isolated_nodes_are_ignored() {
        let capacity = CapacityTable::new(vec![
            NodeRecord::new(0, "P1", 40.0),
            NodeRecord::new(1, "P2", 30.0),
            NodeRecord::new(2, "C1", 50.0),
            NodeRecord::new(3, "Orphan", 999.0),
        ]);
        let connections = ConnectionTable::new(vec![
            EdgeRecord::new("P1", "C1", 1.0, 1.0),
            EdgeRecord::new("P2", "C1", 1.0, 1.0),
        ]);

        let totals = CapacityTotals::from_tables(&capacity, &connections);
        assert_eq!(totals.provider, 70.0);
        assert_eq!(totals.client, 50.0);
        assert_eq!(totals.imbalance(), 20.0);
    }

    #[test]
    fn test_transshipment_node_counts_as_provider() {
        let capacity = CapacityTable::new(vec![
            NodeRecord::new(0, "P1", 10.0),
            NodeRecord::new(1, "Hub", 5.0),
            NodeRecord::new(2, "C1", 15.0),
        ]);
        let connections = ConnectionTable::new(vec![
            EdgeRecord::new("P1", "Hub", 1.0, 1.0),
            EdgeRecord::new("Hub", "C1", 1.0, 1.0),
        ]);

        let totals = CapacityTotals::from_tables(&capacity, &connections);
        assert_eq!(totals, CapacityTotals::new(15.0, 15.0));
    }
}
