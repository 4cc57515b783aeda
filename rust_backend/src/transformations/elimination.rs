use std::collections::HashSet;

use log::{debug, warn};

use crate::core::domain::{CapacityTable, ConnectionTable};

/// Remove providers from the problem.
///
/// Drops every node whose name is in `providers` and every edge with either
/// endpoint in `providers`. Surviving rows keep their relative order. Node
/// indices are left as they were.
///
/// Names that match no node are not an error; they are logged and ignored.
///
/// # Examples
///
/// ```
/// use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
/// use transport_prep::transformations::eliminate_provider;
///
/// let capacity = CapacityTable::new(vec![
///     NodeRecord::new(0, "P1", 10.0),
///     NodeRecord::new(1, "P2", 20.0),
///     NodeRecord::new(2, "C1", 30.0),
/// ]);
/// let connections = ConnectionTable::new(vec![
///     EdgeRecord::new("P1", "C1", 5.0, 1.0),
///     EdgeRecord::new("P2", "C1", 7.0, 2.0),
/// ]);
///
/// let (capacity, connections) = eliminate_provider(&capacity, &connections, &["P2"]);
/// assert_eq!(capacity.len(), 2);
/// assert_eq!(connections.len(), 1);
/// ```
pub fn eliminate_provider<S: AsRef<str>>(
    capacity: &CapacityTable,
    connections: &ConnectionTable,
    providers: &[S],
) -> (CapacityTable, ConnectionTable) {
    let excluded: HashSet<&str> = providers.iter().map(|p| p.as_ref()).collect();

    for name in capacity.missing_names(providers) {
        warn!("Provider '{}' not found in capacity table, nothing to eliminate", name);
    }

    let kept_nodes: CapacityTable = capacity
        .nodes()
        .iter()
        .filter(|node| !excluded.contains(node.name.as_str()))
        .cloned()
        .collect();

    let kept_edges: ConnectionTable = connections
        .edges()
        .iter()
        .filter(|edge| {
            !excluded.contains(edge.start.as_str()) && !excluded.contains(edge.end.as_str())
        })
        .cloned()
        .collect();

    debug!(
        "Eliminated {} nodes and {} edges",
        capacity.len() - kept_nodes.len(),
        connections.len() - kept_edges.len()
    );

    (kept_nodes, kept_edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{EdgeRecord, NodeRecord};

    fn sample_tables() -> (CapacityTable, ConnectionTable) {
        let capacity = CapacityTable::new(vec![
            NodeRecord::new(0, "P1", 40.0),
            NodeRecord::new(1, "P2", 60.0),
            NodeRecord::new(2, "C1", 50.0),
            NodeRecord::new(3, "C2", 50.0),
        ]);
        let connections = ConnectionTable::new(vec![
            EdgeRecord::new("P1", "C1", 10.0, 1.0),
            EdgeRecord::new("P1", "C2", 15.0, 1.5),
            EdgeRecord::new("P2", "C1", 20.0, 2.0),
            EdgeRecord::new("P2", "C2", 25.0, 2.5),
        ]);
        (capacity, connections)
    }

    #[test]
    fn test_eliminate_single_provider() {
        let (capacity, connections) = sample_tables();
        let (cap, conn) = eliminate_provider(&capacity, &connections, &["P1"]);

        let names: Vec<&str> = cap.names().collect();
        assert_eq!(names, vec!["P2", "C1", "C2"]);
        assert_eq!(conn.len(), 2);
        assert!(conn.edges().iter().all(|e| !e.touches("P1")));
    }

    #[test]
    fn test_edge_dropped_when_end_matches() {
        let (capacity, connections) = sample_tables();
        let (_, conn) = eliminate_provider(&capacity, &connections, &["C2".to_string()]);

        assert_eq!(
            conn.edges(),
            &[
                EdgeRecord::new("P1", "C1", 10.0, 1.0),
                EdgeRecord::new("P2", "C1", 20.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_indices_are_not_renumbered() {
        let (capacity, connections) = sample_tables();
        let (cap, _) = eliminate_provider(&capacity, &connections, &["P1"]);

        let indices: Vec<i64> = cap.nodes().iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_and_unknown_names_are_no_ops() {
        let (capacity, connections) = sample_tables();

        let none: [&str; 0] = [];
        let (cap, conn) = eliminate_provider(&capacity, &connections, &none);
        assert_eq!(cap, capacity);
        assert_eq!(conn, connections);

        let (cap, conn) = eliminate_provider(&capacity, &connections, &["Nowhere"]);
        assert_eq!(cap, capacity);
        assert_eq!(conn, connections);
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let (capacity, connections) = sample_tables();
        let before = (capacity.clone(), connections.clone());

        let _ = eliminate_provider(&capacity, &connections, &["P1", "P2"]);

        assert_eq!((capacity, connections), before);
    }
}
