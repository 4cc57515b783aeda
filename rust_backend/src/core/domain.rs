//! Domain models for transportation problem tables.
//!
//! A transportation problem is described by two tables: a capacity table with
//! one row per node and a connection table with one row per directed edge.
//! Both are ordered collections of typed records and are treated as values:
//! every transformation in this crate borrows a table and returns a new one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Capacity table column holding the node index.
pub const NODE_INDEX: &str = "NodeIndex";
/// Capacity table column holding the node name.
pub const NODE_NAME: &str = "NodeName";
/// Capacity table column holding the signed supply or demand.
pub const CAPACITY: &str = "Capacity";
/// Connection table column holding the edge origin.
pub const START_NODE: &str = "StartNode";
/// Connection table column holding the edge destination.
pub const END_NODE: &str = "EndNode";
/// Connection table column holding the edge length.
pub const DISTANCE: &str = "Distance";
/// Connection table column holding the edge cost.
pub const COST: &str = "Cost";

/// Columns of a capacity table, in canonical order.
pub const CAPACITY_COLUMNS: [&str; 3] = [NODE_INDEX, NODE_NAME, CAPACITY];
/// Columns of a connection table, in canonical order.
pub const CONNECTION_COLUMNS: [&str; 4] = [START_NODE, END_NODE, DISTANCE, COST];

/// A single node of the problem.
///
/// `capacity` is supply for provider nodes and demand for client nodes. The
/// record itself does not know which role it plays.
///
/// # Examples
///
/// ```
/// use transport_prep::core::domain::NodeRecord;
///
/// let node = NodeRecord::new(0, "Madrid", 120.0);
/// assert_eq!(node.name, "Madrid");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub index: i64,
    pub name: String,
    pub capacity: f64,
}

impl NodeRecord {
    pub fn new(index: i64, name: impl Into<String>, capacity: f64) -> Self {
        Self {
            index,
            name: name.into(),
            capacity,
        }
    }
}

/// A directed edge between two nodes, referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start: String,
    pub end: String,
    pub distance: f64,
    pub cost: f64,
}

impl EdgeRecord {
    pub fn new(start: impl Into<String>, end: impl Into<String>, distance: f64, cost: f64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            distance,
            cost,
        }
    }

    /// Zero-distance, zero-cost edge used to wire a synthetic node.
    pub fn free(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::new(start, end, 0.0, 0.0)
    }

    /// Returns `true` if either endpoint is `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.start == name || self.end == name
    }
}

/// Ordered collection of node records.
///
/// Node names are expected to be unique and indices are maintained by the
/// caller. Neither is enforced here; see
/// [`TableValidator`](crate::preprocessing::TableValidator) for checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityTable {
    nodes: Vec<NodeRecord>,
}

impl CapacityTable {
    pub fn new(nodes: Vec<NodeRecord>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeRecord> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by name.
    pub fn get(&self, name: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.name.as_str())
    }

    /// Index to give a node appended to this table.
    ///
    /// One past the largest index present, so it never collides with an
    /// existing row regardless of row order or earlier eliminations. An
    /// empty table starts at 0. When the largest index is `i64::MAX`, the
    /// smallest non-negative index not in use is returned instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use transport_prep::core::domain::{CapacityTable, NodeRecord};
    ///
    /// let table = CapacityTable::new(vec![
    ///     NodeRecord::new(4, "B", 10.0),
    ///     NodeRecord::new(1, "A", 5.0),
    /// ]);
    /// assert_eq!(table.next_index(), 5);
    /// assert_eq!(CapacityTable::default().next_index(), 0);
    /// ```
    pub fn next_index(&self) -> i64 {
        let Some(max) = self.nodes.iter().map(|node| node.index).max() else {
            return 0;
        };

        max.checked_add(1).unwrap_or_else(|| {
            let used: HashSet<i64> = self.nodes.iter().map(|node| node.index).collect();
            (0..i64::MAX).find(|index| !used.contains(index)).unwrap_or(i64::MIN)
        })
    }

    /// Names from `names` that match no node, in input order.
    pub fn missing_names<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Returns a copy of this table with `node` appended.
    pub fn with_node(&self, node: NodeRecord) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(node);
        Self { nodes }
    }

    /// Returns a copy with leading and trailing whitespace removed from every node name.
    pub fn strip_names(&self) -> Self {
        self.nodes
            .iter()
            .map(|node| NodeRecord {
                name: node.name.trim().to_string(),
                ..node.clone()
            })
            .collect()
    }
}

impl FromIterator<NodeRecord> for CapacityTable {
    fn from_iter<I: IntoIterator<Item = NodeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Ordered collection of directed edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTable {
    edges: Vec<EdgeRecord>,
}

impl ConnectionTable {
    pub fn new(edges: Vec<EdgeRecord>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<EdgeRecord> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Distinct start nodes in order of first appearance.
    pub fn distinct_starts(&self) -> Vec<&str> {
        distinct(self.edges.iter().map(|edge| edge.start.as_str()))
    }

    /// Distinct end nodes in order of first appearance.
    pub fn distinct_ends(&self) -> Vec<&str> {
        distinct(self.edges.iter().map(|edge| edge.end.as_str()))
    }

    /// Returns a copy of this table with `edges` appended.
    pub fn with_edges(&self, edges: impl IntoIterator<Item = EdgeRecord>) -> Self {
        let mut all = self.edges.clone();
        all.extend(edges);
        Self { edges: all }
    }

    /// Returns a copy with whitespace trimmed from both endpoint names.
    pub fn strip_names(&self) -> Self {
        self.edges
            .iter()
            .map(|edge| EdgeRecord {
                start: edge.start.trim().to_string(),
                end: edge.end.trim().to_string(),
                ..edge.clone()
            })
            .collect()
    }
}

impl FromIterator<EdgeRecord> for ConnectionTable {
    fn from_iter<I: IntoIterator<Item = EdgeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}
