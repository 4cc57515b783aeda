//! Structural validation of capacity and connection tables.
//!
//! The transformations in this crate accept structurally odd tables without
//! complaint (an unknown provider is a no-op, a dangling edge is carried
//! along). This module is where those conditions are surfaced, so callers can
//! decide whether to treat them as fatal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::domain::{CapacityTable, ConnectionTable};

/// Number of individual issues reported per category before summarizing.
const MAX_REPORTED: usize = 5;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false; warnings are informational.
///
/// # Examples
///
/// ```
/// use transport_prep::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Duplicate node name: P1".to_string());
/// assert!(!result.is_valid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary counts gathered during validation.
///
/// * `duplicate_names` - rows whose `NodeName` already appeared earlier
/// * `dangling_edges` - edges with at least one endpoint missing from the capacity table
/// * `non_dense_indices` - rows whose `NodeIndex` differs from their position
/// * `negative_capacities` - nodes with capacity below zero
/// * `nan_values` - numeric cells holding NaN
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub duplicate_names: usize,
    pub dangling_edges: usize,
    pub non_dense_indices: usize,
    pub negative_capacities: usize,
    pub nan_values: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for capacity/connection table pairs.
///
/// # Examples
///
/// ```
/// use transport_prep::core::domain::{CapacityTable, ConnectionTable, EdgeRecord, NodeRecord};
/// use transport_prep::preprocessing::validator::TableValidator;
///
/// let capacity = CapacityTable::new(vec![NodeRecord::new(0, "P1", 10.0)]);
/// let connections = ConnectionTable::new(vec![EdgeRecord::new("P1", "Ghost", 1.0, 1.0)]);
///
/// let result = TableValidator::validate(&capacity, &connections);
/// assert!(result.is_valid);
/// assert_eq!(result.stats.dangling_edges, 1);
/// ```
pub struct TableValidator;

impl TableValidator {
    /// Validates a capacity table together with the connections that reference it.
    ///
    /// Duplicate node names are errors. Dangling edges, non-dense indices,
    /// negative capacities and NaN cells are warnings.
    pub fn validate(capacity: &CapacityTable, connections: &ConnectionTable) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.total_nodes = capacity.len();
        result.stats.total_edges = connections.len();

        result.stats.duplicate_names = Self::check_duplicates(capacity, &mut result);
        Self::check_nodes(capacity, &mut result);
        result.stats.dangling_edges = Self::check_edges(capacity, connections, &mut result);

        result
    }

    /// Names in `providers` that match no node in `capacity`, in input order.
    pub fn unmatched_providers<S: AsRef<str>>(
        capacity: &CapacityTable,
        providers: &[S],
    ) -> Vec<String> {
        capacity
            .missing_names(providers)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn check_duplicates(capacity: &CapacityTable, result: &mut ValidationResult) -> usize {
        let mut seen = HashSet::new();
        let mut duplicates = 0;

        for name in capacity.names() {
            if !seen.insert(name) {
                duplicates += 1;
                if duplicates <= MAX_REPORTED {
                    result.add_error(format!("Duplicate node name: {}", name));
                }
            }
        }

        if duplicates > MAX_REPORTED {
            result.add_error(format!(
                "Total duplicate node names: {} (showing first {})",
                duplicates, MAX_REPORTED
            ));
        }

        duplicates
    }

    fn check_nodes(capacity: &CapacityTable, result: &mut ValidationResult) {
        for (position, node) in capacity.nodes().iter().enumerate() {
            if node.index != position as i64 {
                result.stats.non_dense_indices += 1;
            }
            if node.capacity.is_nan() {
                result.stats.nan_values += 1;
                result.add_warning(format!("Node {} has NaN capacity", node.name));
            } else if node.capacity < 0.0 {
                result.stats.negative_capacities += 1;
                result.add_warning(format!(
                    "Node {} has negative capacity: {}",
                    node.name, node.capacity
                ));
            }
        }

        if result.stats.non_dense_indices > 0 {
            result.add_warning(format!(
                "{} rows have a NodeIndex that differs from their position",
                result.stats.non_dense_indices
            ));
        }
    }

    fn check_edges(
        capacity: &CapacityTable,
        connections: &ConnectionTable,
        result: &mut ValidationResult,
    ) -> usize {
        let names: HashSet<&str> = capacity.names().collect();
        let mut dangling = 0;

        for (row, edge) in connections.edges().iter().enumerate() {
            if edge.distance.is_nan() || edge.cost.is_nan() {
                result.stats.nan_values += 1;
                result.add_warning(format!(
                    "Edge {} -> {} (row {}) has a NaN distance or cost",
                    edge.start, edge.end, row
                ));
            }

            let missing: Vec<&str> = [edge.start.as_str(), edge.end.as_str()]
                .into_iter()
                .filter(|endpoint| !names.contains(endpoint))
                .collect();
            if !missing.is_empty() {
                dangling += 1;
                if dangling <= MAX_REPORTED {
                    result.add_warning(format!(
                        "Edge {} -> {} (row {}) references unknown node(s): {}",
                        edge.start,
                        edge.end,
                        row,
                        missing.join(", ")
                    ));
                }
            }
        }

        if dangling > MAX_REPORTED {
            result.add_warning(format!(
                "Total dangling edges: {} (showing first {})",
                dangling, MAX_REPORTED
            ));
        }

        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{EdgeRecord, NodeRecord};

    fn valid_tables() -> (CapacityTable, ConnectionTable) {
        (
            CapacityTable::new(vec![
                NodeRecord::new(0, "P1", 30.0),
                NodeRecord::new(1, "C1", 30.0),
            ]),
            ConnectionTable::new(vec![EdgeRecord::new("P1", "C1", 4.0, 2.0)]),
        )
    }

    #[test]
    fn test_validate_valid_tables() {
        let (capacity, connections) = valid_tables();
        let result = TableValidator::validate(&capacity, &connections);

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.stats.total_nodes, 2);
        assert_eq!(result.stats.total_edges, 1);
    }

    #[test]
    fn test_duplicate_names_are_errors() {
        let capacity = CapacityTable::new(vec![
            NodeRecord::new(0, "P1", 30.0),
            NodeRecord::new(1, "P1", 10.0),
            NodeRecord::new(2, "C1", 40.0),
        ]);
        let result = TableValidator::validate(&capacity, &ConnectionTable::default());

        assert!(!result.is_valid);
        assert_eq!(result.stats.duplicate_names, 1);
        assert_eq!(result.errors, vec!["Duplicate node name: P1".to_string()]);
    }

    #[test]
    fn test_dangling_edges_are_warnings() {
        let (capacity, _) = valid_tables();
        let connections = ConnectionTable::new(vec![
            EdgeRecord::new("P1", "C1", 1.0, 1.0),
            EdgeRecord::new("P9", "C1", 1.0, 1.0),
            EdgeRecord::new("P9", "C9", 1.0, 1.0),
        ]);

        let result = TableValidator::validate(&capacity, &connections);
        assert!(result.is_valid);
        assert_eq!(result.stats.dangling_edges, 2);
        assert!(result.warnings[1].ends_with("P9, C9"));
    }

    #[test]
    fn test_dangling_edge_warnings_are_capped() {
        let (capacity, _) = valid_tables();
        let connections: ConnectionTable = (0..8)
            .map(|i| EdgeRecord::new(format!("X{i}"), "C1", 1.0, 1.0))
            .collect();

        let result = TableValidator::validate(&capacity, &connections);
        assert_eq!(result.stats.dangling_edges, 8);
        assert_eq!(result.warnings.len(), MAX_REPORTED + 1);
    }

    #[test]
    fn test_node_checks() {
        let capacity = CapacityTable::new(vec![
            NodeRecord::new(0, "P1", -5.0),
            NodeRecord::new(4, "C1", f64::NAN),
        ]);
        let result = TableValidator::validate(&capacity, &ConnectionTable::default());

        assert!(result.is_valid);
        assert_eq!(result.stats.negative_capacities, 1);
        assert_eq!(result.stats.nan_values, 1);
        assert_eq!(result.stats.non_dense_indices, 1);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_unmatched_providers() {
        let (capacity, _) = valid_tables();
        let unmatched = TableValidator::unmatched_providers(&capacity, &["P1", "P7", "X"]);
        assert_eq!(unmatched, vec!["P7".to_string(), "X".to_string()]);
    }
}
