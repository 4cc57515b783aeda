use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use polars::prelude::*;

use crate::core::domain::{CapacityTable, ConnectionTable};
use crate::core::totals::CapacityTotals;
use crate::parsing::dataframe::{
    capacity_to_dataframe, connections_to_dataframe, dataframe_to_capacity,
    dataframe_to_connections,
};
use crate::preprocessing::config::PreprocessConfig;
use crate::preprocessing::validator::{TableValidator, ValidationResult};
use crate::transformations::{
    adjust_imbalance_with, eliminate_provider, strip_columns, BalanceStatus,
};

/// Result of preprocessing operation
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    pub capacity: CapacityTable,
    pub connections: ConnectionTable,
    pub capacity_frame: DataFrame,
    pub connection_frame: DataFrame,
    pub status: BalanceStatus,
    pub validation: ValidationResult,
    pub removed_nodes: usize,
    pub removed_edges: usize,
}

/// Main preprocessing pipeline
///
/// Runs, in order: whitespace stripping, DataFrame conversion, validation,
/// provider elimination and balancing.
pub struct PreprocessPipeline {
    config: PreprocessConfig,
}

impl PreprocessPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: PreprocessConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PreprocessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Process capacity and connection DataFrames into solver-ready tables
    ///
    /// # Arguments
    /// * `capacity` - Frame with `NodeIndex`, `NodeName`, `Capacity`
    /// * `connections` - Frame with `StartNode`, `EndNode`, `Distance`, `Cost`
    /// * `totals` - Supply/demand totals; derived from the tables after
    ///   elimination when `None`
    pub fn process(
        &self,
        capacity: &DataFrame,
        connections: &DataFrame,
        totals: Option<CapacityTotals>,
    ) -> Result<PreprocessResult> {
        // Step 1: Strip text columns
        let capacity = self
            .strip_present(capacity)
            .context("Failed to strip capacity columns")?;
        let connections = self
            .strip_present(connections)
            .context("Failed to strip connection columns")?;

        // Step 2: Convert to typed tables
        let capacity =
            dataframe_to_capacity(&capacity).context("Failed to read capacity table")?;
        let connections =
            dataframe_to_connections(&connections).context("Failed to read connection table")?;

        self.process_tables(&capacity, &connections, totals)
    }

    /// Process already-typed tables
    pub fn process_tables(
        &self,
        capacity: &CapacityTable,
        connections: &ConnectionTable,
        totals: Option<CapacityTotals>,
    ) -> Result<PreprocessResult> {
        info!(
            "Preprocessing problem with {} nodes and {} edges",
            capacity.len(),
            connections.len()
        );

        // Step 3: Validate
        let validation = if self.config.validate {
            self.validate(capacity, connections)?
        } else {
            ValidationResult::new()
        };

        // Step 4: Eliminate excluded providers
        let unmatched =
            TableValidator::unmatched_providers(capacity, &self.config.excluded_providers);
        if self.config.strict && !unmatched.is_empty() {
            bail!("Excluded providers not found: {}", unmatched.join(", "));
        }
        let (capacity_kept, connections_kept) =
            eliminate_provider(capacity, connections, &self.config.excluded_providers);
        let removed_nodes = capacity.len() - capacity_kept.len();
        let removed_edges = connections.len() - connections_kept.len();

        // Step 5: Balance
        let totals = totals
            .unwrap_or_else(|| CapacityTotals::from_tables(&capacity_kept, &connections_kept));
        debug!(
            "Balancing with provider total {} and client total {}",
            totals.provider, totals.client
        );
        let adjusted = adjust_imbalance_with(
            &capacity_kept,
            &connections_kept,
            totals,
            &self.config.balance,
        );

        // Step 6: Back to DataFrames
        let capacity_frame = capacity_to_dataframe(&adjusted.capacity)
            .context("Failed to build capacity DataFrame")?;
        let connection_frame = connections_to_dataframe(&adjusted.connections)
            .context("Failed to build connection DataFrame")?;

        info!("Preprocessing finished: {}", adjusted.status);

        Ok(PreprocessResult {
            capacity: adjusted.capacity,
            connections: adjusted.connections,
            capacity_frame,
            connection_frame,
            status: adjusted.status,
            validation,
            removed_nodes,
            removed_edges,
        })
    }

    fn validate(
        &self,
        capacity: &CapacityTable,
        connections: &ConnectionTable,
    ) -> Result<ValidationResult> {
        let validation = TableValidator::validate(capacity, connections);

        for warning in &validation.warnings {
            warn!("{}", warning);
        }

        if self.config.strict {
            if !validation.is_valid {
                bail!("Table validation failed: {}", validation.errors.join("; "));
            }
            if validation.stats.dangling_edges > 0 {
                bail!(
                    "Connection table has {} dangling edges",
                    validation.stats.dangling_edges
                );
            }
        }

        Ok(validation)
    }

    /// Strip the configured columns that exist in `df`
    fn strip_present(&self, df: &DataFrame) -> Result<DataFrame> {
        let present: Vec<&str> = self
            .config
            .strip_columns
            .iter()
            .map(String::as_str)
            .filter(|name| df.column(name).is_ok())
            .collect();

        Ok(strip_columns(df, &present)?)
    }
}

impl Default for PreprocessPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to preprocess a pair of DataFrames
pub fn preprocess_tables(
    capacity: &DataFrame,
    connections: &DataFrame,
    excluded_providers: &[&str],
    totals: Option<CapacityTotals>,
) -> Result<PreprocessResult> {
    let config =
        PreprocessConfig::default().with_excluded_providers(excluded_providers.iter().copied());

    let pipeline = PreprocessPipeline::with_config(config);
    pipeline.process(capacity, connections, totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_frame() -> DataFrame {
        df!(
            "NodeIndex" => [0i64, 1, 2, 3],
            "NodeName" => [" P1", "P2 ", "C1", " C2 "],
            "Capacity" => [60.0, 40.0, 30.0, 50.0],
        )
        .unwrap()
    }

    fn connection_frame() -> DataFrame {
        df!(
            "StartNode" => ["P1 ", "P1", " P2", "P2"],
            "EndNode" => ["C1", "C2", " C1", "C2 "],
            "Distance" => [10.0, 20.0, 15.0, 5.0],
            "Cost" => [1.0, 2.0, 1.5, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn test_process_strips_and_balances() {
        let pipeline = PreprocessPipeline::new();
        let result = pipeline
            .process(&capacity_frame(), &connection_frame(), None)
            .unwrap();

        assert!(result.validation.is_valid);
        assert!(result.validation.warnings.is_empty());
        assert_eq!(result.status, BalanceStatus::SupplySurplus(20.0));
        assert_eq!(result.capacity.len(), 5);
        assert_eq!(result.connections.len(), 6);
        assert_eq!(result.capacity_frame.height(), 5);
        assert_eq!(result.connection_frame.height(), 6);
        assert!(result.capacity.contains("P1"));
    }

    #[test]
    fn test_process_with_exclusion_and_explicit_totals() {
        let config = PreprocessConfig::default().with_excluded_providers(["P2"]);
        let pipeline = PreprocessPipeline::with_config(config);

        let result = pipeline
            .process(
                &capacity_frame(),
                &connection_frame(),
                Some(CapacityTotals::new(60.0, 80.0)),
            )
            .unwrap();

        assert_eq!(result.removed_nodes, 1);
        assert_eq!(result.removed_edges, 2);
        assert_eq!(result.status, BalanceStatus::DemandSurplus(20.0));
        assert!(!result.capacity.contains("P2"));
        assert!(result.capacity.contains("Prov Add"));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_provider() {
        let config = PreprocessConfig {
            strict: true,
            ..PreprocessConfig::default()
        }
        .with_excluded_providers(["P9"]);

        let err = PreprocessPipeline::with_config(config)
            .process(&capacity_frame(), &connection_frame(), None)
            .unwrap_err();
        assert!(err.to_string().contains("P9"));
    }

    #[test]
    fn test_strict_mode_rejects_duplicate_names() {
        let capacity = df!(
            "NodeIndex" => [0i64, 1, 2],
            "NodeName" => ["P1", "P1 ", "C1"],
            "Capacity" => [60.0, 40.0, 100.0],
        )
        .unwrap();
        let config = PreprocessConfig {
            strict: true,
            ..PreprocessConfig::default()
        };

        let err = PreprocessPipeline::with_config(config)
            .process(&capacity, &connection_frame(), None)
            .unwrap_err();
        assert!(err.to_string().contains("Table validation failed"));
        assert!(err.to_string().contains("P1"));

        let lenient = PreprocessPipeline::new()
            .process(&capacity, &connection_frame(), None)
            .unwrap();
        assert!(!lenient.validation.is_valid);
        assert_eq!(lenient.validation.stats.duplicate_names, 1);
    }

    #[test]
    fn test_lenient_mode_ignores_unknown_provider() {
        let result =
            preprocess_tables(&capacity_frame(), &connection_frame(), &["P9"], None).unwrap();
        assert_eq!(result.removed_nodes, 0);
        assert_eq!(result.removed_edges, 0);
    }

    #[test]
    fn test_missing_column_is_reported_with_context() {
        let capacity = capacity_frame().drop("Capacity").unwrap();

        let err = PreprocessPipeline::new()
            .process(&capacity, &connection_frame(), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to read capacity table");
        assert!(format!("{:#}", err).contains("Missing required column: Capacity"));
    }
}
