//! Conversion between polars DataFrames and typed problem tables.
//!
//! Column presence is checked before any row is read, so a malformed frame
//! fails with [`PrepError::MissingColumn`] instead of a half-built table.
//! Numeric columns are cast strictly (`NodeIndex` to Int64, the rest to
//! Float64), which lets integer capacities or costs through unchanged but
//! rejects values that do not parse. A float `NodeIndex` must hold whole
//! numbers.

use polars::prelude::*;

use crate::core::domain::{
    CapacityTable, ConnectionTable, EdgeRecord, NodeRecord, CAPACITY, CAPACITY_COLUMNS,
    CONNECTION_COLUMNS, COST, DISTANCE, END_NODE, NODE_INDEX, NODE_NAME, START_NODE,
};
use crate::core::error::{PrepError, PrepResult};

/// Checks that every column in `required` is present in `df`.
///
/// Reports the first missing column in `required` order.
pub fn validate_columns(df: &DataFrame, required: &[&str]) -> PrepResult<()> {
    for column in required {
        if df.column(column).is_err() {
            return Err(PrepError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Borrows `name` as a string column, rejecting any other dtype.
pub(crate) fn text_column<'a>(df: &'a DataFrame, name: &str) -> PrepResult<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))?;

    if column.dtype() != &DataType::String {
        return Err(PrepError::NonTextColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    Ok(column.str()?)
}

fn cast_column(df: &DataFrame, name: &str, dtype: &DataType) -> PrepResult<Column> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))?;

    column.strict_cast(dtype).map_err(|err| PrepError::InvalidCast {
        column: name.to_string(),
        dtype: dtype.to_string(),
        reason: err.to_string(),
    })
}

/// Casts `name` to Int64, refusing float values with a fractional part or
/// outside the i64 range.
fn index_column(df: &DataFrame, name: &str) -> PrepResult<Column> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))?;

    if column.dtype().is_float() {
        let floats = cast_column(df, name, &DataType::Float64)?;
        for (row, value) in floats.f64()?.into_iter().enumerate() {
            let Some(value) = value else { continue };
            let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&value);
            if value.fract() != 0.0 || !in_range {
                return Err(PrepError::InvalidValue {
                    column: name.to_string(),
                    row,
                    reason: format!("{value} is not an integer index"),
                });
            }
        }
    }

    cast_column(df, name, &DataType::Int64)
}

fn null_value(column: &str, row: usize) -> PrepError {
    PrepError::NullValue {
        column: column.to_string(),
        row,
    }
}

/// Convert a capacity DataFrame (`NodeIndex`, `NodeName`, `Capacity`) to a [`CapacityTable`]
pub fn dataframe_to_capacity(df: &DataFrame) -> PrepResult<CapacityTable> {
    validate_columns(df, &CAPACITY_COLUMNS)?;

    let names = text_column(df, NODE_NAME)?;
    let indices = index_column(df, NODE_INDEX)?;
    let indices = indices.i64()?;
    let capacities = cast_column(df, CAPACITY, &DataType::Float64)?;
    let capacities = capacities.f64()?;

    (0..df.height())
        .map(|row| -> PrepResult<NodeRecord> {
            Ok(NodeRecord {
                index: indices.get(row).ok_or_else(|| null_value(NODE_INDEX, row))?,
                name: names
                    .get(row)
                    .ok_or_else(|| null_value(NODE_NAME, row))?
                    .to_string(),
                capacity: capacities.get(row).ok_or_else(|| null_value(CAPACITY, row))?,
            })
        })
        .collect()
}

/// Convert a connection DataFrame (`StartNode`, `EndNode`, `Distance`, `Cost`)
/// to a [`ConnectionTable`]
pub fn dataframe_to_connections(df: &DataFrame) -> PrepResult<ConnectionTable> {
    validate_columns(df, &CONNECTION_COLUMNS)?;

    let starts = text_column(df, START_NODE)?;
    let ends = text_column(df, END_NODE)?;
    let distances = cast_column(df, DISTANCE, &DataType::Float64)?;
    let distances = distances.f64()?;
    let costs = cast_column(df, COST, &DataType::Float64)?;
    let costs = costs.f64()?;

    (0..df.height())
        .map(|row| -> PrepResult<EdgeRecord> {
            Ok(EdgeRecord {
                start: starts
                    .get(row)
                    .ok_or_else(|| null_value(START_NODE, row))?
                    .to_string(),
                end: ends
                    .get(row)
                    .ok_or_else(|| null_value(END_NODE, row))?
                    .to_string(),
                distance: distances.get(row).ok_or_else(|| null_value(DISTANCE, row))?,
                cost: costs.get(row).ok_or_else(|| null_value(COST, row))?,
            })
        })
        .collect()
}

/// Convert a [`CapacityTable`] to a DataFrame with the canonical capacity columns
pub fn capacity_to_dataframe(table: &CapacityTable) -> PrepResult<DataFrame> {
    let nodes = table.nodes();
    let indices: Vec<i64> = nodes.iter().map(|node| node.index).collect();
    let names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
    let capacities: Vec<f64> = nodes.iter().map(|node| node.capacity).collect();

    let df = DataFrame::new(vec![
        Column::new(NODE_INDEX.into(), indices),
        Column::new(NODE_NAME.into(), names),
        Column::new(CAPACITY.into(), capacities),
    ])?;
    Ok(df)
}

/// Convert a [`ConnectionTable`] to a DataFrame with the canonical connection columns
pub fn connections_to_dataframe(table: &ConnectionTable) -> PrepResult<DataFrame> {
    let edges = table.edges();
    let starts: Vec<&str> = edges.iter().map(|edge| edge.start.as_str()).collect();
    let ends: Vec<&str> = edges.iter().map(|edge| edge.end.as_str()).collect();
    let distances: Vec<f64> = edges.iter().map(|edge| edge.distance).collect();
    let costs: Vec<f64> = edges.iter().map(|edge| edge.cost).collect();

    let df = DataFrame::new(vec![
        Column::new(START_NODE.into(), starts),
        Column::new(END_NODE.into(), ends),
        Column::new(DISTANCE.into(), distances),
        Column::new(COST.into(), costs),
    ])?;
    Ok(df)
}
