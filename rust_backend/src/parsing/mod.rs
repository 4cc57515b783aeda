//! Bridges between polars DataFrames and typed problem tables.
//!
//! - [`dataframe`]: column validation and DataFrame/table conversions
//!
//! # Example
//!
//! ```no_run
//! use transport_prep::parsing::dataframe::{dataframe_to_capacity, capacity_to_dataframe};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> transport_prep::core::PrepResult<()> {
//! let table = dataframe_to_capacity(&df)?;
//! let back = capacity_to_dataframe(&table)?;
//! assert_eq!(back.height(), df.height());
//! # Ok(())
//! # }
//! ```

pub mod dataframe;


pub use dataframe::{
    capacity_to_dataframe, connections_to_dataframe, dataframe_to_capacity,
    dataframe_to_connections, validate_columns,
};
