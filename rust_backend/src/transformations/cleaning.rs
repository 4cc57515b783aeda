use polars::prelude::*;

use crate::core::error::PrepResult;
use crate::parsing::dataframe::text_column;

/// Strip leading and trailing whitespace in string columns.
///
/// Returns a new DataFrame; `df` is left as it was. Only the named columns
/// change, nulls stay null, and column order and row count are preserved.
///
/// # Errors
///
/// - [`PrepError::MissingColumn`](crate::core::PrepError::MissingColumn) if a
///   named column does not exist
/// - [`PrepError::NonTextColumn`](crate::core::PrepError::NonTextColumn) if a
///   named column is not a string column
pub fn strip_columns<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> PrepResult<DataFrame> {
    let mut stripped = df.clone();

    for column in columns {
        let name = column.as_ref();
        let values = text_column(df, name)?;

        let trimmed: StringChunked = values
            .into_iter()
            .map(|value| value.map(str::trim))
            .collect();

        stripped.with_column(trimmed.with_name(name.into()).into_series())?;
    }

    Ok(stripped)
}
