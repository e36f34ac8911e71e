//! Feature matrix CSV sink
//!
//! Layout: one header line with the declared column names, then one line
//! per matrix row. No index column.

use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::features::feature_export::domain::FeatureMatrix;

/// Write `matrix` under `columns` to `path`, creating parent directories.
///
/// Caller guarantees `columns.len() == matrix.ncols()`.
pub fn write_feature_csv(path: &Path, columns: &[&str], matrix: &FeatureMatrix) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns)?;
    for row in matrix.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
