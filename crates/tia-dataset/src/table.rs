//! CSV access for the local tender snapshot.

use std::path::Path;

use tia_core::{Error, Result};

/// Load every data row of the tender table, header excluded.
///
/// Rows may be ragged; each cell comes back as a plain string. The reader
/// tolerates a UTF-8 byte-order mark, which the scraped snapshots carry.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Dataset(format!("cannot open {}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::Dataset(format!("bad row in {}: {e}", path.display())))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
