use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::consts::MEASUREMENT_COLUMNS;
use crate::error::Result;
use crate::measure::{MeasurementRow, MeasurementTable};

/// Write the measurement table as CSV.
///
/// The header row is always written, so an empty table still produces a
/// well-formed file.
pub fn write_measurements(table: &MeasurementTable, path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(MEASUREMENT_COLUMNS)?;
    for row in table {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a measurement CSV written by [`write_measurements`].
pub fn read_measurements(path: &Path) -> Result<MeasurementTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let rows = rdr
        .deserialize::<MeasurementRow>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(MeasurementTable::from(rows))
}
