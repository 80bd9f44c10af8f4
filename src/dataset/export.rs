use std::io::Write;

use crate::error::Result;
use crate::models::JobRecord;

/// Writes `records` as CSV with a header row named after the dataset's JSON keys.
pub fn write_csv<W: Write>(records: &[JobRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv(records: &[JobRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    tracing::debug!("Exported {} job records as CSV", records.len());
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
