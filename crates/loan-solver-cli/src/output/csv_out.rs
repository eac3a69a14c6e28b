use serde_json::Value;
use std::io;

use super::{cells, columns, display_value, result_object, schedule_rows};

/// CSV to stdout. A result with a schedule prints one record per month;
/// anything else prints `field,value` pairs of the scalar result fields.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Err(e) = write_records(&mut wtr, value) {
        eprintln!("failed to write CSV output: {}", e);
    }
    let _ = wtr.flush();
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    if let Some(rows) = schedule_rows(value) {
        let header = columns(rows);
        if header.is_empty() {
            return Ok(());
        }
        wtr.write_record(&header)?;
        for row in rows {
            wtr.write_record(cells(row, &header))?;
        }
        return Ok(());
    }

    wtr.write_record(["field", "value"])?;
    match result_object(value) {
        Some(result) => {
            for (key, val) in result.iter().filter(|(_, v)| !v.is_array()) {
                wtr.write_record([key.as_str(), &display_value(val)])?;
            }
        }
        None => wtr.write_record(["value", &display_value(value)])?,
    }
    Ok(())
}
