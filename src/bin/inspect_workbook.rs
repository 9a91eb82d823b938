//! Inspect a services workbook: print sheet names, the Data sheet header, and
//! per-service record counts after validation.
//! Usage: cargo run --bin inspect_workbook -- path/to/Services_2_Calculator.xlsx

use std::collections::BTreeMap;
use std::path::Path;

use calamine::Reader;

use cityplan::data::table::DataTable;
use cityplan::data::workbook::read_workbook_sheet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: inspect_workbook <path-to.xlsx>")?;
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let mut wb = calamine::open_workbook_auto(path)?;
    let names = wb.sheet_names();
    println!("Sheets ({}): {}", names.len(), names.join(", "));

    let sheet = read_workbook_sheet(path)?;
    println!("\nData sheet header: {}", sheet.headers.join(" | "));
    println!("Raw rows: {}", sheet.rows.len());

    let table = DataTable::build(&sheet)?;
    println!("Validated records: {}", table.len());

    let mut per_service: BTreeMap<String, usize> = BTreeMap::new();
    for record in table.records() {
        *per_service.entry(record.service.clone()).or_default() += 1;
    }
    for (service, count) in per_service {
        println!("  {}: {} records", service, count);
    }
    Ok(())
}
