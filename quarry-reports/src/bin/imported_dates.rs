//! Imported reservation overview: date range, first 10, and the busiest
//! resources.

use anyhow::Result;
use quarry_reports::{Reservation, counted_desc, date_part, read_export};

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;
    let imported: Vec<&Reservation> = reservations.iter().filter(|r| r.is_imported()).collect();

    println!("Total reservations: {}", reservations.len());
    println!("Imported (with externalId): {}", imported.len());

    if imported.is_empty() {
        return Ok(());
    }

    let dates: Vec<_> = imported.iter().filter_map(|r| r.start()).collect();
    if let (Some(min), Some(max)) = (dates.iter().min(), dates.iter().max()) {
        println!("Date range: {} to {}", min.date_naive(), max.date_naive());
    }

    println!("\nFirst 10 imported reservations:");
    for r in imported.iter().take(10) {
        println!(
            "  {} to {} - Resource: {} - Status: {}",
            date_part(&r.start_date),
            date_part(&r.end_date),
            r.resource_name("N/A"),
            r.status
        );
    }

    println!("\nResource distribution (top 5):");
    let counted = counted_desc(imported.iter().map(|r| r.resource_name("Unknown")));
    for (name, count) in counted.into_iter().take(5) {
        println!("  {name}: {count} reservations");
    }
    Ok(())
}
