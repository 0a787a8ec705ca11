//! Imported reservation resource check: distribution plus one sample record.

use anyhow::Result;
use quarry_reports::{Reservation, counted_desc, date_part, prefix, read_export};

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;
    let imported: Vec<&Reservation> = reservations.iter().filter(|r| r.is_imported()).collect();

    println!("Total reservations: {}", reservations.len());
    println!("Imported (have externalId): {}", imported.len());

    let Some(sample) = imported.first() else {
        return Ok(());
    };

    println!("\nResource distribution for imported reservations:");
    let counted = counted_desc(imported.iter().map(|r| r.resource_name("Unknown")));
    for (name, count) in counted.into_iter().take(10) {
        println!("  {name}: {count}");
    }

    println!("\nSample imported reservation:");
    println!("  ID: {}...", prefix(&sample.id, 8));
    println!(
        "  External ID: {}",
        sample.external_id.as_deref().unwrap_or("N/A")
    );
    println!("  Resource: {}", sample.resource_name("N/A"));
    println!(
        "  Date: {} to {}",
        date_part(&sample.start_date),
        date_part(&sample.end_date)
    );
    println!("  Status: {}", sample.status);
    Ok(())
}
