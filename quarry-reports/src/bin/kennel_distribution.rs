//! Kennel occupancy distribution across all reservations.

use anyhow::Result;
use quarry_reports::{counted_desc, read_export};

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;

    let counted = counted_desc(reservations.iter().map(|r| r.resource_name("Unknown")));

    println!("Total reservations checked: {}", reservations.len());
    println!("Unique kennels used: {}", counted.len());
    println!("\nKennel distribution:");
    for (name, count) in counted.into_iter().take(20) {
        println!("  {name}: {count}");
    }
    Ok(())
}
