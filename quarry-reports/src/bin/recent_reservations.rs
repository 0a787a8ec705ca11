//! Total count plus the five most recent reservations.

use anyhow::Result;
use quarry_reports::{prefix, read_export};

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;

    println!("Total reservations: {}", export.pagination.total_count);
    println!("\nMost recent 5:");
    for r in reservations.iter().take(5) {
        println!(
            "  Created: {} - Resource: {} - Pet: {}",
            prefix(&r.created_at, 19),
            r.resource_name("N/A"),
            r.pet_name("N/A")
        );
    }
    Ok(())
}
