//! Resource assignment check: first 20 reservations plus how many lack a
//! resource id.

use anyhow::Result;
use quarry_reports::{date_part, prefix, read_export};

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;

    println!("Recent 20 reservations:");
    for r in reservations.iter().take(20) {
        let resource = match r.resource_id() {
            Some(id) => prefix(id, 8),
            None => "NONE",
        };
        println!(
            "  {}... Start: {} Resource: {} Status: {}",
            prefix(&r.id, 8),
            date_part(&r.start_date),
            resource,
            r.status
        );
    }

    let without = reservations
        .iter()
        .filter(|r| r.resource_id().is_none())
        .count();
    println!(
        "\nReservations without resourceId: {} / {}",
        without,
        reservations.len()
    );
    Ok(())
}
