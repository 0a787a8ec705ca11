//! Date-range export check: first 10 reservation spans and the number of
//! distinct resources in use.

use anyhow::Result;
use quarry_reports::{date_part, prefix, read_export};
use std::collections::BTreeSet;

fn main() -> Result<()> {
    let export = read_export(std::io::stdin().lock())?;
    let reservations = &export.data.reservations;

    println!("Total in date range: {}", export.pagination.total_count);
    println!("\nFirst 10 reservations:");
    for r in reservations.iter().take(10) {
        println!(
            "  {}... {} to {} Resource: {} Status: {}",
            prefix(&r.id, 8),
            date_part(&r.start_date),
            date_part(&r.end_date),
            r.resource_name("N/A"),
            r.status
        );
    }

    let resource_ids: BTreeSet<&str> = reservations.iter().filter_map(|r| r.resource_id()).collect();
    println!("\nUnique resources used: {}", resource_ids.len());
    if let Some(line) = resource_ids_line(&resource_ids) {
        println!("{line}");
    }
    Ok(())
}

/// The id listing printed when few enough resources are in play, including
/// none at all.
fn resource_ids_line(resource_ids: &BTreeSet<&str>) -> Option<String> {
    if resource_ids.len() > 3 {
        return None;
    }
    Some(format!(
        "Resource IDs: {}",
        resource_ids.iter().copied().collect::<Vec<_>>().join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_line_prints_for_up_to_three_resources_including_zero() {
        let empty: BTreeSet<&str> = BTreeSet::new();
        assert_eq!(resource_ids_line(&empty).unwrap(), "Resource IDs: ");

        let few: BTreeSet<&str> = ["res-a", "res-b"].into_iter().collect();
        assert_eq!(resource_ids_line(&few).unwrap(), "Resource IDs: res-a, res-b");

        let many: BTreeSet<&str> = ["a", "b", "c", "d"].into_iter().collect();
        assert!(resource_ids_line(&many).is_none());
    }
}
