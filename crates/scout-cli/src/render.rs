//! Terminal output for catalog listings and analysis verdicts.

use scout_core::{AnalysisResult, Catalog, EquipmentProfile, LocationQuery};

/// Places listed under a verdict before the rest are summarised.
const MAX_LISTED_PLACES: usize = 15;

pub(crate) fn print_machines(catalog: &Catalog) {
    println!("{:<20}{:<12}{:<18}NAME", "ID", "BRAND", "CATEGORY");
    for machine in catalog.machines() {
        println!(
            "{:<20}{:<12}{:<18}{}",
            machine.id, machine.brand, machine.category, machine.name
        );
    }
}

/// Numbered menu used by the wizard's first step.
pub(crate) fn print_machine_menu(catalog: &Catalog) {
    for (index, machine) in catalog.machines().iter().enumerate() {
        println!("  [{}] {} {}", index + 1, machine.brand, machine.name);
        println!("      {}", machine.description);
        println!("      \u{2192} {}", machine.characteristic);
    }
}

pub(crate) fn print_result(
    location: &LocationQuery,
    machine: &EquipmentProfile,
    radius_m: u32,
    result: &AnalysisResult,
) {
    println!("{} \u{00b7} {} {}", location.short_label(), machine.brand, machine.name);
    println!("({}, radio {radius_m} m)", location.coordinate);
    println!();
    println!("{}  [{}]", result.title, result.classification);
    println!("{}", result.message);

    if result.points.is_empty() {
        return;
    }

    println!();
    println!("{:<36}{:<18}POSITION", "NAME", "KIND");
    for place in result.points.iter().take(MAX_LISTED_PLACES) {
        println!("{:<36}{:<18}{}", place.name, place.kind_label(), place.coordinate);
    }
    let remaining = result.points.len().saturating_sub(MAX_LISTED_PLACES);
    if remaining > 0 {
        println!("\u{2026} y {remaining} más");
    }
}

/// The same payload the HTTP API returns under `data`.
pub(crate) fn result_json(
    location: &LocationQuery,
    machine: &EquipmentProfile,
    result: &AnalysisResult,
) -> serde_json::Value {
    serde_json::json!({
        "location": location,
        "machine": machine,
        "result": result,
    })
}
