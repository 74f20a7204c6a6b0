use std::path::Path;

use colored::Colorize;

pub fn run(map: &Path) -> Result<(), String> {
    let world = super::load_map(map)?;

    println!("  {} for '{}'.", "All checks passed".green(), map.display());
    println!(
        "  {} cities, {} roads",
        world.city_count(),
        world.road_count()
    );

    Ok(())
}
