use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use inv_core::{City, Direction, WorldMap};

pub fn run(map: &Path, city: Option<&str>) -> Result<(), String> {
    let world = super::load_map(map)?;

    let cities: Vec<&City> = match city {
        Some(name) => {
            let found = world
                .city(name)
                .ok_or_else(|| format!("city not found: \"{name}\""))?;
            vec![found]
        }
        None => world.cities().values().collect(),
    };

    if cities.is_empty() {
        println!("  {}", "(no cities)".dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["City".to_string()];
    header.extend(Direction::ALL.iter().map(|&d| capitalize(d.as_str())));
    table.set_header(header);

    for city in &cities {
        let mut row = vec![city.name().to_string()];
        row.extend(
            Direction::ALL
                .iter()
                .map(|&d| city.neighbor(d).unwrap_or("—").to_string()),
        );
        table.add_row(row);
    }

    println!("{table}");
    println!();
    println!(
        "  {} cit{}",
        cities.len(),
        if cities.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
