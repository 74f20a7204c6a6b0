use std::path::Path;

use colored::Colorize;

use inv_simulation::{SimConfig, SimEvent, SimEventKind, Simulator};

use crate::Format;

pub fn run(
    map: &Path,
    aliens: usize,
    steps: u64,
    seed: u64,
    format: Format,
    verbose: bool,
) -> Result<(), String> {
    let world = super::load_map(map)?;

    let config = SimConfig::default()
        .with_seed(seed)
        .with_aliens(aliens)
        .with_max_steps(steps);

    let mut sim = Simulator::new(world, config);
    let report = sim.run().map_err(|e| format!("simulation error: {e}"))?;

    if format == Format::Json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize report: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if verbose {
        for event in sim.events().events() {
            let step_label = format!("[step {:>5}]", event.step).dimmed();
            println!("{step_label} {}", colorize_event(event));
        }
    } else {
        for event in sim.events().destructions() {
            println!("{}", event.description);
        }
    }

    println!();
    print!("{report}");

    eprintln!(
        "  {}",
        format!(
            "{} steps, {} cities destroyed, {} aliens left (seed={seed})",
            report.steps,
            report.destroyed.len(),
            report.aliens.len()
        )
        .dimmed()
    );

    Ok(())
}

fn colorize_event(event: &SimEvent) -> String {
    let desc = event.description.as_str();
    match &event.kind {
        SimEventKind::CityDestroyed { .. } => desc.red().bold().to_string(),
        SimEventKind::UnleashSkipped { .. } => desc.yellow().to_string(),
        SimEventKind::AliensExhausted => desc.bold().to_string(),
        SimEventKind::Unleashed { .. } => desc.to_string(),
    }
}
