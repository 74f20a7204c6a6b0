use std::fmt;

use inv_core::{Direction, WorldMap};
use serde::Serialize;

/// First line of the rendered report.
pub const REPORT_HEADER: &str = "Surviving cities:";

/// One road of a surviving city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadReport {
    /// Direction the road leaves by.
    pub direction: Direction,
    /// City at the other end.
    pub city: String,
}

/// A surviving city and its remaining roads in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityReport {
    /// Name of the city.
    pub name: String,
    /// Roads still connected.
    pub roads: Vec<RoadReport>,
}

/// The state of the world after a run.
///
/// Renders as a header line followed by one map-file line per surviving city,
/// so the body can be fed back in as a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Steps actually taken.
    pub steps: u64,
    /// Cities destroyed, in order of destruction.
    pub destroyed: Vec<String>,
    /// Names of the aliens still alive.
    pub aliens: Vec<String>,
    /// Surviving cities in name order.
    pub cities: Vec<CityReport>,
}

impl Report {
    /// Capture the current state of `map`.
    pub fn capture<M: WorldMap>(map: &M, steps: u64, destroyed: Vec<String>) -> Self {
        let cities = map
            .cities()
            .values()
            .map(|city| CityReport {
                name: city.name().to_string(),
                roads: city
                    .links()
                    .map(|(direction, neighbor)| RoadReport {
                        direction,
                        city: neighbor.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            steps,
            destroyed,
            aliens: map.aliens().keys().cloned().collect(),
            cities,
        }
    }
}

impl fmt::Display for CityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for road in &self.roads {
            write!(f, " {}={}", road.direction, road.city)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;
        for city in &self.cities {
            writeln!(f, "{city}")?;
        }
        Ok(())
    }
}
