use std::collections::BTreeSet;
use std::fmt;

use crate::direction::Direction;

/// A node of the world graph.
///
/// Holds up to four neighbor names, one per [`Direction`], and the names of the
/// aliens currently inside. Neighbors are stored by name and resolved through
/// the owning [`World`](crate::World); cities never point at each other directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    neighbors: [Option<String>; 4],
    aliens: BTreeSet<String>,
}

impl City {
    /// Create an isolated city with no aliens.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            neighbors: Default::default(),
            aliens: BTreeSet::new(),
        }
    }

    /// The city's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the neighbor in `direction`, if the road exists.
    pub fn neighbor(&self, direction: Direction) -> Option<&str> {
        self.neighbors[direction.index()].as_deref()
    }

    /// Directions with a live neighbor, in canonical order.
    pub fn directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.neighbors[d.index()].is_some())
            .collect()
    }

    /// `(direction, neighbor)` pairs in canonical order.
    pub fn links(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|n| (d, n)))
    }

    /// Returns `true` if no road leaves this city.
    pub fn is_isolated(&self) -> bool {
        self.neighbors.iter().all(Option::is_none)
    }

    /// Names of the aliens currently in this city.
    pub fn aliens(&self) -> &BTreeSet<String> {
        &self.aliens
    }

    /// Number of aliens currently in this city.
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: Option<String>) {
        self.neighbors[direction.index()] = neighbor;
    }

    pub(crate) fn insert_alien(&mut self, alien: &str) {
        self.aliens.insert(alien.to_string());
    }

    pub(crate) fn remove_alien(&mut self, alien: &str) {
        self.aliens.remove(alien);
    }

    pub(crate) fn take_aliens(&mut self) -> BTreeSet<String> {
        std::mem::take(&mut self.aliens)
    }
}

/// Renders the city as a map-file line: `Name east=A north=B`.
impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (direction, neighbor) in self.links() {
            write!(f, " {direction}={neighbor}")?;
        }
        Ok(())
    }
}
