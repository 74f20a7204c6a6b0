use inv_core::Direction;

/// Byte range into the source text.
pub type Span = std::ops::Range<usize>;

/// One road declared on a map line: `east=Berlin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The direction keyword.
    pub direction: Direction,
    /// Name of the neighboring city.
    pub target: String,
    /// Span of the whole `direction=city` pair.
    pub span: Span,
}

/// One map line: a city name followed by its roads.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDef {
    /// Name of the city being defined.
    pub name: String,
    /// Roads in the order they were written.
    pub links: Vec<Link>,
}

impl CityDef {
    /// Links as `(direction, neighbor)` pairs, ready for
    /// [`WorldMap::add_city`](inv_core::WorldMap::add_city).
    pub fn pairs(&self) -> Vec<(Direction, &str)> {
        self.links
            .iter()
            .map(|l| (l.direction, l.target.as_str()))
            .collect()
    }
}
