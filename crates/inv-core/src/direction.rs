use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// One of the four cardinal directions a road can leave a city by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the east.
    East,
    /// Towards the north.
    North,
    /// Towards the west.
    West,
    /// Towards the south.
    South,
}

impl Direction {
    /// All directions in canonical order: east, north, west, south.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// The direction pointing back the way this one came.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::South => Direction::North,
        }
    }

    /// Lowercase keyword used in map files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::North => "north",
            Direction::West => "west",
            Direction::South => "south",
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "east" => Ok(Direction::East),
            "north" => Ok(Direction::North),
            "west" => Ok(Direction::West),
            "south" => Ok(Direction::South),
            other => Err(WorldError::InvalidDirection(other.to_string())),
        }
    }
}
