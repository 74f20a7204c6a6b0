//! Core types for the invasion simulator: cities, aliens, and the world map.
//!
//! The world is a graph of cities connected in the four cardinal directions.
//! Every edge is stored on both ends, and every mutation keeps the two ends in
//! agreement. Aliens live inside cities; destroying a city destroys them too.

/// Aliens and their current location.
pub mod alien;
/// Cities and their neighbor slots.
pub mod city;
/// The four cardinal directions.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// The world map capability and its concrete implementation.
pub mod world;

/// Re-export alien types.
pub use alien::Alien;
/// Re-export city types.
pub use city::City;
/// Re-export direction types.
pub use direction::Direction;
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export world map types.
pub use world::{Destruction, Movement, World, WorldMap};
