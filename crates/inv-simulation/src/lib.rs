//! Step-based alien invasion simulation.
//!
//! A [`Simulator`] owns a [`inv_core::WorldMap`] and a seeded random source.
//! It unleashes aliens into random cities, then repeatedly moves every alien
//! one road and destroys each city where two or more of them meet, until the
//! step budget runs out or no aliens are left.

/// Configuration types for simulation runs.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// The final state of the world in map-file form.
pub mod report;
/// The invasion orchestrator.
pub mod simulator;

/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`report::Report`].
pub use report::Report;
/// Re-exports of [`simulator::Simulator`] and [`simulator::SimPhase`].
pub use simulator::{SimPhase, Simulator};
