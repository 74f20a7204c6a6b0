use std::fmt;

use inv_core::{Destruction, World, WorldError, WorldMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::report::Report;

/// Where a [`Simulator`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Bound to a map; no aliens unleashed yet.
    Uninitialized,
    /// Aliens unleashed and the landing fights resolved.
    Populated,
    /// The given number of steps has completed.
    Stepping(u64),
    /// The step budget ran out or no aliens are left.
    Finished,
}

/// The invasion orchestrator.
///
/// Owns the world map, the random source, and the event log. Every random
/// choice of a run (alien names, landing cities, roads taken) is drawn from the
/// one [`StdRng`], so a seed fully determines the outcome.
pub struct Simulator<M: WorldMap = World> {
    map: M,
    rng: StdRng,
    config: SimConfig,
    phase: SimPhase,
    steps_taken: u64,
    events: EventLog,
    destroyed: Vec<String>,
}

impl<M: WorldMap> fmt::Debug for Simulator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("phase", &self.phase)
            .field("steps", &self.steps_taken)
            .field("cities", &self.map.cities().len())
            .field("aliens", &self.map.aliens().len())
            .finish()
    }
}

impl<M: WorldMap> Simulator<M> {
    /// Create a simulator whose random source is seeded from `config.seed`.
    pub fn new(map: M, config: SimConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(map, rng, config)
    }

    /// Create a simulator drawing from a caller-supplied random source.
    pub fn with_rng(map: M, rng: StdRng, config: SimConfig) -> Self {
        let events = EventLog::new(config.max_events);
        Self {
            map,
            rng,
            config,
            phase: SimPhase::Uninitialized,
            steps_taken: 0,
            events,
            destroyed: Vec::new(),
        }
    }

    /// Unleash the configured number of aliens into random cities, then
    /// destroy every city where two or more of them landed.
    ///
    /// Does nothing once the simulator has been populated.
    pub fn populate(&mut self) -> SimResult<()> {
        if self.phase != SimPhase::Uninitialized {
            return Ok(());
        }

        for _ in 0..self.config.aliens {
            let name = self.fresh_name()?;
            match self.map.random_city(&mut self.rng) {
                Ok(city) => {
                    self.map.add_alien(&name, &city)?;
                    tracing::trace!(alien = %name, city = %city, "alien unleashed");
                    let description = format!("alien {name} lands in {city}");
                    self.emit(SimEventKind::Unleashed { alien: name, city }, description);
                }
                Err(WorldError::EmptyWorld) => {
                    tracing::warn!(alien = %name, "no city to unleash into, skipping");
                    let description = format!("alien {name} found no city to land in");
                    self.emit(SimEventKind::UnleashSkipped { alien: name }, description);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.phase = SimPhase::Populated;
        tracing::info!(
            aliens = self.map.aliens().len(),
            cities = self.map.cities().len(),
            "invasion begins"
        );
        self.resolve();
        Ok(())
    }

    /// Advance the invasion by one step.
    ///
    /// Every alien alive at the start of the step tries one move; only after
    /// all of them have moved are contested cities destroyed. Populates first
    /// if needed. Returns the cities destroyed during this step; once the run
    /// is finished this is a no-op.
    pub fn step(&mut self) -> SimResult<Vec<Destruction>> {
        match self.phase {
            SimPhase::Uninitialized => self.populate()?,
            SimPhase::Finished => return Ok(Vec::new()),
            SimPhase::Populated | SimPhase::Stepping(_) => {}
        }
        if self.finish_if_done() {
            return Ok(Vec::new());
        }

        self.steps_taken += 1;
        self.phase = SimPhase::Stepping(self.steps_taken);

        let roster: Vec<String> = self.map.aliens().keys().cloned().collect();
        let mut moved = 0usize;
        for alien in &roster {
            if let Some(movement) = self.map.move_alien(alien, &mut self.rng) {
                tracing::trace!(
                    alien = %movement.alien,
                    from = %movement.from,
                    to = %movement.to,
                    direction = %movement.direction,
                    "alien moved"
                );
                moved += 1;
            }
        }

        let destroyed = self.resolve();
        tracing::debug!(
            step = self.steps_taken,
            moved,
            destroyed = destroyed.len(),
            aliens = self.map.aliens().len(),
            "step complete"
        );

        self.finish_if_done();
        Ok(destroyed)
    }

    /// Run the whole invasion and report what is left of the world.
    pub fn run(&mut self) -> SimResult<Report> {
        while self.phase != SimPhase::Finished {
            self.step()?;
        }
        Ok(self.report())
    }

    /// Snapshot of the surviving world.
    pub fn report(&self) -> Report {
        Report::capture(&self.map, self.steps_taken, self.destroyed.clone())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Number of steps completed so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Everything that has happened so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The configuration this run uses.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The world as it currently stands.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Extract the map, consuming the simulator.
    pub fn into_map(self) -> M {
        self.map
    }

    fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.steps_taken, kind, description));
    }

    /// Destroy every city holding two or more aliens.
    fn resolve(&mut self) -> Vec<Destruction> {
        let contested = self.map.contested_cities();
        let mut destroyed = Vec::with_capacity(contested.len());
        for city in contested {
            let Some(destruction) = self.map.destroy_city(&city) else {
                continue;
            };
            let description = format!(
                "{} has been destroyed by {}!",
                destruction.city,
                list_aliens(&destruction.aliens)
            );
            tracing::info!(step = self.steps_taken, "{description}");
            self.destroyed.push(destruction.city.clone());
            self.emit(
                SimEventKind::CityDestroyed {
                    city: destruction.city.clone(),
                    aliens: destruction.aliens.clone(),
                },
                description,
            );
            destroyed.push(destruction);
        }
        destroyed
    }

    /// Move to [`SimPhase::Finished`] if no aliens are left or the step
    /// budget is spent.
    fn finish_if_done(&mut self) -> bool {
        if self.map.aliens().is_empty() {
            tracing::info!(step = self.steps_taken, "no aliens left");
            let description = format!("no aliens left after step {}", self.steps_taken);
            self.emit(SimEventKind::AliensExhausted, description);
            self.phase = SimPhase::Finished;
            true
        } else if self.steps_taken >= self.config.max_steps {
            tracing::info!(steps = self.steps_taken, "step budget exhausted");
            self.phase = SimPhase::Finished;
            true
        } else {
            false
        }
    }

    /// Draw a lowercase name no living alien is using.
    fn fresh_name(&mut self) -> SimResult<String> {
        let length = self.config.name_length;
        let capacity = u32::try_from(length)
            .ok()
            .and_then(|l| 26usize.checked_pow(l))
            .unwrap_or(usize::MAX);
        if self.map.aliens().len() >= capacity {
            return Err(SimError::NameSpaceExhausted { length });
        }

        loop {
            let name: String = (0..length)
                .map(|_| char::from(self.rng.random_range(b'a'..=b'z')))
                .collect();
            if !self.map.aliens().contains_key(&name) {
                return Ok(name);
            }
            tracing::trace!(alien = %name, "alien name taken, drawing again");
        }
    }
}

/// `alien a`, `alien a and alien b`, `alien a, alien b and alien c`.
fn list_aliens(aliens: &[String]) -> String {
    let named: Vec<String> = aliens.iter().map(|a| format!("alien {a}")).collect();
    match named.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}
