/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    /// An alien was dropped into a city.
    Unleashed {
        /// The new alien.
        alien: String,
        /// The city it landed in.
        city: String,
    },
    /// An alien could not be unleashed because no city was left to land in.
    UnleashSkipped {
        /// The alien that never arrived.
        alien: String,
    },
    /// Aliens met in a city and destroyed it, dying in the fight.
    CityDestroyed {
        /// The destroyed city.
        city: String,
        /// The aliens that died there.
        aliens: Vec<String>,
    },
    /// No living aliens remain; the run ends early.
    AliensExhausted,
}

impl SimEventKind {
    /// Check whether a city or alien with this name is involved in the event.
    pub fn involves(&self, name: &str) -> bool {
        match self {
            Self::Unleashed { alien, city } => alien == name || city == name,
            Self::UnleashSkipped { alien } => alien == name,
            Self::CityDestroyed { city, aliens } => city == name || aliens.iter().any(|a| a == name),
            Self::AliensExhausted => false,
        }
    }
}

/// One entry of the event log.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// Step the event belongs to; 0 while unleashing.
    pub step: u64,
    /// What happened.
    pub kind: SimEventKind,
    /// The line printed for this event.
    pub description: String,
}

impl SimEvent {
    /// Build an event for `step`.
    pub fn new(step: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            step,
            kind,
            description: description.into(),
        }
    }
}

/// Ordered record of a run, optionally bounded.
///
/// A bounded log keeps the most recent entries.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<SimEvent>,
    cap: Option<usize>,
}

impl EventLog {
    /// A log holding at most `max_events` entries; 0 keeps everything.
    pub fn new(max_events: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap: (max_events > 0).then_some(max_events),
        }
    }

    /// Record `event`, evicting the oldest entries past the cap.
    pub fn push(&mut self, event: SimEvent) {
        self.entries.push(event);
        if let Some(cap) = self.cap {
            let excess = self.entries.len().saturating_sub(cap);
            self.entries.drain(..excess);
        }
    }

    /// Every retained entry, oldest first.
    pub fn events(&self) -> &[SimEvent] {
        &self.entries
    }

    /// Entries recorded during `step`.
    pub fn events_at_step(&self, step: u64) -> Vec<&SimEvent> {
        self.entries.iter().filter(|e| e.step == step).collect()
    }

    /// Entries naming a given city or alien.
    pub fn events_involving(&self, name: &str) -> Vec<&SimEvent> {
        self.entries
            .iter()
            .filter(|e| e.kind.involves(name))
            .collect()
    }

    /// City destructions in the order they happened.
    pub fn destructions(&self) -> impl Iterator<Item = &SimEvent> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, SimEventKind::CityDestroyed { .. }))
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
