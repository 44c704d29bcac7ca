//! Named timing zones with start/stop lifecycle and tick accounting.
//!
//! All timing state lives in one owned [`ZoneRegistry`] passed explicitly by
//! the host, never in ambient globals. Zones are created implicitly on first
//! `start`, kept in insertion order so the report reads in execution order,
//! and accumulate both inclusive ticks (nested children included) and
//! exclusive ticks (own work only).
//!
//! The registry is thread-confined: the host opens and closes zones strictly
//! on one thread in program order. Nested zones are supported with LIFO close
//! order; re-entrant starts of the same name are additive.

use crate::error::TimingError;
use crate::measurement::read_cycles;

/// A named timing region accumulated over one or more start/stop pairs.
#[derive(Debug, Clone)]
pub struct Zone {
    name: String,
    open_count: u32,
    inclusive_ticks: u64,
    exclusive_ticks: u64,
    hit_count: u64,
}

impl Zone {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            open_count: 0,
            inclusive_ticks: 0,
            exclusive_ticks: 0,
            hit_count: 0,
        }
    }

    /// The zone's identifying label, stable across the run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts not yet matched by a stop.
    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    /// Total ticks across all completed pairs, nested children included.
    ///
    /// Additive across pairs, so recursive same-name nesting counts the
    /// shared interval once per level.
    pub fn inclusive_ticks(&self) -> u64 {
        self.inclusive_ticks
    }

    /// Ticks attributable to this zone alone, with time spent in nested
    /// child zones subtracted. Equal to [`inclusive_ticks`] for flat usage.
    ///
    /// [`inclusive_ticks`]: Zone::inclusive_ticks
    pub fn exclusive_ticks(&self) -> u64 {
        self.exclusive_ticks
    }

    /// Completed start/stop pairs.
    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }
}

/// One open start edge. `child_ticks` accumulates the inclusive time of
/// zones that closed while this frame was innermost, so the owner's
/// exclusive ticks can subtract them.
#[derive(Debug, Clone, Copy)]
struct Frame {
    zone: usize,
    start_ticks: u64,
    child_ticks: u64,
}

/// Registry of named timing zones for a single instrumented run.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    stack: Vec<Frame>,
    first_start: Option<u64>,
    last_stop: Option<u64>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the zone `name` at the current cycle count.
    ///
    /// The zone is created on first use. Starting an already-open name is a
    /// nested re-entry and is additive.
    pub fn start(&mut self, name: &str) {
        let now = read_cycles();
        let idx = self.index_of(name);
        self.zones[idx].open_count += 1;
        self.stack.push(Frame {
            zone: idx,
            start_ticks: now,
            child_ticks: 0,
        });
        if self.first_start.is_none() {
            self.first_start = Some(now);
        }
    }

    /// Close the innermost open start of `name` at the current cycle count.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::UnmatchedStop`] if `name` has no open start,
    /// or if it is open but not the innermost open zone (close order is
    /// LIFO; interleaved overlap would make exclusive attribution
    /// ambiguous).
    pub fn stop(&mut self, name: &str) -> Result<(), TimingError> {
        let now = read_cycles();

        let innermost = self
            .stack
            .last()
            .is_some_and(|frame| self.zones[frame.zone].name == name);
        if !innermost {
            return Err(TimingError::UnmatchedStop {
                zone: name.to_string(),
            });
        }

        // Checked above; the stack is non-empty and its top matches `name`.
        let frame = match self.stack.pop() {
            Some(frame) => frame,
            None => {
                return Err(TimingError::UnmatchedStop {
                    zone: name.to_string(),
                })
            }
        };

        let delta = now.saturating_sub(frame.start_ticks);
        let zone = &mut self.zones[frame.zone];
        zone.inclusive_ticks += delta;
        zone.exclusive_ticks += delta.saturating_sub(frame.child_ticks);
        zone.hit_count += 1;
        zone.open_count -= 1;
        self.last_stop = Some(now);

        if let Some(parent) = self.stack.last_mut() {
            parent.child_ticks += delta;
        }

        Ok(())
    }

    /// Ticks between the first `start` of the run and the most recent
    /// `stop`; the report's 100% baseline. Zero when nothing completed.
    pub fn total_elapsed(&self) -> u64 {
        match (self.first_start, self.last_stop) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        }
    }

    /// All zones in the order first opened.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Verify that every start has been matched by a stop.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::ZoneNotClosed`] naming the first zone still
    /// open. The registry never auto-closes.
    pub fn ensure_closed(&self) -> Result<(), TimingError> {
        match self.zones.iter().find(|zone| zone.open_count > 0) {
            Some(zone) => Err(TimingError::ZoneNotClosed {
                zone: zone.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Discard all zones and accumulated state.
    pub fn reset(&mut self) {
        self.zones.clear();
        self.stack.clear();
        self.first_start = None;
        self.last_stop = None;
    }

    fn index_of(&mut self, name: &str) -> usize {
        match self.zones.iter().position(|zone| zone.name == name) {
            Some(idx) => idx,
            None => {
                self.zones.push(Zone::new(name));
                self.zones.len() - 1
            }
        }
    }
}
