//! Host client inputs, pulled on demand.

use std::collections::HashMap;

use crate::decoder::{RawCounterPair, LOWER_TOKEN_VARBIT, UPPER_TOKEN_VARBIT};
use crate::region::CoarseState;

/// Read-only view of the game client the session observes.
pub trait GameClient {
    /// Current coarse connection/world state.
    fn coarse_state(&self) -> CoarseState;

    /// Region identifiers currently loaded around the player.
    ///
    /// Only consulted while [`CoarseState::has_regions`] holds.
    fn map_regions(&self) -> Vec<u32>;

    /// Current value of a varbit. Unknown varbits read as zero.
    fn varbit_value(&self, id: u32) -> u32;

    /// This tick's token counters.
    fn raw_counters(&self) -> RawCounterPair {
        RawCounterPair::new(
            self.varbit_value(LOWER_TOKEN_VARBIT),
            self.varbit_value(UPPER_TOKEN_VARBIT),
        )
    }
}

/// Plain-value client for hosts that push snapshots each tick.
#[derive(Clone, Debug)]
pub struct SnapshotClient {
    pub state: CoarseState,
    pub regions: Vec<u32>,
    varbits: HashMap<u32, u32>,
}

impl SnapshotClient {
    pub fn new(state: CoarseState) -> Self {
        Self {
            state,
            regions: Vec::new(),
            varbits: HashMap::new(),
        }
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = u32>) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    pub fn with_counters(mut self, counters: RawCounterPair) -> Self {
        self.set_counters(counters);
        self
    }

    pub fn set_varbit(&mut self, id: u32, value: u32) {
        self.varbits.insert(id, value);
    }

    /// Write both token varbits at once.
    pub fn set_counters(&mut self, counters: RawCounterPair) {
        self.set_varbit(LOWER_TOKEN_VARBIT, counters.lower);
        self.set_varbit(UPPER_TOKEN_VARBIT, counters.upper);
    }
}

impl Default for SnapshotClient {
    fn default() -> Self {
        Self::new(CoarseState::Starting)
    }
}

impl GameClient for SnapshotClient {
    fn coarse_state(&self) -> CoarseState {
        self.state
    }

    fn map_regions(&self) -> Vec<u32> {
        self.regions.clone()
    }

    fn varbit_value(&self, id: u32) -> u32 {
        self.varbits.get(&id).copied().unwrap_or(0)
    }
}
