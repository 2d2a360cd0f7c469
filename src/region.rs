//! Region detection - is the player standing at the Ectofuntus?
//!
//! The client reports the map regions currently loaded around the player.
//! The monitored area is a fixed set of region identifiers; the player is
//! inside it when any loaded region belongs to that set.
//!
//! Region identifiers are only meaningful while the client is in the world or
//! loading into it. In every other coarse state the check short-circuits to
//! `false` without looking at regions at all.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Region identifiers covering the Ectofuntus and its surroundings.
pub const ECTOFUNTUS_REGIONS: [u32; 2] = [14647, 14746];

/// High-level connection/world state reported by the host client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoarseState {
    /// Client has not started or is still booting.
    Starting,
    /// At the login screen. Resets all session state.
    LoginScreen,
    /// Authenticating with the server.
    LoggingIn,
    /// Transient connection loss; prior state is kept.
    ConnectionLost,
    /// Loading a new map area.
    Loading,
    /// Active in the world.
    LoggedIn,
    /// Connected to a different world server.
    Hopping,
}

impl CoarseState {
    /// Whether region identifiers can be trusted in this state.
    #[inline]
    pub fn has_regions(self) -> bool {
        matches!(self, CoarseState::LoggedIn | CoarseState::Loading)
    }
}

/// Immutable set of region identifiers that make up the monitored area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSet {
    ids: Vec<u32>,
}

impl RegionSet {
    /// Create a region set from explicit identifiers.
    pub fn new(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut ids: Vec<u32> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// The Ectofuntus region set.
    pub fn ectofuntus() -> Self {
        Self::new(ECTOFUNTUS_REGIONS)
    }

    /// Check if a single region identifier is part of the set.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// True iff any of `current` belongs to this set.
    ///
    /// An empty `current` slice yields `false`.
    pub fn intersects(&self, current: &[u32]) -> bool {
        current.iter().any(|&id| self.contains(id))
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::ectofuntus()
    }
}

/// Decide whether the player is inside the monitored area.
///
/// `regions` is only called when `state` is `LoggedIn` or `Loading`, so hosts
/// can hand in a lazy lookup that would be invalid in other states.
pub fn is_in_monitored_area<F>(set: &RegionSet, state: CoarseState, regions: F) -> bool
where
    F: FnOnce() -> Vec<u32>,
{
    if !state.has_regions() {
        return false;
    }
    set.intersects(&regions())
}
