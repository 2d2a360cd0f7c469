//! Token decoder - two client counters in, one stored-token count out.
//!
//! The client splits the stored token count across two varbits. The lower
//! counter carries the low six bits, the upper counter carries the multiple of
//! 256, and the bits in between are recovered from the sum of both counters
//! modulo 5:
//!
//! ```text
//! lower   = lower_raw % 64
//! decoded = upper * 256 + ((lower + upper) % 5) * 64 + lower
//! ```
//!
//! The lower counter should already be below 64; it is reduced again so a
//! wider lower varbit would still decode.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Varbit holding the lower token counter.
pub const LOWER_TOKEN_VARBIT: u32 = 4769;

/// Varbit holding the upper token counter.
pub const UPPER_TOKEN_VARBIT: u32 = 5671;

/// Most tokens the Ectofuntus will hold.
pub const MAX_TOKEN_AMOUNT: u32 = 1000;

/// Modulus applied to the lower counter before decoding.
pub const LOWER_COUNTER_MODULUS: u32 = 64;

/// Raw counter readings for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawCounterPair {
    pub lower: u32,
    pub upper: u32,
}

impl RawCounterPair {
    #[inline]
    pub fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// Decode this pair into a stored token count.
    #[inline]
    pub fn decode(self) -> u32 {
        decode(self.lower, self.upper)
    }
}

/// Decode the stored token count.
///
/// Pure and total. The mod-5 term is computed exactly; the outer sum wraps,
/// so out-of-domain upper values give a wrong but well-formed number instead
/// of a panic. No clamping to
/// [`MAX_TOKEN_AMOUNT`] happens here.
#[inline]
pub fn decode(lower_raw: u32, upper_raw: u32) -> u32 {
    let lower = lower_raw % LOWER_COUNTER_MODULUS;
    let middle = ((u64::from(lower) + u64::from(upper_raw)) % 5) as u32 * 64;
    upper_raw
        .wrapping_mul(256)
        .wrapping_add(middle)
        .wrapping_add(lower)
}
