//! Ecto Tokens - stored Ectofuntus token tracker
//!
//! The client never shows how many Ecto-tokens are waiting at the Ectofuntus.
//! It does keep two counters that together encode the number. This crate
//! decodes them once per game tick while the player is there and feeds an
//! on-screen badge.
//!
//! # Core Types
//!
//! - **RegionSet**: Region identifiers that count as "at the Ectofuntus"
//! - **RawCounterPair**: The two raw counters read each tick
//! - **TokenSession**: Lifecycle state machine owned by the host event loop
//! - **BadgeDisplay**: Host display layer the session asks for badges
//!
//! # Architecture: Client / Session / Display
//!
//! 1. **Client** - The host game client, read on demand (state, regions, varbits)
//! 2. **Session** - Holds presence and the stored count, reacts to host events
//! 3. **Display** - Adds and removes the badge, pulls a `BadgeView` to draw
//!
//! Events arrive one at a time on the host's thread. Nothing blocks, nothing
//! spawns, nothing fails.
//!
//! # Example
//!
//! ```rust
//! use ecto_tokens::{
//!     CoarseState, ConfigChange, CounterType, InfoConfig, RawCounterPair,
//!     RecordingDisplay, SnapshotClient, TokenSession,
//! };
//!
//! // Host snapshot: logged in at the Ectofuntus
//! let mut client = SnapshotClient::new(CoarseState::LoggedIn)
//!     .with_regions([14647])
//!     .with_counters(RawCounterPair::new(3, 2));
//!
//! let mut session = TokenSession::new(RecordingDisplay::new());
//! session.on_activate(&client, InfoConfig::default());
//!
//! // One tick decodes the counters
//! assert_eq!(session.on_tick(&client), Some(515));
//! assert_eq!(session.badge_view().text(), "515");
//!
//! // Switching the badge to bonemeal keeps the count
//! session.on_config_changed(
//!     &ConfigChange::counter_type(),
//!     InfoConfig::new(CounterType::Bonemeal),
//! );
//! assert_eq!(session.stored_tokens(), 515);
//! assert_eq!(session.badge_view().count, 97);
//!
//! // Logging out resets
//! client.state = CoarseState::LoginScreen;
//! session.on_coarse_state_change(CoarseState::LoginScreen, &client);
//! assert_eq!(session.stored_tokens(), 0);
//! ```

mod client;
mod config;
mod decoder;
mod display;
mod error;
mod region;
mod session;

pub use client::{GameClient, SnapshotClient};
pub use config::{
    ConfigChange, CounterType, InfoConfig, ItemId, BONEMEAL_ITEM, CONFIG_GROUP,
    COUNTER_TYPE_KEY, ECTOTOKEN_ITEM, HIGH_WARN_TOKEN_AMOUNT, ICON_QUANTITY,
    LOW_WARN_TOKEN_AMOUNT, TOKENS_PER_BONEMEAL,
};
pub use decoder::{
    decode, RawCounterPair, LOWER_COUNTER_MODULUS, LOWER_TOKEN_VARBIT, MAX_TOKEN_AMOUNT,
    UPPER_TOKEN_VARBIT,
};
pub use display::{
    Badge, BadgeDisplay, BadgeRequest, BadgeView, ChannelDisplay, FnDisplay, ItemIcon,
    RecordingDisplay, TokenLevel,
};
pub use error::ConfigError;
pub use region::{is_in_monitored_area, CoarseState, RegionSet, ECTOFUNTUS_REGIONS};
pub use session::TokenSession;
