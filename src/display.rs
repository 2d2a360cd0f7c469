//! Display boundary - the on-screen badge and the host that draws it.
//!
//! The session never renders anything itself. It asks a [`BadgeDisplay`] to
//! add or remove a [`Badge`], and renderers pull a [`BadgeView`] from the
//! session whenever they draw a frame.
//!
//! ## Warning levels
//!
//! The badge escalates as the Ectofuntus fills up:
//!
//! - **Normal**: plenty of room
//! - **Low**: 39 or fewer bonemeal fit
//! - **High**: 13 or fewer bonemeal fit
//! - **Full**: nothing more fits

use crate::config::{
    CounterType, ItemId, HIGH_WARN_TOKEN_AMOUNT, ICON_QUANTITY, LOW_WARN_TOKEN_AMOUNT,
    TOKENS_PER_BONEMEAL,
};
use crate::decoder::MAX_TOKEN_AMOUNT;

/// Icon request for a badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemIcon {
    pub item: ItemId,
    /// Stack size the icon image is rendered with.
    pub quantity: u32,
}

/// The display element created on setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub icon: ItemIcon,
    pub counter_type: CounterType,
}

impl Badge {
    pub fn new(counter_type: CounterType) -> Self {
        Self {
            icon: ItemIcon {
                item: counter_type.icon_item(),
                quantity: ICON_QUANTITY,
            },
            counter_type,
        }
    }
}

/// How close the Ectofuntus is to full.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenLevel {
    Normal,
    Low,
    High,
    Full,
}

impl TokenLevel {
    pub fn classify(tokens: u32) -> Self {
        if tokens >= MAX_TOKEN_AMOUNT {
            TokenLevel::Full
        } else if tokens >= HIGH_WARN_TOKEN_AMOUNT {
            TokenLevel::High
        } else if tokens >= LOW_WARN_TOKEN_AMOUNT {
            TokenLevel::Low
        } else {
            TokenLevel::Normal
        }
    }
}

/// What a renderer draws for the badge this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub visible: bool,
    pub count: u32,
    pub level: TokenLevel,
    pub tooltip: String,
}

impl BadgeView {
    /// Build the view for a stored token count.
    pub fn new(visible: bool, tokens: u32, counter_type: CounterType) -> Self {
        let count = match counter_type {
            CounterType::EctoToken => tokens,
            CounterType::Bonemeal => {
                MAX_TOKEN_AMOUNT.saturating_sub(tokens) / TOKENS_PER_BONEMEAL
            }
        };
        Self {
            visible,
            count,
            level: TokenLevel::classify(tokens),
            tooltip: format!("{tokens}/{MAX_TOKEN_AMOUNT} Ecto-tokens stored"),
        }
    }

    /// Text shown on the badge.
    pub fn text(&self) -> String {
        self.count.to_string()
    }
}

/// Request sent to the host's display layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BadgeRequest {
    Add(Badge),
    Remove(Badge),
}

/// Host-side display layer that owns on-screen badges.
pub trait BadgeDisplay {
    /// Put a badge on screen.
    fn add_badge(&mut self, badge: &Badge);

    /// Take a previously added badge off screen.
    fn remove_badge(&mut self, badge: &Badge);
}

/// Function-based display for simple cases
pub struct FnDisplay<F: FnMut(BadgeRequest)>(pub F);

impl<F: FnMut(BadgeRequest)> BadgeDisplay for FnDisplay<F> {
    fn add_badge(&mut self, badge: &Badge) {
        (self.0)(BadgeRequest::Add(*badge));
    }

    fn remove_badge(&mut self, badge: &Badge) {
        (self.0)(BadgeRequest::Remove(*badge));
    }
}

/// Channel-based display - forwards requests to a render thread
pub struct ChannelDisplay {
    sender: std::sync::mpsc::Sender<BadgeRequest>,
}

impl ChannelDisplay {
    pub fn new(sender: std::sync::mpsc::Sender<BadgeRequest>) -> Self {
        Self { sender }
    }
}

impl BadgeDisplay for ChannelDisplay {
    fn add_badge(&mut self, badge: &Badge) {
        let _ = self.sender.send(BadgeRequest::Add(*badge));
    }

    fn remove_badge(&mut self, badge: &Badge) {
        let _ = self.sender.send(BadgeRequest::Remove(*badge));
    }
}

/// Display that records every request and tracks which badges are on screen.
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    requests: Vec<BadgeRequest>,
    shown: Vec<Badge>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request in arrival order.
    pub fn requests(&self) -> &[BadgeRequest] {
        &self.requests
    }

    /// Badges currently on screen.
    pub fn shown(&self) -> &[Badge] {
        &self.shown
    }

    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }
}

impl BadgeDisplay for RecordingDisplay {
    fn add_badge(&mut self, badge: &Badge) {
        self.requests.push(BadgeRequest::Add(*badge));
        self.shown.push(*badge);
    }

    fn remove_badge(&mut self, badge: &Badge) {
        self.requests.push(BadgeRequest::Remove(*badge));
        if let Some(pos) = self.shown.iter().position(|b| b == badge) {
            self.shown.remove(pos);
        }
    }
}
