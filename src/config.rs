//! Badge configuration

use std::fmt;
use std::str::FromStr;

use crate::decoder::MAX_TOKEN_AMOUNT;
use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Config group the host files this add-on's settings under.
pub const CONFIG_GROUP: &str = "ectofuntusinfo";

/// Key of the counter type setting inside [`CONFIG_GROUP`].
pub const COUNTER_TYPE_KEY: &str = "counterType";

/// Tokens produced by one bucket of bonemeal.
pub const TOKENS_PER_BONEMEAL: u32 = 5;

/// Warn hard once 13 or fewer bonemeal fit.
pub const HIGH_WARN_TOKEN_AMOUNT: u32 = MAX_TOKEN_AMOUNT - 13 * TOKENS_PER_BONEMEAL;

/// Warn softly once 39 or fewer bonemeal fit.
pub const LOW_WARN_TOKEN_AMOUNT: u32 = MAX_TOKEN_AMOUNT - 39 * TOKENS_PER_BONEMEAL;

/// Item identifier used as the badge icon.
pub type ItemId = u32;

/// Ecto-token item.
pub const ECTOTOKEN_ITEM: ItemId = 4278;

/// Bonemeal item.
pub const BONEMEAL_ITEM: ItemId = 4255;

/// Stack size requested for the icon image.
pub const ICON_QUANTITY: u32 = 10;

/// What the badge counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CounterType {
    /// Stored Ecto-tokens.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ECTOTOKEN"))]
    EctoToken,
    /// Bonemeal that can still be worshipped before the Ectofuntus is full.
    Bonemeal,
}

impl CounterType {
    /// Item whose image represents this counter.
    pub fn icon_item(self) -> ItemId {
        match self {
            CounterType::EctoToken => ECTOTOKEN_ITEM,
            CounterType::Bonemeal => BONEMEAL_ITEM,
        }
    }

    /// Config string as stored by the host.
    pub fn as_str(self) -> &'static str {
        match self {
            CounterType::EctoToken => "ECTOTOKEN",
            CounterType::Bonemeal => "BONEMEAL",
        }
    }
}

impl fmt::Display for CounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ECTOTOKEN" => Ok(CounterType::EctoToken),
            "BONEMEAL" => Ok(CounterType::Bonemeal),
            _ => Err(ConfigError::UnknownCounterType(s.to_string())),
        }
    }
}

/// Settings passed explicitly into setup and config-change handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfoConfig {
    /// Which icon and count the badge shows.
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter_type: CounterType,
}

impl InfoConfig {
    pub fn new(counter_type: CounterType) -> Self {
        Self { counter_type }
    }

    /// Build a config from the host's raw counter type value.
    pub fn from_counter_type_str(value: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(value.parse()?))
    }
}

/// A config change notification from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigChange {
    pub group: String,
    pub key: String,
}

impl ConfigChange {
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }

    /// The change that selects a new counter type.
    pub fn counter_type() -> Self {
        Self::new(CONFIG_GROUP, COUNTER_TYPE_KEY)
    }

    /// Only the counter type setting triggers a badge rebuild.
    pub fn affects_counter_type(&self) -> bool {
        self.group == CONFIG_GROUP && self.key == COUNTER_TYPE_KEY
    }
}
