//! Shared newtypes and enums used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the gateway sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Epic ────────────────────────────────────────────────────────────────────

/// Newtype for instrument identifiers (e.g. `"UA.D.AAPL.DAILY.IP"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Epic(String);

impl Epic {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Epic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Epic {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Epic {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Epic {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Epic(s.to_string()))
    }
}

impl Serialize for Epic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Epic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Epic(s))
    }
}

// ─── DealId ──────────────────────────────────────────────────────────────────

/// Newtype for deal identifiers (e.g. `"DIAAAAGB25EY6AN"`).
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DealId(String);

impl DealId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DealId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DealId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for DealId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DealId(s.to_string()))
    }
}

impl Serialize for DealId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DealId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(DealId(s))
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Deal direction: Buy (long) or Sell (short).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// The direction that closes a position opened in this direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(format!("unknown direction: {other} (expected BUY or SELL)")),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Historical price candle resolution.
///
/// Selecting [`Resolution::Week`] returns one aggregate per week, whereas
/// [`Resolution::Hour3`] returns one per 3-hour window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resolution {
    Second,
    #[default]
    Minute,
    #[serde(rename = "MINUTE_2")]
    Minute2,
    #[serde(rename = "MINUTE_3")]
    Minute3,
    #[serde(rename = "MINUTE_5")]
    Minute5,
    #[serde(rename = "MINUTE_10")]
    Minute10,
    #[serde(rename = "MINUTE_15")]
    Minute15,
    #[serde(rename = "MINUTE_30")]
    Minute30,
    Hour,
    #[serde(rename = "HOUR_2")]
    Hour2,
    #[serde(rename = "HOUR_3")]
    Hour3,
    #[serde(rename = "HOUR_4")]
    Hour4,
    Day,
    Week,
    Month,
}

impl Resolution {
    pub const ALL: [Resolution; 15] = [
        Self::Second,
        Self::Minute,
        Self::Minute2,
        Self::Minute3,
        Self::Minute5,
        Self::Minute10,
        Self::Minute15,
        Self::Minute30,
        Self::Hour,
        Self::Hour2,
        Self::Hour3,
        Self::Hour4,
        Self::Day,
        Self::Week,
        Self::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Minute2 => "MINUTE_2",
            Self::Minute3 => "MINUTE_3",
            Self::Minute5 => "MINUTE_5",
            Self::Minute10 => "MINUTE_10",
            Self::Minute15 => "MINUTE_15",
            Self::Minute30 => "MINUTE_30",
            Self::Hour => "HOUR",
            Self::Hour2 => "HOUR_2",
            Self::Hour3 => "HOUR_3",
            Self::Hour4 => "HOUR_4",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
        }
    }

    /// Duration of one candle in seconds. A month counts as 30 days.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Minute2 => 120,
            Self::Minute3 => 180,
            Self::Minute5 => 300,
            Self::Minute10 => 600,
            Self::Minute15 => 900,
            Self::Minute30 => 1800,
            Self::Hour => 3600,
            Self::Hour2 => 7200,
            Self::Hour3 => 10800,
            Self::Hour4 => 14400,
            Self::Day => 86400,
            Self::Week => 604800,
            Self::Month => 2592000,
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .find(|r| r.as_str() == upper)
            .copied()
            .ok_or_else(|| format!("unknown resolution: {s}"))
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
