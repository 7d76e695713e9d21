//! Privacy Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Per-member privacy scale: 1 is most open, 5 is most private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrivacyLevel(u8);

impl PrivacyLevel {
    /// Most open setting.
    pub const OPEN: Self = Self(1);
    /// Platform default for new members.
    pub const DEFAULT: Self = Self(3);
    /// Most private setting.
    pub const PRIVATE: Self = Self(5);

    /// All levels from most open to most private.
    pub const ALL: [Self; 5] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Create a privacy level, rejecting values outside 1..=5.
    pub fn new(value: u8) -> crate::Result<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidPrivacyLevel(i64::from(value)))
        }
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for PrivacyLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PrivacyLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i16> for PrivacyLevel {
    type Error = Error;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Error::InvalidPrivacyLevel(i64::from(value)))
            .and_then(Self::new)
    }
}

impl From<PrivacyLevel> for u8 {
    fn from(level: PrivacyLevel) -> Self {
        level.0
    }
}

impl From<PrivacyLevel> for i16 {
    fn from(level: PrivacyLevel) -> Self {
        Self::from(level.0)
    }
}

/// A complete privacy policy: every field is set.
///
/// Used both for a member's global defaults and for the effective policy
/// that applies to them within one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPolicy {
    pub privacy_level: PrivacyLevel,
    pub allow_contact: bool,
    pub show_in_list: bool,
}

impl Default for PrivacyPolicy {
    fn default() -> Self {
        Self {
            privacy_level: PrivacyLevel::DEFAULT,
            allow_contact: true,
            show_in_list: true,
        }
    }
}

/// A partial privacy policy: `None` fields are not overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_level: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_contact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_in_list: Option<bool>,
}

impl PrivacyOverride {
    /// Whether no field is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.privacy_level.is_none() && self.allow_contact.is_none() && self.show_in_list.is_none()
    }
}
