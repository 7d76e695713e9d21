//! Access Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Viewer permission tier for seeing the participants of an event.
///
/// Variants are ordered: `None < Basic < Full`. Every field exposed at a
/// lower tier is also exposed at every higher tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "participant_access_level", rename_all = "lowercase")
)]
pub enum AccessLevel {
    /// No access: the participant list is hidden.
    #[default]
    None,
    /// Paid or verified attendee.
    Basic,
    /// Premium attendee or organizer.
    Full,
}

impl AccessLevel {
    /// Whether this level grants any view of the participant list.
    #[must_use]
    pub const fn has_access(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Lowercase name as used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "full" => Ok(Self::Full),
            other => Err(Error::UnknownAccessLevel(other.to_string())),
        }
    }
}

/// Payment state of an access record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "payment_status", rename_all = "lowercase")
)]
pub enum PaymentStatus {
    /// Registration started, payment not settled.
    Pending,
    /// Payment settled.
    Paid,
    /// Complimentary access (staff, press, invited guests).
    Waived,
    /// Payment returned; access revoked.
    Refunded,
}

impl PaymentStatus {
    /// Whether this status unlocks the access level stored on the record.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Paid | Self::Waived)
    }
}

/// Response of the participant access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantAccessResponse {
    /// Whether the viewer may see the participant list at all.
    pub has_access: bool,
    /// Effective access level of the viewer for the event.
    pub access_level: AccessLevel,
}

impl From<AccessLevel> for ParticipantAccessResponse {
    fn from(level: AccessLevel) -> Self {
        Self {
            has_access: level.has_access(),
            access_level: level,
        }
    }
}
