//! Field exposure table.
//!
//! Maps (privacy level, viewer access level) to the set of participant
//! fields a viewer may see. The table is configuration: a default ships with
//! the server and can be replaced through `PARTICIPANT_EXPOSURE_TABLE`.
//!
//! Every table, default or configured, satisfies:
//! - level 5 exposes exactly name and membership tier at both access levels
//! - basic sets strictly grow as the privacy level decreases
//! - full sets never shrink as the privacy level decreases
//! - at every level the full set contains the basic set

use serde::Deserialize;
use thiserror::Error;
use velvet_common::{AccessLevel, PrivacyLevel};

use super::fields::ParticipantFields;

/// Fields exposed at one privacy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureTier {
    pub basic: ParticipantFields,
    pub full: ParticipantFields,
}

/// Exposure table indexed by privacy level (index 0 = level 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureTable {
    tiers: [ExposureTier; 5],
}

/// Exposure table validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExposureTableError {
    #[error("Invalid exposure table JSON: {0}")]
    Json(String),

    #[error("Privacy level {0} is not in 1..=5")]
    InvalidLevel(u8),

    #[error("Privacy level {0} is defined more than once")]
    DuplicateLevel(u8),

    #[error("Privacy level {0} is missing")]
    MissingLevel(u8),

    #[error("Unknown participant field: {0}")]
    UnknownField(String),

    #[error("Level 5 must expose exactly name and membership tier")]
    MostPrivateTooWide,

    #[error("Full access exposes less than basic at privacy level {0}")]
    FullNarrowerThanBasic(u8),

    #[error("Basic access at privacy level {0} does not strictly widen level {1}")]
    BasicNotGrowing(u8, u8),

    #[error("Full access at privacy level {0} hides fields shown at level {1}")]
    FullNotGrowing(u8, u8),
}

#[derive(Debug, Deserialize)]
struct TierSpec {
    level: u8,
    basic: Vec<String>,
    full: Vec<String>,
}

impl Default for ExposureTable {
    fn default() -> Self {
        use ParticipantFields as F;

        let level5 = F::IDENTITY;
        let level4 = level5 | F::AVATAR;
        let level3 = level4 | F::CITY;
        let level2 = level3 | F::COMPANY | F::JOB_TITLE;
        let level1 = F::all();

        Self {
            tiers: [
                ExposureTier {
                    basic: level1,
                    full: level1,
                },
                ExposureTier {
                    basic: level2,
                    full: level2 | F::BIO | F::SOCIAL,
                },
                ExposureTier {
                    basic: level3,
                    full: level3 | F::COMPANY | F::JOB_TITLE,
                },
                ExposureTier {
                    basic: level4,
                    full: level4 | F::CITY,
                },
                ExposureTier {
                    basic: level5,
                    full: level5,
                },
            ],
        }
    }
}

impl ExposureTable {
    /// Build a table from tiers ordered level 1 through level 5.
    pub fn new(tiers: [ExposureTier; 5]) -> Result<Self, ExposureTableError> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from JSON.
    ///
    /// Expected shape:
    /// `[{"level": 5, "basic": ["name", "membership_tier"], "full": [...]}, ...]`
    pub fn from_json(json: &str) -> Result<Self, ExposureTableError> {
        let specs: Vec<TierSpec> =
            serde_json::from_str(json).map_err(|e| ExposureTableError::Json(e.to_string()))?;

        let mut tiers: [Option<ExposureTier>; 5] = [None; 5];
        for spec in specs {
            if !(1..=5).contains(&spec.level) {
                return Err(ExposureTableError::InvalidLevel(spec.level));
            }
            let slot = &mut tiers[usize::from(spec.level - 1)];
            if slot.is_some() {
                return Err(ExposureTableError::DuplicateLevel(spec.level));
            }
            *slot = Some(ExposureTier {
                basic: parse_fields(&spec.basic)?,
                full: parse_fields(&spec.full)?,
            });
        }

        let mut resolved = [ExposureTier {
            basic: ParticipantFields::empty(),
            full: ParticipantFields::empty(),
        }; 5];
        for (i, tier) in tiers.into_iter().enumerate() {
            resolved[i] = tier.ok_or(ExposureTableError::MissingLevel(i as u8 + 1))?;
        }

        Self::new(resolved)
    }

    /// Fields a viewer with `access` may see for a participant at `level`.
    #[must_use]
    pub fn fields_for(&self, level: PrivacyLevel, access: AccessLevel) -> ParticipantFields {
        let tier = self.tier(level);
        match access {
            AccessLevel::None => ParticipantFields::empty(),
            AccessLevel::Basic => tier.basic,
            AccessLevel::Full => tier.full,
        }
    }

    /// Tier for a privacy level.
    #[must_use]
    pub fn tier(&self, level: PrivacyLevel) -> ExposureTier {
        self.tiers[usize::from(level.get() - 1)]
    }

    fn validate(&self) -> Result<(), ExposureTableError> {
        let most_private = self.tiers[4];
        if most_private.basic != ParticipantFields::IDENTITY
            || most_private.full != ParticipantFields::IDENTITY
        {
            return Err(ExposureTableError::MostPrivateTooWide);
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            let level = i as u8 + 1;
            if !tier.full.contains(tier.basic) {
                return Err(ExposureTableError::FullNarrowerThanBasic(level));
            }
        }

        // Compare each level with the next more private one.
        for i in 0..4 {
            let (open, private) = (self.tiers[i], self.tiers[i + 1]);
            let (level, private_level) = (i as u8 + 1, i as u8 + 2);
            if !open.basic.contains(private.basic) || open.basic == private.basic {
                return Err(ExposureTableError::BasicNotGrowing(level, private_level));
            }
            if !open.full.contains(private.full) {
                return Err(ExposureTableError::FullNotGrowing(level, private_level));
            }
        }

        Ok(())
    }
}

fn parse_fields(names: &[String]) -> Result<ParticipantFields, ExposureTableError> {
    names.iter().try_fold(ParticipantFields::empty(), |acc, name| {
        ParticipantFields::parse_name(name)
            .map(|f| acc | f)
            .ok_or_else(|| ExposureTableError::UnknownField(name.clone()))
    })
}
