//! Participant profile fields as bitflags.
//!
//! A field set describes which attributes of a participant record are
//! exposed to a viewer. Name and membership tier are always exposed.

use bitflags::bitflags;

bitflags! {
    /// Exposable participant profile fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParticipantFields: u16 {
        /// Display name
        const NAME            = 1 << 0;
        /// Membership tier (silver, gold, black, ...)
        const MEMBERSHIP_TIER = 1 << 1;
        /// Profile photo
        const AVATAR          = 1 << 2;
        /// Home city
        const CITY            = 1 << 3;
        /// Employer
        const COMPANY         = 1 << 4;
        /// Role at employer
        const JOB_TITLE       = 1 << 5;
        /// Free-form biography
        const BIO             = 1 << 6;
        /// Social profile link
        const SOCIAL          = 1 << 7;
        /// Email address
        const EMAIL           = 1 << 8;
        /// Phone number
        const PHONE           = 1 << 9;
    }
}

impl ParticipantFields {
    /// Fields exposed at every privacy level and access level.
    pub const IDENTITY: Self = Self::NAME.union(Self::MEMBERSHIP_TIER);

    /// Fields that allow reaching the participant directly.
    ///
    /// Withheld whenever the participant does not allow contact.
    pub const CONTACT: Self = Self::EMAIL.union(Self::PHONE);

    /// Check if all of the given fields are present.
    #[inline]
    #[must_use]
    pub const fn has(self, fields: Self) -> bool {
        self.contains(fields)
    }

    /// Parse a field name case-insensitively (`"job_title"`, `"JOB_TITLE"`).
    #[must_use]
    pub fn parse_name(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_uppercase())
    }

    /// Lowercase names of the contained fields.
    #[must_use]
    pub fn names(self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_fields() {
        assert!(ParticipantFields::IDENTITY.has(ParticipantFields::NAME));
        assert!(ParticipantFields::IDENTITY.has(ParticipantFields::MEMBERSHIP_TIER));
        assert!(!ParticipantFields::IDENTITY.has(ParticipantFields::AVATAR));
    }

    #[test]
    fn test_parse_name_case_insensitive() {
        assert_eq!(
            ParticipantFields::parse_name("job_title"),
            Some(ParticipantFields::JOB_TITLE)
        );
        assert_eq!(
            ParticipantFields::parse_name(" Email "),
            Some(ParticipantFields::EMAIL)
        );
        assert_eq!(ParticipantFields::parse_name("password"), None);
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        let fields = ParticipantFields::CITY | ParticipantFields::BIO;
        let parsed = fields
            .names()
            .iter()
            .filter_map(|n| ParticipantFields::parse_name(n))
            .fold(ParticipantFields::empty(), |acc, f| acc | f);
        assert_eq!(parsed, fields);
    }
}
