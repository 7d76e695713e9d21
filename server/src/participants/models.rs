//! Database models for participant visibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use velvet_common::{
    AccessLevel, PaymentStatus, PrivacyLevel, PrivacyOverride, PrivacyPolicy, ViewKind,
};

/// Participant access record for one (user, event) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantAccess {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub access_granted: bool,
    pub payment_status: PaymentStatus,
    pub access_level: AccessLevel,
    pub granted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored per-event privacy override. NULL columns are not overridden.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyOverrideRow {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub privacy_level: Option<i16>,
    pub allow_contact: Option<bool>,
    pub show_in_list: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl PrivacyOverrideRow {
    /// Convert to the typed partial override.
    pub fn to_override(&self) -> velvet_common::Result<PrivacyOverride> {
        Ok(PrivacyOverride {
            privacy_level: self.privacy_level.map(PrivacyLevel::try_from).transpose()?,
            allow_contact: self.allow_contact,
            show_in_list: self.show_in_list,
        })
    }
}

/// Participant profile fields prior to redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantProfile {
    pub user_id: Uuid,
    pub display_name: String,
    pub membership_tier: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub social_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One participant as loaded for an event: profile, global defaults, and
/// the raw per-event override columns.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub membership_tier: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub social_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sqlx(try_from = "i16")]
    pub default_privacy_level: PrivacyLevel,
    pub default_allow_contact: bool,
    pub default_show_in_list: bool,
    pub override_privacy_level: Option<i16>,
    pub override_allow_contact: Option<bool>,
    pub override_show_in_list: Option<bool>,
}

impl ParticipantRow {
    /// Split into the profile, the global defaults, and the partial override.
    pub fn into_parts(
        self,
    ) -> velvet_common::Result<(ParticipantProfile, PrivacyPolicy, PrivacyOverride)> {
        let defaults = PrivacyPolicy {
            privacy_level: self.default_privacy_level,
            allow_contact: self.default_allow_contact,
            show_in_list: self.default_show_in_list,
        };
        let overrides = PrivacyOverride {
            privacy_level: self
                .override_privacy_level
                .map(PrivacyLevel::try_from)
                .transpose()?,
            allow_contact: self.override_allow_contact,
            show_in_list: self.override_show_in_list,
        };
        let profile = ParticipantProfile {
            user_id: self.user_id,
            display_name: self.display_name,
            membership_tier: self.membership_tier,
            avatar_url: self.avatar_url,
            city: self.city,
            company: self.company,
            job_title: self.job_title,
            bio: self.bio,
            social_url: self.social_url,
            email: self.email,
            phone: self.phone,
        };
        Ok((profile, defaults, overrides))
    }
}

/// A view log entry to be appended.
#[derive(Debug, Clone)]
pub struct NewViewLogEntry {
    pub viewer_id: Uuid,
    pub subject_id: Uuid,
    pub event_id: Uuid,
    pub access_level: AccessLevel,
    pub kind: ViewKind,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// A stored view of a member's profile, joined with the viewer's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileViewRow {
    pub viewer_id: Uuid,
    pub viewer_display_name: String,
    pub event_id: Uuid,
    pub access_level: AccessLevel,
    pub kind: ViewKind,
    pub viewed_at: DateTime<Utc>,
}

impl From<ProfileViewRow> for velvet_common::ProfileView {
    fn from(row: ProfileViewRow) -> Self {
        Self {
            viewer_id: row.viewer_id,
            viewer_display_name: row.viewer_display_name,
            event_id: row.event_id,
            access_level: row.access_level,
            kind: row.kind,
            viewed_at: row.viewed_at,
        }
    }
}
