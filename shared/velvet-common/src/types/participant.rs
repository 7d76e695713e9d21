//! Participant Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::access::AccessLevel;
use super::privacy::PrivacyLevel;

/// A participant as seen by one viewer, with fields withheld per policy.
///
/// `display_name` and `membership_tier` are always present; every other
/// profile field is omitted from the JSON when redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedParticipant {
    pub user_id: Uuid,
    pub display_name: String,
    pub membership_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Effective privacy level of the participant for this event.
    pub privacy_level: PrivacyLevel,
    /// Whether the viewer may initiate contact with this participant.
    pub can_contact: bool,
}

/// One page of an event's participant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListResponse {
    pub participants: Vec<RedactedParticipant>,
    /// Number of visible participants across all pages.
    pub total_count: i64,
}

impl ParticipantListResponse {
    /// The response returned to viewers without access.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            participants: Vec::new(),
            total_count: 0,
        }
    }
}

/// Whether a view came from the list or a single profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "view_kind", rename_all = "lowercase"))]
pub enum ViewKind {
    List,
    Detail,
}

/// A recorded profile view, as returned to the viewed member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub viewer_id: Uuid,
    pub viewer_display_name: String,
    pub event_id: Uuid,
    pub access_level: AccessLevel,
    pub kind: ViewKind,
    pub viewed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_fields_are_omitted() {
        let participant = RedactedParticipant {
            user_id: Uuid::nil(),
            display_name: "Ada".into(),
            membership_tier: Some("black".into()),
            avatar_url: None,
            city: None,
            company: None,
            job_title: None,
            bio: None,
            social_url: None,
            email: None,
            phone: None,
            privacy_level: PrivacyLevel::PRIVATE,
            can_contact: false,
        };

        let json = serde_json::to_value(&participant).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["displayName"], "Ada");
        assert_eq!(obj["membershipTier"], "black");
        assert_eq!(obj["privacyLevel"], 5);
        assert!(!obj.contains_key("email"));
        assert!(!obj.contains_key("city"));
    }

    #[test]
    fn test_empty_list_response() {
        let json = serde_json::to_value(ParticipantListResponse::empty()).unwrap();
        assert_eq!(json["totalCount"], 0);
        assert_eq!(json["participants"].as_array().unwrap().len(), 0);
    }
}
