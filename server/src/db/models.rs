//! Database Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use velvet_common::{PrivacyLevel, PrivacyPolicy};

/// Member model, including the member's global privacy defaults.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub membership_tier: Option<String>,
    pub city: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub social_url: Option<String>,
    #[sqlx(try_from = "i16")]
    pub privacy_level: PrivacyLevel,
    pub allow_contact: bool,
    pub show_in_list: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The member's global privacy defaults.
    #[must_use]
    pub const fn privacy_defaults(&self) -> PrivacyPolicy {
        PrivacyPolicy {
            privacy_level: self.privacy_level,
            allow_contact: self.allow_contact,
            show_in_list: self.show_in_list,
        }
    }
}

/// Profile fields supplied when creating a member.
#[derive(Debug, Clone, Default)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub membership_tier: Option<&'a str>,
    pub city: Option<&'a str>,
    pub company: Option<&'a str>,
    pub job_title: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub social_url: Option<&'a str>,
}

/// Event model.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub organizer_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
