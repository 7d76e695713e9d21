//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! All query functions include error context logging to aid debugging.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use velvet_common::PrivacyPolicy;

use super::models::{Event, NewUser, User};

// ============================================================================
// User Queries
// ============================================================================

/// Find user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_id", user_id = %id))
}

/// Create a new member with platform-default privacy settings.
pub async fn create_user(pool: &PgPool, new_user: &NewUser<'_>) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r"
        INSERT INTO users (
            username, display_name, email, phone, avatar_url, membership_tier,
            city, company, job_title, bio, social_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        ",
    )
    .bind(new_user.username)
    .bind(new_user.display_name)
    .bind(new_user.email)
    .bind(new_user.phone)
    .bind(new_user.avatar_url)
    .bind(new_user.membership_tier)
    .bind(new_user.city)
    .bind(new_user.company)
    .bind(new_user.job_title)
    .bind(new_user.bio)
    .bind(new_user.social_url)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_user", username = %new_user.username))
}

/// Replace a member's global privacy defaults.
pub async fn update_privacy_defaults(
    pool: &PgPool,
    user_id: Uuid,
    policy: PrivacyPolicy,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r"
        UPDATE users
        SET privacy_level = $2,
            allow_contact = $3,
            show_in_list = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(user_id)
    .bind(i16::from(policy.privacy_level))
    .bind(policy.allow_contact)
    .bind(policy.show_in_list)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("update_privacy_defaults", user_id = %user_id))
}

// ============================================================================
// Event Queries
// ============================================================================

/// Find event by ID.
pub async fn find_event_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<Event>> {
    sqlx::query_as::<_, Event>(
        "SELECT id, title, organizer_id, starts_at, created_at FROM events WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_event_by_id", event_id = %id))
}

/// Create an event.
pub async fn create_event(
    pool: &PgPool,
    title: &str,
    organizer_id: Uuid,
    starts_at: DateTime<Utc>,
) -> sqlx::Result<Event> {
    sqlx::query_as::<_, Event>(
        r"
        INSERT INTO events (title, organizer_id, starts_at)
        VALUES ($1, $2, $3)
        RETURNING id, title, organizer_id, starts_at, created_at
        ",
    )
    .bind(title)
    .bind(organizer_id)
    .bind(starts_at)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_event", organizer_id = %organizer_id))
}
