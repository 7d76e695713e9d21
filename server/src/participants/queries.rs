//! Database queries for participant visibility.
//!
//! Provides async functions for:
//! - Participant access records
//! - Per-event privacy overrides
//! - Visible participant listing
//! - The profile view log

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use velvet_common::{AccessLevel, PaymentStatus, PrivacyOverride};

use super::models::{
    NewViewLogEntry, ParticipantAccess, ParticipantRow, PrivacyOverrideRow, ProfileViewRow,
};

/// Profile, defaults, and override columns for one participant of an event.
///
/// Expects the query to bind the event ID as `$1`.
macro_rules! participant_select {
    () => {
        r"
        SELECT
            u.id AS user_id,
            u.display_name,
            u.membership_tier,
            u.avatar_url,
            u.city,
            u.company,
            u.job_title,
            u.bio,
            u.social_url,
            u.email,
            u.phone,
            u.privacy_level AS default_privacy_level,
            u.allow_contact AS default_allow_contact,
            u.show_in_list AS default_show_in_list,
            o.privacy_level AS override_privacy_level,
            o.allow_contact AS override_allow_contact,
            o.show_in_list AS override_show_in_list
        FROM event_participant_access a
        INNER JOIN users u ON u.id = a.user_id
        LEFT JOIN event_privacy_overrides o
            ON o.user_id = a.user_id AND o.event_id = a.event_id
        WHERE a.event_id = $1
            AND a.access_granted
            AND a.payment_status IN ('paid', 'waived')
        "
    };
}

// ============================================================================
// Access Record Queries
// ============================================================================

/// Find the access record of a user for an event.
pub async fn find_participant_access(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> sqlx::Result<Option<ParticipantAccess>> {
    sqlx::query_as::<_, ParticipantAccess>(
        r"
        SELECT user_id, event_id, access_granted, payment_status, access_level,
               granted_at, created_at, updated_at
        FROM event_participant_access
        WHERE user_id = $1 AND event_id = $2
        ",
    )
    .bind(user_id)
    .bind(event_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_participant_access", user_id = %user_id, event_id = %event_id))
}

/// Create or replace the access record of a user for an event.
///
/// `granted_at` is set the first time access is granted and cleared when
/// access is withdrawn.
pub async fn upsert_participant_access(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
    access_granted: bool,
    payment_status: PaymentStatus,
    access_level: AccessLevel,
) -> sqlx::Result<ParticipantAccess> {
    sqlx::query_as::<_, ParticipantAccess>(
        r"
        INSERT INTO event_participant_access
            (user_id, event_id, access_granted, payment_status, access_level, granted_at)
        VALUES ($1, $2, $3, $4, $5, CASE WHEN $3 THEN NOW() END)
        ON CONFLICT (user_id, event_id) DO UPDATE SET
            access_granted = EXCLUDED.access_granted,
            payment_status = EXCLUDED.payment_status,
            access_level = EXCLUDED.access_level,
            granted_at = CASE
                WHEN EXCLUDED.access_granted
                    THEN COALESCE(event_participant_access.granted_at, NOW())
            END,
            updated_at = NOW()
        RETURNING user_id, event_id, access_granted, payment_status, access_level,
                  granted_at, created_at, updated_at
        ",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(access_granted)
    .bind(payment_status)
    .bind(access_level)
    .fetch_one(pool)
    .await
    .map_err(db_error!("upsert_participant_access", user_id = %user_id, event_id = %event_id))
}

// ============================================================================
// Privacy Override Queries
// ============================================================================

/// Find a user's privacy override for an event.
pub async fn find_privacy_override(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> sqlx::Result<Option<PrivacyOverrideRow>> {
    sqlx::query_as::<_, PrivacyOverrideRow>(
        r"
        SELECT user_id, event_id, privacy_level, allow_contact, show_in_list, updated_at
        FROM event_privacy_overrides
        WHERE user_id = $1 AND event_id = $2
        ",
    )
    .bind(user_id)
    .bind(event_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_privacy_override", user_id = %user_id, event_id = %event_id))
}

/// Set a user's privacy override for an event (full replacement).
///
/// Fields left unset in `overrides` are stored as NULL and fall back to the
/// user's global defaults.
pub async fn upsert_privacy_override(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
    overrides: &PrivacyOverride,
) -> sqlx::Result<PrivacyOverrideRow> {
    sqlx::query_as::<_, PrivacyOverrideRow>(
        r"
        INSERT INTO event_privacy_overrides
            (user_id, event_id, privacy_level, allow_contact, show_in_list)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, event_id) DO UPDATE SET
            privacy_level = EXCLUDED.privacy_level,
            allow_contact = EXCLUDED.allow_contact,
            show_in_list = EXCLUDED.show_in_list,
            updated_at = NOW()
        RETURNING user_id, event_id, privacy_level, allow_contact, show_in_list, updated_at
        ",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(overrides.privacy_level.map(i16::from))
    .bind(overrides.allow_contact)
    .bind(overrides.show_in_list)
    .fetch_one(pool)
    .await
    .map_err(db_error!("upsert_privacy_override", user_id = %user_id, event_id = %event_id))
}

/// Remove a user's privacy override for an event. Returns whether a row existed.
pub async fn delete_privacy_override(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> sqlx::Result<bool> {
    let result =
        sqlx::query("DELETE FROM event_privacy_overrides WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(pool)
            .await
            .map_err(
                db_error!("delete_privacy_override", user_id = %user_id, event_id = %event_id),
            )?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Participant Listing Queries
// ============================================================================

/// Count participants of an event visible in its list, excluding the viewer.
pub async fn count_visible_participants(
    pool: &PgPool,
    event_id: Uuid,
    viewer_id: Uuid,
) -> sqlx::Result<i64> {
    let count: (i64,) = sqlx::query_as(
        r"
        SELECT COUNT(*)
        FROM event_participant_access a
        INNER JOIN users u ON u.id = a.user_id
        LEFT JOIN event_privacy_overrides o
            ON o.user_id = a.user_id AND o.event_id = a.event_id
        WHERE a.event_id = $1
            AND a.access_granted
            AND a.payment_status IN ('paid', 'waived')
            AND a.user_id <> $2
            AND COALESCE(o.show_in_list, u.show_in_list)
        ",
    )
    .bind(event_id)
    .bind(viewer_id)
    .fetch_one(pool)
    .await
    .map_err(db_error!("count_visible_participants", event_id = %event_id))?;

    Ok(count.0)
}

/// List one page of participants visible in an event's list, excluding the viewer.
///
/// Ordered by display name, then ID for a stable page order.
pub async fn list_visible_participants(
    pool: &PgPool,
    event_id: Uuid,
    viewer_id: Uuid,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(concat!(
        participant_select!(),
        r"
            AND a.user_id <> $2
            AND COALESCE(o.show_in_list, u.show_in_list)
        ORDER BY u.display_name ASC, u.id ASC
        LIMIT $3 OFFSET $4
        "
    ))
    .bind(event_id)
    .bind(viewer_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_visible_participants", event_id = %event_id))
}

/// Load one participant of an event, whether or not they are listed.
pub async fn find_participant(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> sqlx::Result<Option<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(concat!(participant_select!(), " AND a.user_id = $2"))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_participant", event_id = %event_id, user_id = %user_id))
}

// ============================================================================
// View Log Queries
// ============================================================================

/// Append view log entries.
pub async fn insert_view_log(pool: &PgPool, entries: &[NewViewLogEntry]) -> sqlx::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO participant_view_log \
         (viewer_id, subject_id, event_id, access_level, kind, ip_address, user_agent) ",
    );
    builder.push_values(entries, |mut row, entry| {
        row.push_bind(entry.viewer_id)
            .push_bind(entry.subject_id)
            .push_bind(entry.event_id)
            .push_bind(entry.access_level)
            .push_bind(entry.kind)
            .push_bind(entry.ip_address.as_deref())
            .push_bind(entry.user_agent.as_deref());
    });

    builder
        .build()
        .execute(pool)
        .await
        .map_err(db_error!("insert_view_log", entries = entries.len()))?;

    Ok(())
}

/// List views of a member's profile, newest first.
pub async fn list_profile_views(
    pool: &PgPool,
    subject_id: Uuid,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<ProfileViewRow>> {
    sqlx::query_as::<_, ProfileViewRow>(
        r"
        SELECT
            v.viewer_id,
            u.display_name AS viewer_display_name,
            v.event_id,
            v.access_level,
            v.kind,
            v.viewed_at
        FROM participant_view_log v
        INNER JOIN users u ON u.id = v.viewer_id
        WHERE v.subject_id = $1
        ORDER BY v.viewed_at DESC
        LIMIT $2 OFFSET $3
        ",
    )
    .bind(subject_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_profile_views", subject_id = %subject_id))
}

/// Count views of a member's profile.
pub async fn count_profile_views(pool: &PgPool, subject_id: Uuid) -> sqlx::Result<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM participant_view_log WHERE subject_id = $1")
            .bind(subject_id)
            .fetch_one(pool)
            .await
            .map_err(db_error!("count_profile_views", subject_id = %subject_id))?;

    Ok(count.0)
}
