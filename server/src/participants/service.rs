//! Participant visibility operations.
//!
//! Loads access records, privacy settings, and profiles, then runs them
//! through the access gate, privacy resolver, and field redactor.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;
use velvet_common::{
    AccessLevel, ParticipantListResponse, PaymentStatus, PrivacyOverride, PrivacyPolicy,
    RedactedParticipant,
};

use super::access::{effective_access_level, require_access};
use super::error::{ParticipantError, ParticipantResult};
use super::exposure::ExposureTable;
use super::models::{ParticipantAccess, ParticipantRow};
use super::privacy::resolve_policy;
use super::queries;
use super::redact::redact;
use crate::db;

/// One page of a participant list. `page` starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Build a page from raw query values, applying defaults and bounds.
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, max_limit),
        }
    }

    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Result of a participant list request, with the viewer's access level.
#[derive(Debug)]
pub struct ParticipantPage {
    pub access_level: AccessLevel,
    pub response: ParticipantListResponse,
}

/// Access level of a viewer for an event.
pub async fn check_participant_access(
    pool: &PgPool,
    viewer_id: Uuid,
    event_id: Uuid,
) -> ParticipantResult<AccessLevel> {
    let event = db::find_event_by_id(pool, event_id)
        .await?
        .ok_or(ParticipantError::EventNotFound)?;

    let record = queries::find_participant_access(pool, viewer_id, event_id).await?;
    Ok(effective_access_level(
        record.as_ref(),
        event.organizer_id == viewer_id,
    ))
}

/// Redact one loaded participant for a viewer. `None` if the participant
/// is hidden from lists.
fn redact_row(
    row: ParticipantRow,
    access: AccessLevel,
    table: &ExposureTable,
) -> ParticipantResult<Option<RedactedParticipant>> {
    let (profile, defaults, overrides) = row.into_parts()?;
    let policy = resolve_policy(defaults, Some(&overrides));
    if !policy.show_in_list {
        return Ok(None);
    }
    Ok(Some(redact(profile, &policy, access, table)))
}

/// List the participants of an event visible to a viewer.
///
/// A viewer without access gets an empty list rather than an error.
pub async fn list_participants(
    pool: &PgPool,
    table: &ExposureTable,
    viewer_id: Uuid,
    event_id: Uuid,
    page: Page,
) -> ParticipantResult<ParticipantPage> {
    let access_level = check_participant_access(pool, viewer_id, event_id).await?;
    if !access_level.has_access() {
        debug!(%viewer_id, %event_id, "Viewer has no participant access");
        return Ok(ParticipantPage {
            access_level,
            response: ParticipantListResponse::empty(),
        });
    }

    let total_count = queries::count_visible_participants(pool, event_id, viewer_id).await?;
    let rows = queries::list_visible_participants(
        pool,
        event_id,
        viewer_id,
        page.limit,
        page.offset(),
    )
    .await?;

    let mut participants = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(p) = redact_row(row, access_level, table)? {
            participants.push(p);
        }
    }

    Ok(ParticipantPage {
        access_level,
        response: ParticipantListResponse {
            participants,
            total_count,
        },
    })
}

/// Detail view of one participant. Requires at least basic access.
pub async fn get_participant(
    pool: &PgPool,
    table: &ExposureTable,
    viewer_id: Uuid,
    event_id: Uuid,
    user_id: Uuid,
) -> ParticipantResult<(AccessLevel, RedactedParticipant)> {
    let access_level = check_participant_access(pool, viewer_id, event_id).await?;
    require_access(access_level, AccessLevel::Basic)?;

    let row = queries::find_participant(pool, event_id, user_id)
        .await?
        .ok_or(ParticipantError::ParticipantNotFound)?;

    let participant =
        redact_row(row, access_level, table)?.ok_or(ParticipantError::ParticipantNotFound)?;
    Ok((access_level, participant))
}

/// Effective privacy policy of a member within one event.
pub async fn effective_policy(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
) -> ParticipantResult<PrivacyPolicy> {
    let user = db::find_user_by_id(pool, user_id)
        .await?
        .ok_or(ParticipantError::UserNotFound)?;

    let overrides = queries::find_privacy_override(pool, user_id, event_id)
        .await?
        .map(|row| row.to_override())
        .transpose()?;

    Ok(resolve_policy(user.privacy_defaults(), overrides.as_ref()))
}

/// Replace a member's per-event override. An empty override removes it.
pub async fn set_privacy_override(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
    overrides: &PrivacyOverride,
) -> ParticipantResult<PrivacyPolicy> {
    db::find_event_by_id(pool, event_id)
        .await?
        .ok_or(ParticipantError::EventNotFound)?;

    if overrides.is_empty() {
        queries::delete_privacy_override(pool, user_id, event_id).await?;
    } else {
        queries::upsert_privacy_override(pool, user_id, event_id, overrides).await?;
    }

    effective_policy(pool, user_id, event_id).await
}

/// Grant or change a member's access to an event. Organizer only.
pub async fn grant_access(
    pool: &PgPool,
    organizer_id: Uuid,
    event_id: Uuid,
    user_id: Uuid,
    access_granted: bool,
    payment_status: PaymentStatus,
    access_level: AccessLevel,
) -> ParticipantResult<ParticipantAccess> {
    let event = db::find_event_by_id(pool, event_id)
        .await?
        .ok_or(ParticipantError::EventNotFound)?;
    if event.organizer_id != organizer_id {
        return Err(ParticipantError::NotOrganizer);
    }

    db::find_user_by_id(pool, user_id)
        .await?
        .ok_or(ParticipantError::UserNotFound)?;

    let record = queries::upsert_participant_access(
        pool,
        user_id,
        event_id,
        access_granted,
        payment_status,
        access_level,
    )
    .await?;

    debug!(%user_id, %event_id, %access_level, access_granted, "Participant access updated");
    Ok(record)
}
