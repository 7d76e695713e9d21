//! Participant API Handlers

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        ConnectInfo, FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use velvet_common::{
    AccessLevel, ParticipantAccessResponse, ParticipantListResponse, PaymentStatus,
    PrivacyOverride, PrivacyPolicy, ProfileView, RedactedParticipant, ViewKind,
};

use super::error::{ParticipantError, ParticipantResult};
use super::models::ParticipantAccess;
use super::queries;
use super::service::{self, Page};
use super::view_log::{ViewContext, ViewLogger};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::db;
use crate::util::{extract_client_ip, extract_user_agent};

// ============================================================================
// Extractors
// ============================================================================

impl FromRequestParts<AppState> for ViewContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let connect_info = parts.extensions.get::<ConnectInfo<SocketAddr>>();
        let ip = extract_client_ip(&parts.headers, connect_info, state.config.trust_proxy);

        Ok(Self {
            ip_address: ip.map(|ip| ip.to_string()),
            user_agent: extract_user_agent(&parts.headers),
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Participant list query parameters.
#[derive(Debug, Deserialize, Validate)]
pub struct ListParticipantsQuery {
    /// 1-based page number.
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<i64>,
    /// Page size. Clamped to the configured maximum.
    pub limit: Option<i64>,
}

/// Access grant request, sent by the event organizer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantAccessRequest {
    #[serde(default = "default_true")]
    pub access_granted: bool,
    pub payment_status: PaymentStatus,
    pub access_level: AccessLevel,
}

const fn default_true() -> bool {
    true
}

/// Effective and overridden privacy settings of the caller for one event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPrivacyResponse {
    pub event_id: Uuid,
    pub effective: PrivacyPolicy,
    pub overrides: PrivacyOverride,
}

/// View history query parameters.
#[derive(Debug, Deserialize, Validate)]
pub struct ViewHistoryQuery {
    #[serde(default = "default_view_limit")]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Offset must not be negative"))]
    pub offset: i64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_view_limit() -> i64 {
    50
}

/// Paginated view history.
#[derive(Debug, Serialize)]
pub struct ViewHistoryResponse {
    pub items: Vec<ProfileView>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Access
// ============================================================================

/// Check the caller's participant access for an event.
///
/// `GET /api/events/{event_id}/access`
#[tracing::instrument(skip(state, auth), fields(viewer_id = %auth.id))]
pub async fn check_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ParticipantResult<Json<ParticipantAccessResponse>> {
    let level = service::check_participant_access(&state.db, auth.id, event_id).await?;
    Ok(Json(level.into()))
}

/// Grant or change a member's access to an event.
///
/// `PUT /api/events/{event_id}/access/{user_id}`
#[tracing::instrument(skip(state, auth), fields(organizer_id = %auth.id))]
pub async fn grant_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((event_id, user_id)): Path<(Uuid, Uuid)>,
    body: Result<Json<GrantAccessRequest>, JsonRejection>,
) -> ParticipantResult<Json<ParticipantAccess>> {
    let Json(body) = body?;
    let record = service::grant_access(
        &state.db,
        auth.id,
        event_id,
        user_id,
        body.access_granted,
        body.payment_status,
        body.access_level,
    )
    .await?;

    Ok(Json(record))
}

// ============================================================================
// Participants
// ============================================================================

/// List the participants of an event, redacted for the caller.
///
/// `GET /api/events/{event_id}/participants`
#[tracing::instrument(skip(state, auth, ctx), fields(viewer_id = %auth.id))]
pub async fn list_participants(
    State(state): State<AppState>,
    auth: AuthUser,
    ctx: ViewContext,
    Path(event_id): Path<Uuid>,
    query: Result<Query<ListParticipantsQuery>, QueryRejection>,
) -> ParticipantResult<Json<ParticipantListResponse>> {
    let Query(query) = query?;
    query.validate()?;

    let page = Page::new(
        query.page,
        query.limit,
        state.config.participant_page_limit,
        state.config.participant_page_limit_max,
    );

    let result = service::list_participants(
        &state.db,
        &state.config.exposure_table,
        auth.id,
        event_id,
        page,
    )
    .await?;

    state.view_log.record(ViewLogger::entries(
        auth.id,
        event_id,
        result.access_level,
        ViewKind::List,
        result.response.participants.iter().map(|p| p.user_id),
        &ctx,
    ));

    Ok(Json(result.response))
}

/// Detail view of one participant, redacted for the caller.
///
/// `GET /api/events/{event_id}/participants/{user_id}`
#[tracing::instrument(skip(state, auth, ctx), fields(viewer_id = %auth.id))]
pub async fn get_participant(
    State(state): State<AppState>,
    auth: AuthUser,
    ctx: ViewContext,
    Path((event_id, user_id)): Path<(Uuid, Uuid)>,
) -> ParticipantResult<Json<RedactedParticipant>> {
    let (access_level, participant) = service::get_participant(
        &state.db,
        &state.config.exposure_table,
        auth.id,
        event_id,
        user_id,
    )
    .await?;

    state.view_log.record(ViewLogger::entries(
        auth.id,
        event_id,
        access_level,
        ViewKind::Detail,
        [participant.user_id],
        &ctx,
    ));

    Ok(Json(participant))
}

// ============================================================================
// Privacy Settings
// ============================================================================

/// Get the caller's global privacy defaults.
///
/// `GET /api/me/privacy`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn get_privacy_defaults(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ParticipantResult<Json<PrivacyPolicy>> {
    let user = db::find_user_by_id(&state.db, auth.id)
        .await?
        .ok_or(ParticipantError::UserNotFound)?;
    Ok(Json(user.privacy_defaults()))
}

/// Replace the caller's global privacy defaults.
///
/// `PUT /api/me/privacy`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn update_privacy_defaults(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<PrivacyPolicy>, JsonRejection>,
) -> ParticipantResult<Json<PrivacyPolicy>> {
    let Json(body) = body?;
    let user = db::update_privacy_defaults(&state.db, auth.id, body)
        .await?
        .ok_or(ParticipantError::UserNotFound)?;
    Ok(Json(user.privacy_defaults()))
}

async fn event_privacy(
    state: &AppState,
    user_id: Uuid,
    event_id: Uuid,
) -> ParticipantResult<EventPrivacyResponse> {
    let overrides = queries::find_privacy_override(&state.db, user_id, event_id)
        .await?
        .map(|row| row.to_override())
        .transpose()?
        .unwrap_or_default();
    let effective = service::effective_policy(&state.db, user_id, event_id).await?;

    Ok(EventPrivacyResponse {
        event_id,
        effective,
        overrides,
    })
}

/// Get the caller's privacy settings for one event.
///
/// `GET /api/events/{event_id}/privacy`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn get_event_privacy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ParticipantResult<Json<EventPrivacyResponse>> {
    db::find_event_by_id(&state.db, event_id)
        .await?
        .ok_or(ParticipantError::EventNotFound)?;

    Ok(Json(event_privacy(&state, auth.id, event_id).await?))
}

/// Replace the caller's privacy override for one event.
///
/// Fields omitted from the body fall back to the global defaults.
///
/// `PUT /api/events/{event_id}/privacy`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn set_event_privacy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    body: Result<Json<PrivacyOverride>, JsonRejection>,
) -> ParticipantResult<Json<EventPrivacyResponse>> {
    let Json(body) = body?;
    service::set_privacy_override(&state.db, auth.id, event_id, &body).await?;
    Ok(Json(event_privacy(&state, auth.id, event_id).await?))
}

/// Remove the caller's privacy override for one event.
///
/// `DELETE /api/events/{event_id}/privacy`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn clear_event_privacy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> ParticipantResult<StatusCode> {
    let removed = queries::delete_privacy_override(&state.db, auth.id, event_id).await?;
    tracing::debug!(removed, "Privacy override cleared");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// View History
// ============================================================================

/// List who viewed the caller's profile, newest first.
///
/// `GET /api/me/views`
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.id))]
pub async fn list_profile_views(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<ViewHistoryQuery>, QueryRejection>,
) -> ParticipantResult<Json<ViewHistoryResponse>> {
    let Query(query) = query?;
    query.validate()?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset;

    let total = queries::count_profile_views(&state.db, auth.id).await?;
    let items = queries::list_profile_views(&state.db, auth.id, limit, offset)
        .await?
        .into_iter()
        .map(ProfileView::from)
        .collect();

    Ok(Json(ViewHistoryResponse {
        items,
        total,
        limit,
        offset,
    }))
}
