//! Participant Visibility
//!
//! Decides whether a viewer may see an event's participant list and which
//! profile fields of each participant they may see.
//!
//! Pipeline per request: access gate, privacy resolver, field redactor,
//! then a best-effort view log write.

pub mod access;
mod error;
pub mod exposure;
pub mod fields;
mod handlers;
pub mod models;
pub mod privacy;
pub mod queries;
pub mod redact;
pub mod service;
mod view_log;


use axum::{
    routing::{get, put},
    Router,
};

use crate::api::AppState;

pub use error::{ParticipantError, ParticipantResult};
pub use exposure::{ExposureTable, ExposureTableError, ExposureTier};
pub use fields::ParticipantFields;
pub use view_log::{ViewContext, ViewLogger};

/// Routes scoped to one event.
///
/// Routes:
/// - GET /access - Caller's access level
/// - PUT /access/{user_id} - Grant or change a member's access (organizer)
/// - GET /participants - Redacted participant list
/// - GET /participants/{user_id} - Redacted participant detail
/// - GET /privacy - Caller's privacy settings for the event
/// - PUT /privacy - Set the caller's privacy override
/// - DELETE /privacy - Clear the caller's privacy override
pub fn event_router() -> Router<AppState> {
    Router::new()
        .route("/access", get(handlers::check_access))
        .route("/access/{user_id}", put(handlers::grant_access))
        .route("/participants", get(handlers::list_participants))
        .route("/participants/{user_id}", get(handlers::get_participant))
        .route(
            "/privacy",
            get(handlers::get_event_privacy)
                .put(handlers::set_event_privacy)
                .delete(handlers::clear_event_privacy),
        )
}

/// Routes scoped to the caller.
///
/// Routes:
/// - GET /privacy - Global privacy defaults
/// - PUT /privacy - Replace global privacy defaults
/// - GET /views - Who viewed the caller's profile
pub fn me_router() -> Router<AppState> {
    Router::new()
        .route(
            "/privacy",
            get(handlers::get_privacy_defaults).put(handlers::update_privacy_defaults),
        )
        .route("/views", get(handlers::list_profile_views))
}
