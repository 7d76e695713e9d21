//! Profile view log.
//!
//! Records who viewed whom, at which access level. Writes happen off the
//! request path; failures are logged and never surface to the viewer.

use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;
use velvet_common::{AccessLevel, ViewKind};

use super::models::NewViewLogEntry;
use super::queries;

/// Request metadata attached to each view.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Background writer for the profile view log.
#[derive(Clone)]
pub struct ViewLogger {
    pool: PgPool,
    enabled: bool,
}

impl ViewLogger {
    pub const fn new(pool: PgPool, enabled: bool) -> Self {
        Self { pool, enabled }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Build one entry per viewed subject.
    pub fn entries(
        viewer_id: Uuid,
        event_id: Uuid,
        access_level: AccessLevel,
        kind: ViewKind,
        subjects: impl IntoIterator<Item = Uuid>,
        ctx: &ViewContext,
    ) -> Vec<NewViewLogEntry> {
        subjects
            .into_iter()
            .filter(|subject_id| *subject_id != viewer_id)
            .map(|subject_id| NewViewLogEntry {
                viewer_id,
                subject_id,
                event_id,
                access_level,
                kind,
                ip_address: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
            })
            .collect()
    }

    /// Append entries without blocking the caller.
    pub fn record(&self, entries: Vec<NewViewLogEntry>) {
        if !self.enabled || entries.is_empty() {
            return;
        }

        let pool = self.pool.clone();
        tokio::spawn(async move {
            let count = entries.len();
            if let Err(e) = queries::insert_view_log(&pool, &entries).await {
                warn!(error = %e, count, "Failed to record profile views");
            } else {
                debug!(count, "Recorded profile views");
            }
        });
    }
}
