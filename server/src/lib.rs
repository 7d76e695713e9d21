//! Velvet Server
//!
//! Participant visibility and access control for a membership-gated event
//! platform: who may see an event's guest list, and how much of each guest.

/// Log and return a database error with context.
///
/// Every query maps its error through this so failures are logged with the
/// query name and identifying fields before being propagated.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            tracing::error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod participants;
pub mod util;
