//! Authentication
//!
//! Bearer token validation for the participant API. Tokens are issued
//! elsewhere on the platform; this service verifies them and resolves the
//! viewer.

mod error;
pub mod jwt;
mod middleware;

pub use error::{AuthError, AuthResult, ErrorResponse};
pub use middleware::{require_auth, AuthUser};
