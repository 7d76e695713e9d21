//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum router,
//! plus utilities for member, event, and access setup and JWT generation.
//!
//! ## Shared Resources
//!
//! Use [`shared_pool()`] to avoid creating new connections per test. The pool
//! runs migrations once on first use.
//!
//! ## Cleanup Guards
//!
//! Use [`CleanupGuard`] for RAII-based cleanup that runs even if a test panics.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;
use velvet_common::{AccessLevel, PaymentStatus};
use velvet_server::api::{create_router, AppState};
use velvet_server::auth::jwt;
use velvet_server::config::Config;
use velvet_server::db::{self, NewUser};
use velvet_server::participants::queries;

// ============================================================================
// Shared resources
// ============================================================================

/// Shared database pool across all tests in the same binary.
static SHARED_POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Shared config across all tests in the same binary.
static SHARED_CONFIG: OnceCell<Config> = OnceCell::const_new();

/// Get or create a shared database pool.
pub async fn shared_pool() -> &'static PgPool {
    SHARED_POOL
        .get_or_init(|| async {
            let config = shared_config().await;
            let pool = db::create_pool(&config.database_url, config.database_max_connections)
                .await
                .expect("Failed to connect to test DB");
            db::run_migrations(&pool)
                .await
                .expect("Failed to run migrations");
            pool
        })
        .await
}

/// Get or create a shared config.
pub async fn shared_config() -> &'static Config {
    SHARED_CONFIG
        .get_or_init(|| async { Config::default_for_test() })
        .await
}

// ============================================================================
// Cleanup Guard
// ============================================================================

/// Async cleanup action type.
type CleanupAction = Box<dyn FnOnce(PgPool) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// RAII guard that runs cleanup actions on drop, even if the test panics.
pub struct CleanupGuard {
    pool: PgPool,
    actions: Vec<CleanupAction>,
}

impl CleanupGuard {
    /// Create a new cleanup guard for the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            actions: Vec::new(),
        }
    }

    /// Register a generic async cleanup action.
    pub fn add<F, Fut>(&mut self, action: F)
    where
        F: FnOnce(PgPool) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.actions
            .push(Box::new(move |pool| Box::pin(action(pool))));
    }

    /// Register cleanup to delete a member by ID.
    pub fn delete_user(&mut self, user_id: Uuid) {
        self.add(move |pool| async move {
            let _ = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user_id)
                .execute(&pool)
                .await;
        });
    }

    /// Register cleanup to delete an event (cascades to access, overrides, views).
    pub fn delete_event(&mut self, event_id: Uuid) {
        self.add(move |pool| async move {
            let _ = sqlx::query("DELETE FROM events WHERE id = $1")
                .bind(event_id)
                .execute(&pool)
                .await;
        });
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let actions = std::mem::take(&mut self.actions);
        if actions.is_empty() {
            return;
        }

        let pool = self.pool.clone();
        let handle = tokio::runtime::Handle::current();

        // Actions run in reverse registration order so events go before
        // their organizers.
        std::thread::spawn(move || {
            handle.block_on(async move {
                for action in actions.into_iter().rev() {
                    action(pool.clone()).await;
                }
            });
        })
        .join()
        .expect("Cleanup thread panicked");
    }
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Create a new test app using the shared DB connection.
    pub async fn new() -> Self {
        Self::with_config(shared_config().await.clone()).await
    }

    /// Create a test app with a custom config.
    pub async fn with_config(config: Config) -> Self {
        let pool = shared_pool().await.clone();
        let state = AppState::new(pool.clone(), config.clone());

        Self {
            router: create_router(state),
            pool,
            config: Arc::new(config),
        }
    }

    /// Create a test app whose pool never connects.
    ///
    /// For requests rejected before any query runs.
    pub fn offline() -> Self {
        let config = Config::default_for_test();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("Failed to build lazy pool");
        let state = AppState::new(pool.clone(), config.clone());

        Self {
            router: create_router(state),
            pool,
            config: Arc::new(config),
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build an authenticated request for `user_id`.
    pub fn authed(&self, method: Method, uri: &str, user_id: Uuid) -> http::request::Builder {
        let token = generate_access_token(&self.config, user_id);
        Self::request(method, uri).header("Authorization", format!("Bearer {token}"))
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// Create a [`CleanupGuard`] for this app's pool.
    pub fn cleanup_guard(&self) -> CleanupGuard {
        CleanupGuard::new(self.pool.clone())
    }
}

// ============================================================================
// Member, Event & Auth helpers
// ============================================================================

/// Create a test member with a full profile and return its ID.
pub async fn create_test_user(pool: &PgPool, display_name: &str) -> Uuid {
    let test_id = Uuid::new_v4().simple().to_string()[..12].to_string();
    let username = format!("httptest_{test_id}");
    let email = format!("{username}@example.com");

    db::create_user(
        pool,
        &NewUser {
            username: &username,
            display_name,
            email: Some(&email),
            phone: Some("+33 1 00 00 00 00"),
            membership_tier: Some("black"),
            avatar_url: Some("https://cdn.example/avatar.jpg"),
            city: Some("Monaco"),
            company: Some("Maison Test"),
            job_title: Some("Director"),
            bio: Some("Test biography"),
            social_url: Some("https://social.example/test"),
        },
    )
    .await
    .expect("Failed to create test user")
    .id
}

/// Create an event organised by `organizer_id` and return its ID.
pub async fn create_test_event(pool: &PgPool, organizer_id: Uuid) -> Uuid {
    db::create_event(pool, "Test Gala", organizer_id, Utc::now())
        .await
        .expect("Failed to create test event")
        .id
}

/// Admit a member to an event with a paid access record.
pub async fn admit(pool: &PgPool, user_id: Uuid, event_id: Uuid, level: AccessLevel) {
    queries::upsert_participant_access(pool, user_id, event_id, true, PaymentStatus::Paid, level)
        .await
        .expect("Failed to grant access");
}

/// Generate an access token for the given member.
pub fn generate_access_token(config: &Config, user_id: Uuid) -> String {
    let private_key = config
        .jwt_private_key
        .as_deref()
        .expect("Test config must carry a signing key");
    jwt::generate_access_token(user_id, private_key, config.jwt_access_expiry)
        .expect("Failed to generate access token")
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}
