//! Database Integration Tests
//!
//! Member and event queries against PostgreSQL.

#[cfg(test)]
mod postgres_tests {
    use super::super::*;
    use chrono::Utc;
    use sqlx::PgPool;
    use uuid::Uuid;
    use velvet_common::{PrivacyLevel, PrivacyPolicy};

    fn member(username: &str) -> NewUser<'_> {
        NewUser {
            username,
            display_name: "Test Member",
            ..NewUser::default()
        }
    }

    // ========================================================================
    // User Tests
    // ========================================================================

    #[sqlx::test]
    async fn test_create_and_find_user(pool: PgPool) {
        let user = create_user(
            &pool,
            &NewUser {
                username: "amelie",
                display_name: "Amélie Laurent",
                email: Some("amelie@example.com"),
                membership_tier: Some("gold"),
                city: Some("Paris"),
                ..NewUser::default()
            },
        )
        .await
        .expect("Failed to create user");

        assert_eq!(user.username, "amelie");
        assert_eq!(user.membership_tier.as_deref(), Some("gold"));

        let found = find_user_by_id(&pool, user.id)
            .await
            .expect("Query failed")
            .expect("User not found");
        assert_eq!(found.id, user.id);
        assert_eq!(found.city.as_deref(), Some("Paris"));
    }

    #[sqlx::test]
    async fn test_new_user_gets_default_privacy(pool: PgPool) {
        let user = create_user(&pool, &member("defaults"))
            .await
            .expect("Failed to create user");

        assert_eq!(user.privacy_defaults(), PrivacyPolicy::default());
        assert_eq!(user.privacy_level, PrivacyLevel::DEFAULT);
    }

    #[sqlx::test]
    async fn test_username_uniqueness(pool: PgPool) {
        create_user(&pool, &member("duplicate"))
            .await
            .expect("Failed to create first user");

        let result = create_user(&pool, &member("duplicate")).await;
        assert!(result.is_err(), "Should fail on duplicate username");
    }

    #[sqlx::test]
    async fn test_find_missing_user(pool: PgPool) {
        let found = find_user_by_id(&pool, Uuid::new_v4())
            .await
            .expect("Query failed");
        assert!(found.is_none());
    }

    #[sqlx::test]
    async fn test_update_privacy_defaults(pool: PgPool) {
        let user = create_user(&pool, &member("private"))
            .await
            .expect("Failed to create user");

        let policy = PrivacyPolicy {
            privacy_level: PrivacyLevel::PRIVATE,
            allow_contact: false,
            show_in_list: false,
        };
        let updated = update_privacy_defaults(&pool, user.id, policy)
            .await
            .expect("Query failed")
            .expect("User not found");

        assert_eq!(updated.privacy_defaults(), policy);
        assert!(updated.updated_at >= user.updated_at);

        let missing = update_privacy_defaults(&pool, Uuid::new_v4(), policy)
            .await
            .expect("Query failed");
        assert!(missing.is_none());
    }

    #[sqlx::test]
    async fn test_privacy_level_check_constraint(pool: PgPool) {
        let user = create_user(&pool, &member("outofrange"))
            .await
            .expect("Failed to create user");

        let result = sqlx::query("UPDATE users SET privacy_level = 6 WHERE id = $1")
            .bind(user.id)
            .execute(&pool)
            .await;
        assert!(result.is_err(), "Privacy level above 5 must be rejected");
    }

    // ========================================================================
    // Event Tests
    // ========================================================================

    #[sqlx::test]
    async fn test_create_and_find_event(pool: PgPool) {
        let organizer = create_user(&pool, &member("organizer"))
            .await
            .expect("Failed to create user");
        let starts_at = Utc::now();

        let event = create_event(&pool, "Gala at the Villa", organizer.id, starts_at)
            .await
            .expect("Failed to create event");
        assert_eq!(event.organizer_id, organizer.id);

        let found = find_event_by_id(&pool, event.id)
            .await
            .expect("Query failed")
            .expect("Event not found");
        assert_eq!(found.title, "Gala at the Villa");

        assert!(find_event_by_id(&pool, Uuid::new_v4())
            .await
            .expect("Query failed")
            .is_none());
    }

    #[sqlx::test]
    async fn test_ping(pool: PgPool) {
        ping(&pool).await.expect("Ping failed");
    }
}
