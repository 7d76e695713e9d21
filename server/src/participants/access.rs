//! Access gate.
//!
//! Decides a viewer's access level for an event from their participant
//! access record. Pure functions; loading happens in `service`.

use velvet_common::AccessLevel;

use super::models::ParticipantAccess;

/// Effective access level of a viewer for an event.
///
/// Resolution order:
/// 1. The event organizer always has full access
/// 2. No record means no access
/// 3. A record that is not granted, or whose payment is unsettled, means no access
/// 4. Otherwise the stored level applies
pub fn effective_access_level(
    record: Option<&ParticipantAccess>,
    is_organizer: bool,
) -> AccessLevel {
    if is_organizer {
        return AccessLevel::Full;
    }

    match record {
        Some(r) if r.access_granted && r.payment_status.is_settled() => r.access_level,
        _ => AccessLevel::None,
    }
}

/// Whether a viewer may initiate contact with a participant.
pub const fn can_initiate_contact(access: AccessLevel, target_allows_contact: bool) -> bool {
    access.has_access() && target_allows_contact
}

/// Require at least `required` access.
pub fn require_access(
    actual: AccessLevel,
    required: AccessLevel,
) -> Result<(), super::ParticipantError> {
    if actual >= required {
        Ok(())
    } else {
        Err(super::ParticipantError::AccessDenied { required, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use velvet_common::PaymentStatus;

    fn record(granted: bool, payment: PaymentStatus, level: AccessLevel) -> ParticipantAccess {
        ParticipantAccess {
            user_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            access_granted: granted,
            payment_status: payment,
            access_level: level,
            granted_at: granted.then(Utc::now),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_record_is_no_access() {
        assert_eq!(effective_access_level(None, false), AccessLevel::None);
    }

    #[test]
    fn test_organizer_has_full_access_without_record() {
        assert_eq!(effective_access_level(None, true), AccessLevel::Full);
    }

    #[test]
    fn test_granted_paid_record_uses_stored_level() {
        let r = record(true, PaymentStatus::Paid, AccessLevel::Basic);
        assert_eq!(effective_access_level(Some(&r), false), AccessLevel::Basic);

        let r = record(true, PaymentStatus::Waived, AccessLevel::Full);
        assert_eq!(effective_access_level(Some(&r), false), AccessLevel::Full);
    }

    #[test]
    fn test_ungranted_record_is_no_access() {
        let r = record(false, PaymentStatus::Paid, AccessLevel::Full);
        assert_eq!(effective_access_level(Some(&r), false), AccessLevel::None);
    }

    #[test]
    fn test_unsettled_payment_is_no_access() {
        for status in [PaymentStatus::Pending, PaymentStatus::Refunded] {
            let r = record(true, status, AccessLevel::Full);
            assert_eq!(effective_access_level(Some(&r), false), AccessLevel::None);
        }
    }

    #[test]
    fn test_contact_requires_access_and_consent() {
        assert!(can_initiate_contact(AccessLevel::Basic, true));
        assert!(can_initiate_contact(AccessLevel::Full, true));
        assert!(!can_initiate_contact(AccessLevel::Full, false));
        assert!(!can_initiate_contact(AccessLevel::None, true));
    }

    #[test]
    fn test_require_access() {
        assert!(require_access(AccessLevel::Full, AccessLevel::Basic).is_ok());
        assert!(require_access(AccessLevel::Basic, AccessLevel::Basic).is_ok());
        assert!(matches!(
            require_access(AccessLevel::None, AccessLevel::Basic),
            Err(super::super::ParticipantError::AccessDenied { .. })
        ));
    }
}
