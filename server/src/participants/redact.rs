//! Field redactor.
//!
//! Applies an effective privacy policy and a viewer access level to a
//! participant profile. Deterministic and side-effect free.

use velvet_common::{AccessLevel, PrivacyPolicy, RedactedParticipant};

use super::access::can_initiate_contact;
use super::exposure::ExposureTable;
use super::fields::ParticipantFields;
use super::models::ParticipantProfile;

/// Fields of a participant exposed to a viewer.
///
/// Name and membership tier are always included. Contact fields are removed
/// when the participant does not allow contact.
pub fn exposed_fields(
    policy: &PrivacyPolicy,
    access: AccessLevel,
    table: &ExposureTable,
) -> ParticipantFields {
    let mut fields =
        table.fields_for(policy.privacy_level, access) | ParticipantFields::IDENTITY;
    if !policy.allow_contact {
        fields -= ParticipantFields::CONTACT;
    }
    fields
}

/// Redact a participant profile for one viewer.
pub fn redact(
    profile: ParticipantProfile,
    policy: &PrivacyPolicy,
    access: AccessLevel,
    table: &ExposureTable,
) -> RedactedParticipant {
    let fields = exposed_fields(policy, access, table);
    let keep = |field: ParticipantFields, value: Option<String>| {
        if fields.has(field) {
            value
        } else {
            None
        }
    };

    RedactedParticipant {
        user_id: profile.user_id,
        display_name: profile.display_name,
        membership_tier: profile.membership_tier,
        avatar_url: keep(ParticipantFields::AVATAR, profile.avatar_url),
        city: keep(ParticipantFields::CITY, profile.city),
        company: keep(ParticipantFields::COMPANY, profile.company),
        job_title: keep(ParticipantFields::JOB_TITLE, profile.job_title),
        bio: keep(ParticipantFields::BIO, profile.bio),
        social_url: keep(ParticipantFields::SOCIAL, profile.social_url),
        email: keep(ParticipantFields::EMAIL, profile.email),
        phone: keep(ParticipantFields::PHONE, profile.phone),
        privacy_level: policy.privacy_level,
        can_contact: can_initiate_contact(access, policy.allow_contact),
    }
}
