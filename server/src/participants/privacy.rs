//! Privacy resolver.
//!
//! Merges a participant's per-event override over their global defaults.

use velvet_common::{PrivacyOverride, PrivacyPolicy};

/// Effective privacy policy of a participant within one event.
///
/// Each override field that is set wins; each unset field falls back to the
/// corresponding global default. An absent override yields the defaults.
pub fn resolve_policy(
    defaults: PrivacyPolicy,
    overrides: Option<&PrivacyOverride>,
) -> PrivacyPolicy {
    let Some(overrides) = overrides else {
        return defaults;
    };

    PrivacyPolicy {
        privacy_level: overrides.privacy_level.unwrap_or(defaults.privacy_level),
        allow_contact: overrides.allow_contact.unwrap_or(defaults.allow_contact),
        show_in_list: overrides.show_in_list.unwrap_or(defaults.show_in_list),
    }
}
