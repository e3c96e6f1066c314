//! Proptest generators for property-based testing.

use proptest::prelude::*;

use permgrid_core::{AccessRecord, FileName, PermissionSet, UpdateAction, UpdateRecord, UserId};

/// Generate an arbitrary permission mask.
pub fn permission_set() -> impl Strategy<Value = PermissionSet> {
    (0u8..8).prop_map(PermissionSet::from_bits)
}

/// Generate a non-empty permission mask.
pub fn non_empty_permission_set() -> impl Strategy<Value = PermissionSet> {
    (1u8..8).prop_map(PermissionSet::from_bits)
}

/// Generate permission text with arbitrary order, duplicates, and noise
/// characters the decoder must skip.
pub fn permission_text() -> impl Strategy<Value = String> {
    "[orwx0 ]{0,8}".prop_map(String::from)
}

/// Generate a user id.
pub fn user_id() -> impl Strategy<Value = UserId> {
    "[a-z][a-z0-9]{0,11}".prop_map(UserId::new)
}

/// Generate a file name.
pub fn file_name() -> impl Strategy<Value = FileName> {
    "[a-z][a-z0-9_-]{0,11}(\\.[a-z]{1,3})?".prop_map(FileName::new)
}

/// Generate a grant record.
pub fn access_record() -> impl Strategy<Value = AccessRecord> {
    (user_id(), file_name(), non_empty_permission_set())
        .prop_map(|(user, file, permissions)| AccessRecord::new(user, file, permissions))
}

/// Generate an update record, biased toward grants so revokes usually
/// have something to hit.
pub fn update_record() -> impl Strategy<Value = UpdateRecord> {
    (
        prop_oneof![
            3 => Just(UpdateAction::Grant),
            1 => Just(UpdateAction::Revoke),
        ],
        user_id(),
        file_name(),
        non_empty_permission_set(),
    )
        .prop_map(|(action, user, file, permissions)| {
            UpdateRecord::new(action, user, file, permissions)
        })
}
