//! Test helpers for generating unique test data
//!
//! Integration tests share one process, so names that must not collide
//! (guest names, category labels) get a random suffix.

use uuid::Uuid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("guest");
/// let id2 = unique_str("guest");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("guest-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &suffix[..12])
}

/// Unique guest display name that fits the 32 character limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_guest_name;
///
/// let name = unique_guest_name("alice");
/// assert!(name.chars().count() <= 32);
/// assert!(name.starts_with("alice-"));
/// ```
pub fn unique_guest_name(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(19).collect();
    unique_str(&prefix)
}

/// Unique positive user id for authenticated test players.
pub fn unique_user_id() -> i64 {
    let bytes = Uuid::new_v4().as_u128();
    ((bytes >> 65) as i64).max(1)
}
