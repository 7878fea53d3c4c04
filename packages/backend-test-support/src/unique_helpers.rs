//! Unique test data built on ULIDs so parallel tests never collide.

use ulid::Ulid;

/// Unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("note");
/// let id2 = unique_str("note");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("note-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Unique, lowercase email address in the format `{prefix}-{ulid}@example.test`.
///
/// The ULID is lowercased because the backend normalizes emails on signup.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("Signup");
/// assert!(email.starts_with("signup-"));
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
