//! Derived guest links
//!
//! The slug and the canonical guest URL are derived in one place and shared by
//! the welcome page and the PDF download, so the two can never disagree about
//! where an artifact lives.

/// Length of the date prefix used to match a guest's creation time
const DATE_PREFIX_LENGTH: usize = 10;

/// Deterministic filesystem-safe key for a guest's generated artifacts
///
/// Lowercased guest name with spaces as hyphens, followed by the creation
/// timestamp with colons and hyphens stripped:
///
/// ```text
/// ("Jane Doe", "2024-05-01T10:00:00.000Z") -> "jane-doe-20240501t100000.000z"
/// ```
pub fn slug(guest_name: &str, created: &str) -> String {
    let name = guest_name.to_lowercase().replace(' ', "-");
    let timestamp = created.to_lowercase().replace([':', '-'], "");

    format!("{name}-{timestamp}")
}

/// The externally reachable link both the QR code and the PDF render target
///
/// Path segments are kept exactly as the caller supplied them
pub fn canonical_url(base_url: &str, guest_name: &str, created: &str) -> String {
    format!("{base_url}/guest/{guest_name}/{created}")
}

/// The date part of a creation timestamp, its first ten characters
///
/// Used to match a request against the creation times the directory reports
pub fn created_prefix(created: &str) -> &str {
    match created.char_indices().nth(DATE_PREFIX_LENGTH) {
        Some((index, _)) => &created[..index],
        None => created,
    }
}
