//! Device serial-number normalization and format validation.
//!
//! Scanners emit serials with stray whitespace, inconsistent casing, and
//! the occasional embedded tab or newline. [`normalize_serial`] collapses
//! any raw scan into the canonical comparison key that is stored in the
//! database, so uniqueness is effectively case-insensitive.

/// Minimum canonical serial length.
pub const SERIAL_MIN_LEN: usize = 6;

/// Maximum canonical serial length (matches `VARCHAR(32)` in the schema).
pub const SERIAL_MAX_LEN: usize = 32;

/// Canonicalize a raw scanned or typed serial.
///
/// Strips ALL whitespace (spaces, tabs, newlines, anywhere in the
/// string) and upper-cases the remainder. Whitespace-only input yields an
/// empty string; callers must treat that as a rejected scan themselves.
/// Pure and infallible.
///
/// # Examples
///
/// ```
/// use burnrack_core::serial::normalize_serial;
///
/// assert_eq!(normalize_serial(" m23 00 "), "M2300");
/// assert_eq!(normalize_serial("dr-001\t7"), "DR-0017");
/// assert_eq!(normalize_serial("   "), "");
/// ```
pub fn normalize_serial(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Check a canonical serial against the accepted format:
/// 6 to 32 characters from `A-Z`, `0-9`, `.`, `_`, `-`.
///
/// Expects already-normalized input; lowercase letters fail the check.
pub fn is_valid_serial(serial: &str) -> bool {
    if serial.len() < SERIAL_MIN_LEN || serial.len() > SERIAL_MAX_LEN {
        return false;
    }
    serial
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // normalize_serial
    // -----------------------------------------------------------------------

    #[test]
    fn strips_surrounding_whitespace_and_uppercases() {
        assert_eq!(normalize_serial(" m23 00 "), "M2300");
    }

    #[test]
    fn strips_interior_tabs_and_newlines() {
        assert_eq!(normalize_serial("ab\tcd\nef"), "ABCDEF");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(normalize_serial(" \t\n "), "");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_serial(""), "");
    }

    #[test]
    fn already_canonical_is_unchanged() {
        assert_eq!(normalize_serial("DRONE-0042"), "DRONE-0042");
    }

    // -----------------------------------------------------------------------
    // is_valid_serial
    // -----------------------------------------------------------------------

    #[test]
    fn accepts_minimum_length() {
        assert!(is_valid_serial("ABC123"));
    }

    #[test]
    fn accepts_maximum_length() {
        assert!(is_valid_serial(&"A".repeat(32)));
    }

    #[test]
    fn accepts_allowed_punctuation() {
        assert!(is_valid_serial("DR-00_1.7"));
    }

    #[test]
    fn rejects_too_short() {
        assert!(!is_valid_serial("AB123"));
    }

    #[test]
    fn rejects_too_long() {
        assert!(!is_valid_serial(&"A".repeat(33)));
    }

    #[test]
    fn rejects_empty() {
        assert!(!is_valid_serial(""));
    }

    #[test]
    fn rejects_lowercase() {
        assert!(!is_valid_serial("abc123"));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(!is_valid_serial("ABC 123"));
        assert!(!is_valid_serial("ABC#123"));
        assert!(!is_valid_serial("ÄBC123"));
    }

    #[test]
    fn normalized_scan_passes_validation() {
        let canonical = normalize_serial(" dr-00 17 ");
        assert_eq!(canonical, "DR-0017");
        assert!(is_valid_serial(&canonical));
    }
}
