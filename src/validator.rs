//! Registration-number plausibility check.

/// Whether a spreadsheet cell value looks like a vehicle registration
/// number: at least 4 characters after trimming, with at least one letter
/// and at least one digit.
///
/// Deliberately coarse — plate formats vary too much across eras and
/// countries for a structural check, and a false negative would silently
/// skip a legitimate vehicle.
pub fn is_plausible_registration(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().count() >= 4
        && trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed.chars().any(|c| c.is_ascii_digit())
}
