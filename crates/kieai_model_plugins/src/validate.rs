//! Field-level validation helpers shared by the capability modules.

use kieai_core::SdkError;

/// Rejects an empty or whitespace-only value.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), SdkError> {
    if value.trim().is_empty() {
        return Err(SdkError::validation_field(
            field,
            format!("{field} is required"),
        ));
    }
    Ok(())
}

/// Rejects a value longer than `max` characters.
pub(crate) fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), SdkError> {
    if value.chars().count() > max {
        return Err(SdkError::validation_field(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Rejects a value outside the inclusive `[min, max]` range.
pub(crate) fn in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), SdkError> {
    if !(min..=max).contains(&value) {
        return Err(SdkError::validation_field(
            field,
            format!("{field} must be between {min} and {max}"),
        ));
    }
    Ok(())
}
