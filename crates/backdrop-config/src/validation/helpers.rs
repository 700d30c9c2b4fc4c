//! Shared range helpers used by the domain validators.

/// Push an error if `value` is outside `[min, max]` or not finite.
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Clamp `value` into `[min, max]`, replacing non-finite values with
/// `fallback`. Records a note when the value changed.
pub(crate) fn clamp_f64(
    notes: &mut Vec<String>,
    name: &str,
    value: &mut f64,
    (min, max): (f64, f64),
    fallback: f64,
) {
    let original = *value;
    let fixed = if original.is_finite() {
        original.clamp(min, max)
    } else {
        fallback
    };
    if fixed != original || !original.is_finite() {
        notes.push(format!("{name} = {original} adjusted to {fixed}"));
        *value = fixed;
    }
}
