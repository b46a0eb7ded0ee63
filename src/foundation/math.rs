/// Replace NaN and infinities with `fallback`.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// Format with exactly one decimal place (`30` -> `30.0`).
pub(crate) fn fmt_fixed1(v: f64) -> String {
    let s = format!("{:.1}", finite_or(v, 0.0));
    if s == "-0.0" { "0.0".to_owned() } else { s }
}

/// Format with at most two decimal places, trailing zeros trimmed (`189.00` -> `189`).
pub(crate) fn fmt_trimmed(v: f64) -> String {
    let s = format!("{:.2}", finite_or(v, 0.0));
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
