//! Angle helpers for the rotation search.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    angle_deg.to_radians().sin_cos()
}

/// Returns the candidate angles `k * step_deg` for `k >= 1` strictly below 360.
///
/// Angles are generated by multiplication rather than repeated addition so
/// that large counts do not drift.
pub(crate) fn candidate_angles(step_deg: f64) -> impl Iterator<Item = f64> {
    (1u64..)
        .map(move |k| k as f64 * step_deg)
        .take_while(|&angle| angle < 360.0)
}
