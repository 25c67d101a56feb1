//! Scalar accumulation loop and score derivation.

use crate::image::ImageView;
use crate::kernel::sample::Sample;

/// Minimum fraction of valid weight below which the score is forced to zero.
pub const MIN_VALID_FRACTION: f64 = 0.5;

/// Relative variance at or below which a region is treated as constant:
/// a few ulps of the second moment, the rounding noise of the one-pass formula.
const DEGENERATE_REL_VAR: f64 = 4.0 * f64::EPSILON;

/// Weighted running sums over a pair of regions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    /// Weight of every visited sample pair, valid or not.
    pub total: f64,
    /// Weight of the valid sample pairs.
    pub count: f64,
    pub sum1: f64,
    pub sum2: f64,
    pub sum_sq1: f64,
    pub sum_sq2: f64,
    pub sum_cross: f64,
}

impl Moments {
    #[inline(always)]
    fn push(&mut self, v1: f64, v2: f64, w: f64) {
        self.count += w;
        self.sum1 += v1 * w;
        self.sum2 += v2 * w;
        self.sum_sq1 += v1 * v1 * w;
        self.sum_sq2 += v2 * v2 * w;
        self.sum_cross += v1 * v2 * w;
    }

    /// Fraction of the visited weight that came from valid pairs.
    pub fn valid_fraction(&self) -> f64 {
        self.count / self.total
    }

    /// Derives the ZNCC score from the accumulated sums.
    ///
    /// With `excluded` set, a valid fraction below [`MIN_VALID_FRACTION`]
    /// yields `0.0`. Zero valid weight or a constant region also yields `0.0`;
    /// the result is never `NaN`.
    pub fn finish(&self, excluded: bool) -> f64 {
        if excluded && self.valid_fraction() < MIN_VALID_FRACTION {
            return 0.0;
        }
        if self.count <= 0.0 || !self.count.is_finite() {
            return 0.0;
        }

        let mean1 = self.sum1 / self.count;
        let mean2 = self.sum2 / self.count;
        let second1 = self.sum_sq1 / self.count;
        let second2 = self.sum_sq2 / self.count;
        let var1 = second1 - mean1 * mean1;
        let var2 = second2 - mean2 * mean2;
        if var1 <= DEGENERATE_REL_VAR * second1 || var2 <= DEGENERATE_REL_VAR * second2 {
            return 0.0;
        }

        let score = (self.sum_cross / self.count - mean1 * mean2) / (var1.sqrt() * var2.sqrt());
        if score.is_finite() {
            score
        } else {
            0.0
        }
    }
}

/// Walks two congruent views in row-major lock-step and accumulates moments.
///
/// `EXCLUDE` skips pairs where either sample equals one of `bounds`;
/// `WEIGHTED` reads one weight per sample from `weights` in visiting order,
/// otherwise every sample weighs `1.0`.
pub(crate) fn accumulate<T: Sample, const EXCLUDE: bool, const WEIGHTED: bool>(
    view1: ImageView<'_, T>,
    view2: ImageView<'_, T>,
    bounds: (T, T),
    weights: &[f32],
) -> Moments {
    debug_assert_eq!(view1.width(), view2.width());
    debug_assert_eq!(view1.height(), view2.height());
    debug_assert_eq!(view1.channels(), view2.channels());

    let (low, high) = bounds;
    let mut weights = weights.iter();
    let mut m = Moments::default();

    for y in 0..view1.height() {
        let (Some(row1), Some(row2)) = (view1.row(y), view2.row(y)) else {
            break;
        };
        for (&v1, &v2) in row1.iter().zip(row2) {
            let w = if WEIGHTED {
                weights.next().map_or(0.0, |&w| f64::from(w))
            } else {
                1.0
            };
            if EXCLUDE {
                m.total += w;
                if v1 == low || v1 == high || v2 == low || v2 == high {
                    continue;
                }
            }
            m.push(v1.to_f64(), v2.to_f64(), w);
        }
    }

    m
}
