//! Rotation search: the best ZNCC score over rotated copies of a region.
//!
//! The second region is resampled at every multiple of the angular step below
//! 360 degrees and correlated against the first region; the unrotated score is
//! the baseline, so the result never falls below it.

use crate::image::{AnyImageView, Depth, ImageView, Region};
use crate::kernel::{Sample, WeightMap, ZnccConfig};
use crate::resample::Resampler;
use crate::util::{ZnccError, ZnccResult};

mod rotation;

/// Upper bound on the number of candidate angles a single search may score.
pub const MAX_CANDIDATE_ANGLES: usize = 360_000;

/// Rotation search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationConfig {
    /// Angular step in degrees; must be finite, positive and no finer than
    /// `360 / MAX_CANDIDATE_ANGLES`.
    pub step_deg: f64,
    /// Options for every correlation evaluated during the search.
    pub zncc: ZnccConfig,
    /// Evaluate candidate angles in parallel (requires the `rayon` feature,
    /// otherwise the search runs sequentially).
    pub parallel: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            step_deg: 10.0,
            zncc: ZnccConfig::default(),
            parallel: false,
        }
    }
}

impl RotationConfig {
    fn validate(&self) -> ZnccResult<()> {
        if !self.step_deg.is_finite() {
            return Err(ZnccError::InvalidAngleStep {
                reason: "step_deg must be finite",
            });
        }
        if self.step_deg <= 0.0 {
            return Err(ZnccError::InvalidAngleStep {
                reason: "step_deg must be > 0",
            });
        }
        if 360.0 / self.step_deg > MAX_CANDIDATE_ANGLES as f64 {
            return Err(ZnccError::InvalidAngleStep {
                reason: "step_deg yields too many candidate angles",
            });
        }
        Ok(())
    }
}

/// Best score found by the rotation search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatch {
    /// Highest ZNCC score over all evaluated angles.
    pub score: f64,
    /// Rotation of the second region that produced `score`, in degrees.
    pub angle_deg: f64,
}

/// Returns the best ZNCC score of `region1` against rotated copies of `region2`.
pub fn explore_rotation<R: Resampler + Sync>(
    image1: AnyImageView<'_>,
    region1: Region,
    image2: AnyImageView<'_>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &RotationConfig,
    resampler: &R,
) -> ZnccResult<f64> {
    best_rotation(image1, region1, image2, region2, weights, cfg, resampler).map(|m| m.score)
}

/// Like [`explore_rotation`], also reporting the winning angle.
pub fn best_rotation<R: Resampler + Sync>(
    image1: AnyImageView<'_>,
    region1: Region,
    image2: AnyImageView<'_>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &RotationConfig,
    resampler: &R,
) -> ZnccResult<RotationMatch> {
    if image1.depth() != image2.depth() {
        return Err(ZnccError::DepthMismatch {
            expected: image1.depth(),
            got: image2.depth(),
        });
    }
    match image1.depth() {
        Depth::Bool => {
            best_rotation_as::<bool, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
        Depth::U8 => {
            best_rotation_as::<u8, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
        Depth::I8 => {
            best_rotation_as::<i8, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
        Depth::U16 => {
            best_rotation_as::<u16, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
        Depth::I16 => {
            best_rotation_as::<i16, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
        Depth::F32 => {
            best_rotation_as::<f32, R>(image1, region1, image2, region2, weights, cfg, resampler)
        }
    }
}

fn best_rotation_as<T: Sample, R: Resampler + Sync>(
    image1: AnyImageView<'_>,
    region1: Region,
    image2: AnyImageView<'_>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &RotationConfig,
    resampler: &R,
) -> ZnccResult<RotationMatch> {
    let view1 = T::downcast(image1)?;
    let view2 = T::downcast(image2)?;
    best_rotation_view(view1, region1, view2, region2, weights, cfg, resampler)
}

/// Rotation search on typed views.
pub fn best_rotation_view<T: Sample, R: Resampler + Sync>(
    image1: ImageView<'_, T>,
    region1: Region,
    image2: ImageView<'_, T>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &RotationConfig,
    resampler: &R,
) -> ZnccResult<RotationMatch> {
    cfg.validate()?;
    let search = rotation::RotationSearch {
        image1,
        region1,
        image2,
        region2,
        weights,
        cfg,
        resampler,
    };

    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return search.run_par();
    }
    search.run()
}
