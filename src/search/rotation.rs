//! Sequential and parallel rotation search drivers.

use crate::image::{ImageView, Region};
use crate::kernel::{compute_view, Sample, WeightMap};
use crate::resample::{Affine2, Resampler};
use crate::search::{RotationConfig, RotationMatch};
use crate::trace::{trace_event, trace_span};
use crate::util::math::candidate_angles;
use crate::util::ZnccResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub(crate) struct RotationSearch<'s, 'a, T, R> {
    pub(crate) image1: ImageView<'a, T>,
    pub(crate) region1: Region,
    pub(crate) image2: ImageView<'a, T>,
    pub(crate) region2: Region,
    pub(crate) weights: Option<WeightMap<'a>>,
    pub(crate) cfg: &'s RotationConfig,
    pub(crate) resampler: &'s R,
}

impl<T: Sample, R: Resampler + Sync> RotationSearch<'_, '_, T, R> {
    fn baseline(&self) -> ZnccResult<RotationMatch> {
        let score = compute_view(
            self.image1,
            self.region1,
            self.image2,
            self.region2,
            self.weights,
            &self.cfg.zncc,
        )?;
        Ok(RotationMatch {
            score,
            angle_deg: 0.0,
        })
    }

    /// Rotates `region2` about its centre into a fresh region-sized buffer and
    /// scores it against `region1`.
    ///
    /// The whole rotated canvas is correlated; content rotated out of the
    /// canvas is lost and uncovered corners hold `T::FILL`.
    fn score_at(&self, angle_deg: f64) -> ZnccResult<f64> {
        let (width, height) = self.region2.shape();
        let dst_center = ((width as f64 - 1.0) * 0.5, (height as f64 - 1.0) * 0.5);
        let src_center = (
            self.region2.x as f64 + dst_center.0,
            self.region2.y as f64 + dst_center.1,
        );
        let transform = Affine2::rotation_about(angle_deg, src_center, dst_center);
        let rotated = self
            .resampler
            .warp(self.image2, &transform, width, height, T::FILL)?;
        compute_view(
            self.image1,
            self.region1,
            rotated.view(),
            Region::full(width, height),
            self.weights,
            &self.cfg.zncc,
        )
    }

    pub(crate) fn run(&self) -> ZnccResult<RotationMatch> {
        let _span = trace_span!("explore_rotation", step_deg = self.cfg.step_deg).entered();

        let mut best = self.baseline()?;
        if self.region2.is_empty() {
            return Ok(best);
        }
        for angle_deg in candidate_angles(self.cfg.step_deg) {
            let score = self.score_at(angle_deg)?;
            if score > best.score {
                best = RotationMatch { score, angle_deg };
            }
        }

        trace_event!("rotation_best", score = best.score, angle_deg = best.angle_deg);
        Ok(best)
    }

    /// Scores every candidate angle in parallel; the reduction walks results in
    /// angle order so ties resolve exactly as in [`RotationSearch::run`].
    #[cfg(feature = "rayon")]
    pub(crate) fn run_par(&self) -> ZnccResult<RotationMatch> {
        let _span = trace_span!(
            "explore_rotation",
            step_deg = self.cfg.step_deg,
            parallel = true
        )
        .entered();

        let mut best = self.baseline()?;
        if self.region2.is_empty() {
            return Ok(best);
        }
        let angles: Vec<f64> = candidate_angles(self.cfg.step_deg).collect();
        let scores: Vec<ZnccResult<f64>> = angles
            .par_iter()
            .map(|&angle_deg| self.score_at(angle_deg))
            .collect();
        for (angle_deg, score) in angles.into_iter().zip(scores) {
            let score = score?;
            if score > best.score {
                best = RotationMatch { score, angle_deg };
            }
        }

        trace_event!("rotation_best", score = best.score, angle_deg = best.angle_deg);
        Ok(best)
    }
}
