//! Affine resampling used by the rotation search.
//!
//! The search only needs "warp this source into a new buffer of a given size";
//! it receives that capability through the [`Resampler`] trait so that any
//! interpolation scheme, or a deterministic fake in tests, can be plugged in.

use crate::image::{ImageView, OwnedImage};
use crate::kernel::Sample;
use crate::util::math::sin_cos_deg;
use crate::util::ZnccResult;

/// 2x3 affine transform mapping destination pixel coordinates to source
/// coordinates, stored row-major as `[a, b, c, d, e, f]`:
/// `src_x = a * x + b * y + c`, `src_y = d * x + e * y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2(pub [f64; 6]);

impl Affine2 {
    /// Transform that leaves coordinates unchanged.
    pub fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    /// Rotation by `angle_deg` taking `dst_center` onto `src_center`.
    ///
    /// A destination offset `(dx, dy)` from `dst_center` samples the source at
    /// `src_center + (cos * dx + sin * dy, -sin * dx + cos * dy)`.
    pub fn rotation_about(angle_deg: f64, src_center: (f64, f64), dst_center: (f64, f64)) -> Self {
        let (sin_a, cos_a) = sin_cos_deg(angle_deg);
        let (scx, scy) = src_center;
        let (dcx, dcy) = dst_center;
        Self([
            cos_a,
            sin_a,
            scx - cos_a * dcx - sin_a * dcy,
            -sin_a,
            cos_a,
            scy + sin_a * dcx - cos_a * dcy,
        ])
    }

    /// Maps a destination coordinate to the source.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + b * y + c, d * x + e * y + f)
    }
}

/// Produces a new image by sampling a source through an affine transform.
pub trait Resampler {
    /// Warps `src` into a `width x height` image with the same channel count.
    ///
    /// Destination pixels whose source coordinate falls outside `src` are set
    /// to `fill`.
    fn warp<T: Sample>(
        &self,
        src: ImageView<'_, T>,
        transform: &Affine2,
        width: usize,
        height: usize,
        fill: T,
    ) -> ZnccResult<OwnedImage<T>>;
}

/// Bilinear resampler.
///
/// Interpolation happens in `f64` per channel; results go back through
/// [`Sample::from_f64`], so integral samples are rounded and saturated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bilinear;

impl Resampler for Bilinear {
    fn warp<T: Sample>(
        &self,
        src: ImageView<'_, T>,
        transform: &Affine2,
        width: usize,
        height: usize,
        fill: T,
    ) -> ZnccResult<OwnedImage<T>> {
        let channels = src.channels();
        let mut out = OwnedImage::filled(fill, width, height, channels)?.into_vec();

        let src_w = src.width();
        let src_h = src.height();
        let max_x = src_w as f64 - 1.0;
        let max_y = src_h as f64 - 1.0;
        let epsilon = 1e-9;

        for y in 0..height {
            for x in 0..width {
                let (src_x, src_y) = transform.apply(x as f64, y as f64);
                if !src_x.is_finite()
                    || !src_y.is_finite()
                    || src_x < -epsilon
                    || src_y < -epsilon
                    || src_x > max_x + epsilon
                    || src_y > max_y + epsilon
                {
                    continue;
                }

                let src_x = src_x.clamp(0.0, max_x);
                let src_y = src_y.clamp(0.0, max_y);
                let x0 = src_x.floor() as usize;
                let y0 = src_y.floor() as usize;
                let x1 = (x0 + 1).min(src_w - 1);
                let y1 = (y0 + 1).min(src_h - 1);
                let fx = src_x - x0 as f64;
                let fy = src_y - y0 as f64;

                let (Some(row0), Some(row1)) = (src.row(y0), src.row(y1)) else {
                    continue;
                };
                let w00 = (1.0 - fx) * (1.0 - fy);
                let w10 = fx * (1.0 - fy);
                let w01 = (1.0 - fx) * fy;
                let w11 = fx * fy;

                let dst = (y * width + x) * channels;
                for c in 0..channels {
                    let a = row0[x0 * channels + c].to_f64();
                    let b = row0[x1 * channels + c].to_f64();
                    let cc = row1[x0 * channels + c].to_f64();
                    let d = row1[x1 * channels + c].to_f64();
                    out[dst + c] = T::from_f64(a * w00 + b * w10 + cc * w01 + d * w11);
                }
            }
        }

        OwnedImage::new_interleaved(out, width, height, channels)
    }
}
