//! Zero-mean normalized cross-correlation (ZNCC) between image regions, and a
//! rotation search built on it.
//!
//! [`compute`] scores two congruent regions of same-typed images. Regions may
//! extend past their images and are clipped together. Integral and boolean
//! samples equal to the type's minimum or maximum are treated as invalid and
//! excluded by default, and an optional per-sample weight map scales each
//! contribution. [`explore_rotation`] rotates the second region through a
//! full turn and keeps the best score.
//!
//! Optional features: `rayon` (parallel angle evaluation), `tracing`
//! (spans and events), `image-io` (loading images from disk).

pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod resample;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{AnyImage, AnyImageView, Depth, ImageView, OwnedImage, Region};
pub use crate::kernel::{compute, compute_as, Sample, SentinelMode, WeightMap, ZnccConfig};
pub use crate::resample::{Affine2, Bilinear, Resampler};
pub use crate::search::{
    best_rotation, explore_rotation, RotationConfig, RotationMatch, MAX_CANDIDATE_ANGLES,
};
pub use crate::util::{ZnccError, ZnccResult};
