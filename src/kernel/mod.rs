//! Zero-mean normalized cross-correlation between two image regions.
//!
//! The entry points validate the contract once, clip the region pair, and
//! then run one of four monomorphized accumulation loops selected by
//! sentinel exclusion and weighting, so the per-pixel loop never branches on
//! configuration.

use crate::image::{clip_pair, AnyImageView, Depth, ImageView, Region};
use crate::trace::{trace_event, trace_span};
use crate::util::{ZnccError, ZnccResult};

mod sample;
pub mod scalar;

pub use sample::Sample;
pub use scalar::{Moments, MIN_VALID_FRACTION};

/// How sentinel-valued samples are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SentinelMode {
    /// Exclude sentinels for integral and boolean samples, never for float.
    #[default]
    Auto,
    /// Exclude sentinels; fails for sample types without sentinel bounds.
    Enabled,
    /// Never exclude samples.
    Disabled,
}

impl SentinelMode {
    fn resolve<T: Sample>(self) -> ZnccResult<Option<(T, T)>> {
        match self {
            SentinelMode::Auto => Ok(T::SENTINELS),
            SentinelMode::Enabled => T::SENTINELS
                .map(Some)
                .ok_or(ZnccError::SentinelsUnsupported { depth: T::DEPTH }),
            SentinelMode::Disabled => Ok(None),
        }
    }
}

/// Correlation options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZnccConfig {
    /// Sentinel exclusion policy.
    pub sentinels: SentinelMode,
}

/// Per-sample weights aligned with the visiting order of a region pair.
///
/// The map holds one weight per sample of the declared (unclipped) region,
/// `width * height * channels` in total. Weights are consumed in row-major
/// order over the clipped overlap.
#[derive(Clone, Copy, Debug)]
pub struct WeightMap<'a> {
    weights: &'a [f32],
}

impl<'a> WeightMap<'a> {
    /// Wraps a weight slice.
    pub fn new(weights: &'a [f32]) -> Self {
        Self { weights }
    }

    /// Returns the underlying weights.
    pub fn as_slice(&self) -> &'a [f32] {
        self.weights
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the map holds no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Computes the ZNCC score between `region1` of `image1` and `region2` of `image2`.
///
/// Both images must share a depth and channel count and the regions must be
/// congruent; they may extend outside their images and are clipped together.
/// The score lies in `[-1, 1]`. Empty overlaps, constant regions and (with
/// sentinel exclusion) overlaps whose valid weight is below half of the
/// visited weight score `0.0`.
pub fn compute(
    image1: AnyImageView<'_>,
    region1: Region,
    image2: AnyImageView<'_>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &ZnccConfig,
) -> ZnccResult<f64> {
    if image1.depth() != image2.depth() {
        return Err(ZnccError::DepthMismatch {
            expected: image1.depth(),
            got: image2.depth(),
        });
    }
    match image1.depth() {
        Depth::Bool => compute_as::<bool>(image1, region1, image2, region2, weights, cfg),
        Depth::U8 => compute_as::<u8>(image1, region1, image2, region2, weights, cfg),
        Depth::I8 => compute_as::<i8>(image1, region1, image2, region2, weights, cfg),
        Depth::U16 => compute_as::<u16>(image1, region1, image2, region2, weights, cfg),
        Depth::I16 => compute_as::<i16>(image1, region1, image2, region2, weights, cfg),
        Depth::F32 => compute_as::<f32>(image1, region1, image2, region2, weights, cfg),
    }
}

/// Type-specialized variant of [`compute`].
///
/// Fails with `DepthMismatch` if either image does not hold `T` samples.
pub fn compute_as<T: Sample>(
    image1: AnyImageView<'_>,
    region1: Region,
    image2: AnyImageView<'_>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &ZnccConfig,
) -> ZnccResult<f64> {
    let view1 = T::downcast(image1)?;
    let view2 = T::downcast(image2)?;
    compute_view(view1, region1, view2, region2, weights, cfg)
}

/// Computes the ZNCC score on typed views.
pub fn compute_view<T: Sample>(
    image1: ImageView<'_, T>,
    region1: Region,
    image2: ImageView<'_, T>,
    region2: Region,
    weights: Option<WeightMap<'_>>,
    cfg: &ZnccConfig,
) -> ZnccResult<f64> {
    let channels = image1.channels();
    if channels != image2.channels() {
        return Err(ZnccError::ChannelMismatch {
            left: channels,
            right: image2.channels(),
        });
    }
    let bounds = cfg.sentinels.resolve::<T>()?;
    if let Some(map) = weights {
        let needed = region1.area().saturating_mul(channels);
        if map.len() != needed {
            return Err(ZnccError::WeightMapLength {
                needed,
                got: map.len(),
            });
        }
    }
    let pair = clip_pair(
        (image1.width(), image1.height()),
        region1,
        (image2.width(), image2.height()),
        region2,
    )?;

    let _span = trace_span!(
        "zncc",
        depth = T::DEPTH.name(),
        width = pair.width(),
        height = pair.height()
    )
    .entered();

    if pair.is_empty() {
        trace_event!(
            "zncc_empty_overlap",
            x1 = pair.first.x,
            x2 = pair.second.x
        );
        return Ok(0.0);
    }

    let (x1, y1) = pair.first.origin();
    let (x2, y2) = pair.second.origin();
    let sub1 = image1.roi(x1, y1, pair.width(), pair.height())?;
    let sub2 = image2.roi(x2, y2, pair.width(), pair.height())?;

    let moments = match (bounds, weights) {
        (Some(bounds), Some(map)) => {
            scalar::accumulate::<T, true, true>(sub1, sub2, bounds, map.as_slice())
        }
        (Some(bounds), None) => scalar::accumulate::<T, true, false>(sub1, sub2, bounds, &[]),
        (None, Some(map)) => {
            scalar::accumulate::<T, false, true>(sub1, sub2, (T::FILL, T::FILL), map.as_slice())
        }
        (None, None) => scalar::accumulate::<T, false, false>(sub1, sub2, (T::FILL, T::FILL), &[]),
    };

    let score = moments.finish(bounds.is_some());
    trace_event!("zncc_score", score = score, valid_weight = moments.count);
    Ok(score)
}
