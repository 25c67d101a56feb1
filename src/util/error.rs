//! Error types for zncc-rot.

use crate::image::Depth;
use thiserror::Error;

/// Result alias for zncc-rot operations.
pub type ZnccResult<T> = std::result::Result<T, ZnccError>;

/// Errors that can occur when evaluating correlations.
///
/// Every variant is a contract violation detected before any pixel is read.
/// Numeric degeneracies (empty overlap, constant regions) are not errors and
/// produce a score of `0.0` instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ZnccError {
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The row stride is shorter than a row of samples.
    #[error("invalid stride {stride} for row of {width} samples")]
    InvalidStride { width: usize, stride: usize },
    /// The channel count is zero.
    #[error("invalid channel count: {channels}")]
    InvalidChannels { channels: usize },
    /// The backing buffer is shorter than the declared shape requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A checked sub-view does not fit inside its parent image.
    #[error("roi ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A buffer does not carry the element type the caller asked for.
    #[error("depth mismatch: expected {expected}, got {got}")]
    DepthMismatch { expected: Depth, got: Depth },
    /// The two buffers carry a different number of channels.
    #[error("channel mismatch: {left} vs {right}")]
    ChannelMismatch { left: usize, right: usize },
    /// The declared regions are not congruent.
    #[error("region shape mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    RegionShapeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    /// Sentinel exclusion was requested for a depth without sentinel bounds.
    #[error("sentinel exclusion is not supported for {depth} samples")]
    SentinelsUnsupported { depth: Depth },
    /// The weight map does not cover the declared region.
    #[error("weight map length mismatch: needed {needed}, got {got}")]
    WeightMapLength { needed: usize, got: usize },
    /// The rotation step is not a positive finite angle.
    #[error("invalid angle step: {reason}")]
    InvalidAngleStep { reason: &'static str },
    /// Image decoding or file access failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
