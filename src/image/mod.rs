//! Image views, owned buffers and region handling.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than `width * channels` represents padded rows. Channels are
//! interleaved within a row. ROI slices are zero-copy views into the same
//! backing slice and keep the parent stride.

use crate::util::{ZnccError, ZnccResult};

mod depth;
#[cfg(feature = "image-io")]
pub mod io;
pub mod region;

pub use depth::{AnyImage, AnyImageView, Depth};
pub use region::{clip_pair, Region, RegionPair};

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous single-channel view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ZnccResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a single-channel view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> ZnccResult<Self> {
        Self::new_interleaved(data, width, height, stride, 1)
    }

    /// Creates a view over `channels` interleaved samples per pixel.
    pub fn new_interleaved(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    ) -> ZnccResult<Self> {
        let needed = required_len(width, height, stride, channels)?;
        if data.len() < needed {
            return Err(ZnccError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            channels,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the sample of `channel` at pixel `(x, y)` if it is within bounds.
    pub fn sample(&self, x: usize, y: usize, channel: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        let idx = y
            .checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.channels)?)?
            .checked_add(channel)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with `width * channels` samples.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> ZnccResult<Self> {
        if width == 0 || height == 0 {
            return Err(ZnccError::InvalidDimensions { width, height });
        }

        let out_of_bounds = ZnccError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * self.channels))
            .ok_or(ZnccError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self.data.get(start..).ok_or(ZnccError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;

        Self::new_interleaved(data, width, height, self.stride, self.channels)
    }
}

fn required_len(width: usize, height: usize, stride: usize, channels: usize) -> ZnccResult<usize> {
    if width == 0 || height == 0 {
        return Err(ZnccError::InvalidDimensions { width, height });
    }
    if channels == 0 {
        return Err(ZnccError::InvalidChannels { channels });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(ZnccError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(ZnccError::InvalidStride {
            width: row_len,
            stride,
        });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(ZnccError::InvalidDimensions { width, height })
}

/// Owned contiguous image buffer.
#[derive(Clone, Debug)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
    channels: usize,
}

impl<T> OwnedImage<T> {
    /// Wraps a contiguous single-channel buffer of exactly `width * height` samples.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> ZnccResult<Self> {
        Self::new_interleaved(data, width, height, 1)
    }

    /// Wraps a contiguous interleaved buffer of exactly `width * height * channels` samples.
    pub fn new_interleaved(
        data: Vec<T>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> ZnccResult<Self> {
        let needed = required_len(width, height, width.saturating_mul(channels), channels)?;
        if data.len() < needed {
            return Err(ZnccError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ZnccError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the contiguous sample buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.channels,
            channels: self.channels,
        }
    }
}

impl<T: Copy> OwnedImage<T> {
    /// Allocates an image with every sample set to `value`.
    pub fn filled(
        value: T,
        width: usize,
        height: usize,
        channels: usize,
    ) -> ZnccResult<Self> {
        let needed = required_len(width, height, width.saturating_mul(channels), channels)?;
        Self::new_interleaved(vec![value; needed], width, height, channels)
    }
}
