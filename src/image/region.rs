//! Regions of interest and congruent clipping of region pairs.
//!
//! A `Region` may extend past its image on any side. Before two regions are
//! correlated they are clipped together so that both lie inside their images
//! while keeping identical width and height.

use crate::util::{ZnccError, ZnccResult};

/// Axis-aligned rectangle in pixel coordinates. The origin may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge (column) of the region.
    pub x: i64,
    /// Top edge (row) of the region.
    pub y: i64,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Region {
    /// Creates a region from its origin and size.
    pub fn new(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width x height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns `(width, height)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the number of pixels covered by the region.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Returns true if the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the region lies fully inside a `width x height` image.
    pub fn is_inside(&self, width: usize, height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && to_i64(self.width).saturating_add(self.x) <= to_i64(width)
            && to_i64(self.height).saturating_add(self.y) <= to_i64(height)
    }

    pub(crate) fn origin(&self) -> (usize, usize) {
        (self.x.max(0) as usize, self.y.max(0) as usize)
    }
}

/// Two congruent regions, each inside its own image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionPair {
    /// Region within the first image.
    pub first: Region,
    /// Region within the second image.
    pub second: Region,
}

impl RegionPair {
    /// Shared width of both regions.
    pub fn width(&self) -> usize {
        self.first.width
    }

    /// Shared height of both regions.
    pub fn height(&self) -> usize {
        self.first.height
    }

    /// Returns true if the clipped overlap covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

#[derive(Clone, Copy)]
struct Rect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl From<Region> for Rect {
    fn from(r: Region) -> Self {
        Self {
            x: r.x,
            y: r.y,
            w: to_i64(r.width),
            h: to_i64(r.height),
        }
    }
}

fn to_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Clips two congruent regions to their images, keeping them congruent.
///
/// `size1` and `size2` are the `(width, height)` of the images the regions
/// refer to. Negative origins are resolved first (x for both regions, then y),
/// shifting the partner region by the same amount; right and bottom overflow
/// is then trimmed per image. Every shrink is applied to both regions.
///
/// An overlap that collapses to nothing yields an empty pair: width and height
/// are zero and the origins are clamped into their images.
pub fn clip_pair(
    size1: (usize, usize),
    region1: Region,
    size2: (usize, usize),
    region2: Region,
) -> ZnccResult<RegionPair> {
    if region1.shape() != region2.shape() {
        return Err(ZnccError::RegionShapeMismatch {
            left_width: region1.width,
            left_height: region1.height,
            right_width: region2.width,
            right_height: region2.height,
        });
    }

    let mut a = Rect::from(region1);
    let mut b = Rect::from(region2);

    if a.x < 0 {
        b.x = b.x.saturating_sub(a.x);
        b.w = b.w.saturating_add(a.x);
        a.w = b.w;
        a.x = 0;
    }
    if b.x < 0 {
        a.x = a.x.saturating_sub(b.x);
        a.w = a.w.saturating_add(b.x);
        b.w = a.w;
        b.x = 0;
    }
    if a.y < 0 {
        b.y = b.y.saturating_sub(a.y);
        b.h = b.h.saturating_add(a.y);
        a.h = b.h;
        a.y = 0;
    }
    if b.y < 0 {
        a.y = a.y.saturating_sub(b.y);
        a.h = a.h.saturating_add(b.y);
        b.h = a.h;
        b.y = 0;
    }

    let (w1, h1) = (to_i64(size1.0), to_i64(size1.1));
    let (w2, h2) = (to_i64(size2.0), to_i64(size2.1));

    let delta = w1.saturating_sub(a.x.saturating_add(a.w));
    if delta < 0 {
        a.w = a.w.saturating_add(delta);
        b.w = a.w;
    }
    let delta = w2.saturating_sub(b.x.saturating_add(b.w));
    if delta < 0 {
        b.w = b.w.saturating_add(delta);
        a.w = b.w;
    }
    let delta = h1.saturating_sub(a.y.saturating_add(a.h));
    if delta < 0 {
        a.h = a.h.saturating_add(delta);
        b.h = a.h;
    }
    let delta = h2.saturating_sub(b.y.saturating_add(b.h));
    if delta < 0 {
        b.h = b.h.saturating_add(delta);
        a.h = b.h;
    }

    if a.w <= 0 || a.h <= 0 {
        return Ok(RegionPair {
            first: Region::new(a.x.clamp(0, w1), a.y.clamp(0, h1), 0, 0),
            second: Region::new(b.x.clamp(0, w2), b.y.clamp(0, h2), 0, 0),
        });
    }

    Ok(RegionPair {
        first: Region::new(a.x, a.y, a.w as usize, a.h as usize),
        second: Region::new(b.x, b.y, b.w as usize, b.h as usize),
    })
}
