//! Element-type tagging for images of any supported sample type.

use super::{ImageView, OwnedImage};
use std::fmt;

/// Storage type of a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Depth {
    /// One-bit boolean samples.
    Bool,
    /// Unsigned 8-bit samples.
    U8,
    /// Signed 8-bit samples.
    I8,
    /// Unsigned 16-bit samples.
    U16,
    /// Signed 16-bit samples.
    I16,
    /// 32-bit floating-point samples.
    F32,
}

impl Depth {
    /// Returns a short lowercase name for the depth.
    pub fn name(self) -> &'static str {
        match self {
            Depth::Bool => "bool",
            Depth::U8 => "u8",
            Depth::I8 => "i8",
            Depth::U16 => "u16",
            Depth::I16 => "i16",
            Depth::F32 => "f32",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view tagged with its element type.
#[derive(Clone, Copy, Debug)]
pub enum AnyImageView<'a> {
    Bool(ImageView<'a, bool>),
    U8(ImageView<'a, u8>),
    I8(ImageView<'a, i8>),
    U16(ImageView<'a, u16>),
    I16(ImageView<'a, i16>),
    F32(ImageView<'a, f32>),
}

impl AnyImageView<'_> {
    /// Returns the element type of the view.
    pub fn depth(&self) -> Depth {
        match self {
            AnyImageView::Bool(_) => Depth::Bool,
            AnyImageView::U8(_) => Depth::U8,
            AnyImageView::I8(_) => Depth::I8,
            AnyImageView::U16(_) => Depth::U16,
            AnyImageView::I16(_) => Depth::I16,
            AnyImageView::F32(_) => Depth::F32,
        }
    }

    /// Returns `(width, height)` in pixels.
    pub fn size(&self) -> (usize, usize) {
        match self {
            AnyImageView::Bool(v) => (v.width(), v.height()),
            AnyImageView::U8(v) => (v.width(), v.height()),
            AnyImageView::I8(v) => (v.width(), v.height()),
            AnyImageView::U16(v) => (v.width(), v.height()),
            AnyImageView::I16(v) => (v.width(), v.height()),
            AnyImageView::F32(v) => (v.width(), v.height()),
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.size().0
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.size().1
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        match self {
            AnyImageView::Bool(v) => v.channels(),
            AnyImageView::U8(v) => v.channels(),
            AnyImageView::I8(v) => v.channels(),
            AnyImageView::U16(v) => v.channels(),
            AnyImageView::I16(v) => v.channels(),
            AnyImageView::F32(v) => v.channels(),
        }
    }
}

macro_rules! impl_from_view {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<ImageView<'a, $ty>> for AnyImageView<'a> {
                fn from(view: ImageView<'a, $ty>) -> Self {
                    AnyImageView::$variant(view)
                }
            }

            impl From<OwnedImage<$ty>> for AnyImage {
                fn from(img: OwnedImage<$ty>) -> Self {
                    AnyImage::$variant(img)
                }
            }
        )+
    };
}

impl_from_view!(bool => Bool, u8 => U8, i8 => I8, u16 => U16, i16 => I16, f32 => F32);

/// Owned image tagged with its element type.
#[derive(Clone, Debug)]
pub enum AnyImage {
    Bool(OwnedImage<bool>),
    U8(OwnedImage<u8>),
    I8(OwnedImage<i8>),
    U16(OwnedImage<u16>),
    I16(OwnedImage<i16>),
    F32(OwnedImage<f32>),
}

impl AnyImage {
    /// Returns a borrowed tagged view of the image.
    pub fn view(&self) -> AnyImageView<'_> {
        match self {
            AnyImage::Bool(img) => AnyImageView::Bool(img.view()),
            AnyImage::U8(img) => AnyImageView::U8(img.view()),
            AnyImage::I8(img) => AnyImageView::I8(img.view()),
            AnyImage::U16(img) => AnyImageView::U16(img.view()),
            AnyImage::I16(img) => AnyImageView::I16(img.view()),
            AnyImage::F32(img) => AnyImageView::F32(img.view()),
        }
    }

    /// Returns the element type of the image.
    pub fn depth(&self) -> Depth {
        self.view().depth()
    }
}
