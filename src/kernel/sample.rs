//! Per-type sample behavior for the correlation kernel.

use crate::image::{AnyImageView, Depth, ImageView};
use crate::util::{ZnccError, ZnccResult};
use std::fmt::Debug;

/// A scalar sample type the correlation kernel can be specialized for.
///
/// Each implementation carries its sentinel bounds (the values treated as
/// invalid when exclusion is enabled), the neutral fill used for resampled
/// backgrounds, and its widening into `f64` arithmetic.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Tag of this type in `AnyImageView`.
    const DEPTH: Depth;
    /// Inclusive low/high sentinel values, `None` if the type has none.
    const SENTINELS: Option<(Self, Self)>;
    /// Background value for samples produced outside a source image.
    ///
    /// For integral types this is the low sentinel, so uncovered samples are
    /// excluded instead of correlated; for signed types that differs from a
    /// zero background.
    const FILL: Self;

    /// Widens the sample into the accumulator type.
    fn to_f64(self) -> f64;

    /// Narrows an interpolated value back into the sample type.
    ///
    /// Integral types round to nearest and saturate; `NaN` maps to zero.
    fn from_f64(value: f64) -> Self;

    /// Extracts a typed view if `image` carries this sample type.
    fn try_view(image: AnyImageView<'_>) -> Option<ImageView<'_, Self>>;

    /// Extracts a typed view, failing with `DepthMismatch` otherwise.
    fn downcast(image: AnyImageView<'_>) -> ZnccResult<ImageView<'_, Self>> {
        let got = image.depth();
        Self::try_view(image).ok_or(ZnccError::DepthMismatch {
            expected: Self::DEPTH,
            got,
        })
    }
}

macro_rules! impl_integral_sample {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Sample for $ty {
                const DEPTH: Depth = Depth::$variant;
                const SENTINELS: Option<(Self, Self)> = Some((<$ty>::MIN, <$ty>::MAX));
                // Low sentinel, not zero, for signed types too.
                const FILL: Self = <$ty>::MIN;

                #[inline(always)]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    // `as` saturates and maps NaN to zero.
                    value.round() as $ty
                }

                fn try_view(image: AnyImageView<'_>) -> Option<ImageView<'_, Self>> {
                    match image {
                        AnyImageView::$variant(view) => Some(view),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_integral_sample!(u8 => U8, i8 => I8, u16 => U16, i16 => I16);

impl Sample for bool {
    const DEPTH: Depth = Depth::Bool;
    const SENTINELS: Option<(Self, Self)> = Some((false, true));
    const FILL: Self = false;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(u8::from(self))
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value >= 0.5
    }

    fn try_view(image: AnyImageView<'_>) -> Option<ImageView<'_, Self>> {
        match image {
            AnyImageView::Bool(view) => Some(view),
            _ => None,
        }
    }
}

impl Sample for f32 {
    const DEPTH: Depth = Depth::F32;
    const SENTINELS: Option<(Self, Self)> = None;
    const FILL: Self = 0.0;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn try_view(image: AnyImageView<'_>) -> Option<ImageView<'_, Self>> {
        match image {
            AnyImageView::F32(view) => Some(view),
            _ => None,
        }
    }
}
