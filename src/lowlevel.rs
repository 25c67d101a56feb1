//! Low-level building blocks for custom correlation pipelines.
//!
//! These expose region clipping, raw moment accumulation results and the
//! typed entry points that skip depth dispatch. Most users should prefer the
//! top-level [`compute`](crate::compute) and
//! [`explore_rotation`](crate::explore_rotation).

pub use crate::image::{clip_pair, RegionPair};
pub use crate::kernel::{compute_view, Moments, MIN_VALID_FRACTION};
pub use crate::search::best_rotation_view;
