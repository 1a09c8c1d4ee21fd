//! Depth-interval primitives shared by every per-well algorithm.
//!
//! [`DepthInterval`] is a half-open `[from, to)` range of metre offsets;
//! [`DepthSet`] keeps a canonical union of such ranges and provides the
//! linear-time complement the overlap resolver is built on.

mod depth;
mod key;
mod set;

pub use depth::DepthInterval;
pub use key::{BoundsKey, F64Key};
pub use set::DepthSet;
