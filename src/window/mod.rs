//! Rolling sample window and per-window rescaling into classifier input.

mod buffer;
mod scale;

pub use buffer::WindowBuffer;
pub use scale::{scale_min_max, ScaledWindow};
