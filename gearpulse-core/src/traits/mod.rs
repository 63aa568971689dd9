//! Hardware abstraction traits
//!
//! Seams between the board-agnostic logic and the physical board: the
//! character display and the random source. The firmware crate provides the
//! real implementations; tests provide recording/scripted fakes.

pub mod display;
pub mod rng;

pub use display::CharDisplay;
pub use rng::{RandomSource, XorShift32};
