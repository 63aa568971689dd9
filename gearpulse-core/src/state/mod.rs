//! Mode/power state machine and touch input handling

pub mod machine;
pub mod touch;

pub use machine::{ControlAction, Controls, PowerState, UiMode};
pub use touch::{TouchDebouncer, TouchGesture, LONG_PRESS_MS};
