//! Board-agnostic UI logic for the GearPulse hardware monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Character display and random source traits
//! - Custom glyph bitmaps (arrows, bar-graph fill levels)
//! - Per-row render cache (flicker suppression)
//! - Screen formatting for the telemetry display modes
//! - Mode/power state machine and touch debouncing
//! - Divergence meter (timed animate/hold cycle)
//!
//! Time and randomness are passed in as parameters, so everything here runs
//! in host tests with a fake clock and a seeded generator.

#![no_std]
#![deny(unsafe_code)]

pub mod divergence;
pub mod glyphs;
pub mod render;
pub mod state;
pub mod traits;
