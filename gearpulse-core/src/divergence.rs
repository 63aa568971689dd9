//! Divergence meter
//!
//! The fourth display mode shows a synthetic "divergence" number instead of
//! telemetry: a two-phase cycle that holds a value for a minute, then spends
//! fifteen seconds visually re-settling onto a freshly drawn target, digits
//! locking in left to right.
//!
//! The meter is only ticked while its mode is active, so the phase timer is
//! frozen whenever another mode is selected and resumes on re-entry (re-entry
//! restarts the hold phase outright).
//!
//! Time (`now_ms`) and randomness are injected so the whole cycle runs under
//! host tests with a fake clock and scripted draws.

use core::fmt::Write;

use heapless::String;

use crate::render::row::{self, Row, BLANK_ROW};
use crate::traits::RandomSource;

/// Duration of the settling animation.
pub const ANIMATION_MS: u64 = 15_000;

/// Duration the settled value is held.
pub const HOLD_MS: u64 = 60_000;

/// Minimum interval between animation frames.
pub const FRAME_INTERVAL_MS: u64 = 40;

/// Two draws closer than this count as the same value.
const VALUE_EPSILON: f32 = 1e-6;

/// The Steins Gate world line.
const GATE_VALUE: f32 = 1.048596;

/// Column where the 8-character value string starts (centered in 16 cells).
const VALUE_COL: usize = 4;

/// Title row shown while the meter is settling.
const TITLE: &str = "   DIVERGENCE   ";

/// Meter phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DivergencePhase {
    /// Digits settling toward the target
    Animating,
    /// Settled value and world line label on display
    Holding,
}

/// Timed two-state generator for the divergence display.
#[derive(Debug, Clone)]
pub struct DivergenceMeter {
    phase: DivergencePhase,
    phase_started_ms: u64,
    last_frame_ms: u64,
    current: f32,
    target: f32,
}

impl DivergenceMeter {
    /// Create a meter already holding a freshly drawn value.
    pub fn new<R: RandomSource>(now_ms: u64, rng: &mut R) -> Self {
        let target = draw_value(rng);
        Self {
            phase: DivergencePhase::Holding,
            phase_started_ms: now_ms,
            last_frame_ms: 0,
            current: target,
            target,
        }
    }

    /// Phase the meter is in.
    pub fn phase(&self) -> DivergencePhase {
        self.phase
    }

    /// Value currently displayed (the settled one during animation).
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Switch into divergence mode: restart the hold with a fresh timer.
    ///
    /// The caller renders [`value_screen`](Self::value_screen) immediately.
    pub fn enter(&mut self, now_ms: u64) {
        self.phase = DivergencePhase::Holding;
        self.phase_started_ms = now_ms;
    }

    /// Power-off reset: abandon any in-flight animation.
    pub fn reset(&mut self) {
        self.phase = DivergencePhase::Holding;
    }

    /// Rows for the settled value: world line label over the centered number.
    pub fn value_screen(&self) -> [Row; 2] {
        [
            row::from_str(world_line_label(self.current)),
            row::centered(format_value(self.current).as_str()),
        ]
    }

    /// Advance the cycle. Called once per loop tick, only while divergence
    /// mode is active and the display is powered.
    ///
    /// Returns rows to draw when the frame or phase changed.
    pub fn tick<R: RandomSource>(&mut self, now_ms: u64, rng: &mut R) -> Option<[Row; 2]> {
        let elapsed = now_ms.saturating_sub(self.phase_started_ms);

        match self.phase {
            DivergencePhase::Holding => {
                if elapsed >= HOLD_MS {
                    self.retarget(rng);
                    self.phase = DivergencePhase::Animating;
                    self.phase_started_ms = now_ms;
                    self.last_frame_ms = now_ms;
                }
                None
            }
            DivergencePhase::Animating => {
                if elapsed >= ANIMATION_MS {
                    self.phase = DivergencePhase::Holding;
                    self.phase_started_ms = now_ms;
                    self.current = self.target;
                    Some(self.value_screen())
                } else if now_ms.saturating_sub(self.last_frame_ms) >= FRAME_INTERVAL_MS {
                    self.last_frame_ms = now_ms;
                    let progress = elapsed as f32 / ANIMATION_MS as f32;
                    Some([
                        row::from_str(TITLE),
                        animation_row(self.target, progress, rng),
                    ])
                } else {
                    None
                }
            }
        }
    }

    /// Draw a new target, guaranteed to differ from the current value.
    fn retarget<R: RandomSource>(&mut self, rng: &mut R) {
        let mut target = draw_value(rng);
        while abs(target - self.current) < VALUE_EPSILON {
            target = draw_value(rng);
        }
        self.target = target;
    }
}

/// Weighted draw of a divergence value.
///
/// The four canonical world lines are heavily favored; the rest of the
/// probability mass is uniform over [0, 3).
fn draw_value<R: RandomSource>(rng: &mut R) -> f32 {
    match rng.below(100) {
        0..=24 => GATE_VALUE,       // Steins Gate
        25..=39 => 0.000000,        // Alpha attractor field
        40..=54 => 0.571024,        // Beta attractor field
        55..=69 => 1.130426,        // Gamma attractor field
        _ => rng.below(300_000) as f32 / 100_000.0,
    }
}

/// World line label for a value.
///
/// An exact match on the gate value wins over the range bands.
pub fn world_line_label(value: f32) -> &'static str {
    if abs(value - GATE_VALUE) < VALUE_EPSILON {
        "  STEINS;GATE   "
    } else if value < 0.5 {
        " ALPHA WORLDLINE"
    } else if value < 1.0 {
        " BETA WORLDLINE "
    } else if value < 1.1 {
        "  STEINS GATE   "
    } else if value < 2.0 {
        " GAMMA WORLDLINE"
    } else if value < 3.0 {
        " DELTA WORLDLINE"
    } else {
        "UNKNOWN WORLDLIN"
    }
}

/// Standard divergence notation: one integer digit, six decimals.
pub fn format_value(value: f32) -> String<10> {
    let mut s = String::new();
    let _ = write!(s, "{:.6}", value);
    s
}

/// One frame of the settling animation.
///
/// Per digit position `i`, reveal progress is `2*progress - 0.15*i`, so
/// earlier digits lock in first. A digit shows its true value once its
/// progress passes 0.9, or probabilistically in proportion to it; otherwise a
/// random digit is substituted. The decimal point passes through untouched.
fn animation_row<R: RandomSource>(target: f32, progress: f32, rng: &mut R) -> Row {
    let digits = format_value(target);
    let mut row = BLANK_ROW;

    for (i, &b) in digits.as_bytes().iter().enumerate() {
        let col = VALUE_COL + i;
        if col >= row.len() {
            break;
        }
        row[col] = if b.is_ascii_digit() {
            let digit_progress = 2.0 * progress - 0.15 * i as f32;
            if digit_progress > 0.9 || (rng.below(100) as f32) < digit_progress * 100.0 {
                b
            } else {
                b'0' + rng.below(10) as u8
            }
        } else {
            b
        };
    }

    row
}

fn abs(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}
