//! Touch sensor debouncing
//!
//! The TTP223 pin is sampled once per loop tick. Gesture detection is purely
//! edge-triggered: a rising edge stamps the press start, a falling edge
//! classifies the press by its held duration. Bounce within one tick is not
//! specially filtered.

/// Held duration at or above which a release counts as a long press.
pub const LONG_PRESS_MS: u64 = 2000;

/// A classified touch release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchGesture {
    /// Released before the long-press threshold
    ShortPress,
    /// Held for at least [`LONG_PRESS_MS`]
    LongPress,
}

/// Edge-triggered press tracker, fed one pin sample per loop tick.
#[derive(Debug, Clone, Default)]
pub struct TouchDebouncer {
    last_level: bool,
    press_start_ms: u64,
    active: bool,
}

impl TouchDebouncer {
    /// Create a tracker assuming the pin starts released.
    pub const fn new() -> Self {
        Self {
            last_level: false,
            press_start_ms: 0,
            active: false,
        }
    }

    /// Feed one pin sample. Returns a gesture on the release edge.
    pub fn update(&mut self, level: bool, now_ms: u64) -> Option<TouchGesture> {
        let mut gesture = None;

        if level && !self.last_level {
            self.press_start_ms = now_ms;
            self.active = true;
        }

        if !level && self.last_level && self.active {
            let held = now_ms.saturating_sub(self.press_start_ms);
            gesture = Some(if held >= LONG_PRESS_MS {
                TouchGesture::LongPress
            } else {
                TouchGesture::ShortPress
            });
            self.active = false;
        }

        self.last_level = level;
        gesture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press() {
        let mut touch = TouchDebouncer::new();
        assert_eq!(touch.update(true, 100), None);
        assert_eq!(touch.update(true, 500), None);
        assert_eq!(touch.update(false, 600), Some(TouchGesture::ShortPress));
    }

    #[test]
    fn test_long_press_at_threshold() {
        let mut touch = TouchDebouncer::new();
        touch.update(true, 0);
        assert_eq!(
            touch.update(false, LONG_PRESS_MS),
            Some(TouchGesture::LongPress)
        );
    }

    #[test]
    fn test_just_under_threshold_is_short() {
        let mut touch = TouchDebouncer::new();
        touch.update(true, 0);
        assert_eq!(
            touch.update(false, LONG_PRESS_MS - 1),
            Some(TouchGesture::ShortPress)
        );
    }

    #[test]
    fn test_steady_levels_emit_nothing() {
        let mut touch = TouchDebouncer::new();
        for t in 0..10 {
            assert_eq!(touch.update(false, t * 10), None);
        }
        touch.update(true, 100);
        for t in 11..20 {
            assert_eq!(touch.update(true, t * 10), None);
        }
    }

    #[test]
    fn test_release_without_press_ignored() {
        // Pin starts high at boot: the first low sample has no recorded
        // press start and must not synthesize a gesture.
        let mut touch = TouchDebouncer {
            last_level: true,
            press_start_ms: 0,
            active: false,
        };
        assert_eq!(touch.update(false, 50), None);
    }
}
