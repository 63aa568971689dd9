//! Mode/power state machine
//!
//! All display behavior is a function of the power state, the active UI mode,
//! and a touch gesture. Long press toggles power from either state; short
//! press cycles the mode while powered on and is ignored while off.

use super::touch::TouchGesture;

/// Display modes, cycled by short press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    /// CPU + GPU temperature and load
    PrimaryMetrics,
    /// RAM usage with bar graph
    Memory,
    /// Network throughput
    Network,
    /// Divergence meter easter egg
    Divergence,
}

impl UiMode {
    /// Next mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            UiMode::PrimaryMetrics => UiMode::Memory,
            UiMode::Memory => UiMode::Network,
            UiMode::Network => UiMode::Divergence,
            UiMode::Divergence => UiMode::PrimaryMetrics,
        }
    }
}

/// Power state of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Display active, input processed
    On,
    /// Backlight off, input drained and dropped
    Off,
}

impl PowerState {
    /// Whether the display is powered.
    pub fn is_on(self) -> bool {
        matches!(self, PowerState::On)
    }
}

/// Action the firmware must perform after a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlAction {
    /// Render the newly selected mode
    AdvanceMode(UiMode),
    /// Run the power-on banner sequence
    PowerOn,
    /// Run the power-off sequence
    PowerOff,
}

/// Current mode and power state.
///
/// Starts powered off; the boot path runs the power-on sequence explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    /// Active UI mode
    pub mode: UiMode,
    /// Power state
    pub power: PowerState,
}

impl Controls {
    /// Initial state: off, primary metrics selected.
    pub const fn new() -> Self {
        Self {
            mode: UiMode::PrimaryMetrics,
            power: PowerState::Off,
        }
    }

    /// Boot-time power-up.
    ///
    /// The device comes up running: the boot path applies this once before
    /// the first loop tick and carries out the returned action, so the
    /// banner sequence and primary metrics show on plug-in without any
    /// touch input.
    pub fn boot(&mut self) -> ControlAction {
        self.power = PowerState::On;
        ControlAction::PowerOn
    }

    /// Process a classified touch gesture.
    ///
    /// Mutates mode/power and returns the action the firmware must carry
    /// out. Powering off also resets the mode for the next power-on.
    pub fn handle_touch(&mut self, gesture: TouchGesture) -> Option<ControlAction> {
        match (self.power, gesture) {
            (PowerState::On, TouchGesture::LongPress) => {
                self.power = PowerState::Off;
                self.mode = UiMode::PrimaryMetrics;
                Some(ControlAction::PowerOff)
            }
            (PowerState::Off, TouchGesture::LongPress) => {
                self.power = PowerState::On;
                Some(ControlAction::PowerOn)
            }
            (PowerState::On, TouchGesture::ShortPress) => {
                self.mode = self.mode.next();
                Some(ControlAction::AdvanceMode(self.mode))
            }
            (PowerState::Off, TouchGesture::ShortPress) => None,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cycle_returns_to_start() {
        let mut mode = UiMode::PrimaryMetrics;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, UiMode::PrimaryMetrics);
    }

    #[test]
    fn test_boot_powers_on_immediately() {
        let mut controls = Controls::new();
        assert_eq!(controls.power, PowerState::Off);

        assert_eq!(controls.boot(), ControlAction::PowerOn);
        assert_eq!(controls.power, PowerState::On);
        assert_eq!(controls.mode, UiMode::PrimaryMetrics);

        // A short press right after boot advances the mode as usual.
        assert_eq!(
            controls.handle_touch(TouchGesture::ShortPress),
            Some(ControlAction::AdvanceMode(UiMode::Memory))
        );
    }

    #[test]
    fn test_short_press_advances_while_on() {
        let mut controls = Controls {
            mode: UiMode::PrimaryMetrics,
            power: PowerState::On,
        };
        assert_eq!(
            controls.handle_touch(TouchGesture::ShortPress),
            Some(ControlAction::AdvanceMode(UiMode::Memory))
        );
        assert_eq!(controls.mode, UiMode::Memory);
    }

    #[test]
    fn test_short_press_ignored_while_off() {
        let mut controls = Controls::new();
        assert_eq!(controls.handle_touch(TouchGesture::ShortPress), None);
        assert_eq!(controls.mode, UiMode::PrimaryMetrics);
        assert_eq!(controls.power, PowerState::Off);
    }

    #[test]
    fn test_long_press_toggles_power_from_any_mode() {
        for mode in [
            UiMode::PrimaryMetrics,
            UiMode::Memory,
            UiMode::Network,
            UiMode::Divergence,
        ] {
            let mut controls = Controls {
                mode,
                power: PowerState::On,
            };
            assert_eq!(
                controls.handle_touch(TouchGesture::LongPress),
                Some(ControlAction::PowerOff)
            );
            assert_eq!(controls.power, PowerState::Off);
            // Mode resets for next power-on.
            assert_eq!(controls.mode, UiMode::PrimaryMetrics);

            assert_eq!(
                controls.handle_touch(TouchGesture::LongPress),
                Some(ControlAction::PowerOn)
            );
            assert_eq!(controls.power, PowerState::On);
        }
    }

    #[test]
    fn test_four_short_presses_round_trip() {
        let mut controls = Controls {
            mode: UiMode::PrimaryMetrics,
            power: PowerState::On,
        };
        for _ in 0..4 {
            controls.handle_touch(TouchGesture::ShortPress);
        }
        assert_eq!(controls.mode, UiMode::PrimaryMetrics);
    }
}
