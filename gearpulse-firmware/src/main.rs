//! GearPulse - PC Hardware Monitor Firmware
//!
//! RP2040 firmware for a desk-side hardware monitor: a host-side agent
//! streams newline-terminated JSON telemetry over UART, and the firmware
//! renders it onto a 16x2 character LCD. A capacitive touch button cycles
//! the display mode (short press) and toggles display power (long press).
//! The fourth mode is a divergence meter, as seen on a certain microwave
//! (temporal, ookina).
//!
//! Wiring (Pico defaults):
//! - UART0 RX:  GPIO1  (telemetry in, 115200 8N1)
//! - I2C0:      GPIO4 SDA / GPIO5 SCL (PCF8574 LCD backpack)
//! - Touch:     GPIO16 (TTP223 output, active high)
//! - GPIO26:    left floating, sampled for the random seed

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Instant, Timer};
use embedded_io::{Read, ReadReady};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gearpulse_core::divergence::DivergenceMeter;
use gearpulse_core::glyphs;
use gearpulse_core::render::{screens, RenderCache};
use gearpulse_core::state::{ControlAction, Controls, TouchDebouncer, UiMode};
use gearpulse_core::traits::{CharDisplay, XorShift32};
use gearpulse_protocol::{decode, LineFramer, TelemetrySnapshot};

use crate::lcd1602::Lcd1602;

mod lcd1602;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

/// Poll interval of the main loop.
const LOOP_TICK_MS: u64 = 10;

/// Everything the monitor tracks between loop ticks.
struct Monitor<D: CharDisplay> {
    display: D,
    cache: RenderCache,
    framer: LineFramer,
    snapshot: TelemetrySnapshot,
    controls: Controls,
    touch: TouchDebouncer,
    meter: DivergenceMeter,
    rng: XorShift32,
}

impl<D: CharDisplay> Monitor<D> {
    fn new(display: D, meter: DivergenceMeter, rng: XorShift32) -> Self {
        Self {
            display,
            cache: RenderCache::new(),
            framer: LineFramer::new(),
            snapshot: TelemetrySnapshot::default(),
            controls: Controls::new(),
            touch: TouchDebouncer::new(),
            meter,
            rng,
        }
    }

    /// Process one received byte from the telemetry stream.
    ///
    /// Bytes arriving while powered off are dropped so a stale half-line
    /// never survives a power cycle.
    fn feed_byte(&mut self, byte: u8) {
        if !self.controls.power.is_on() {
            return;
        }
        if let Some(line) = self.framer.feed(byte) {
            self.handle_line(&line);
        }
    }

    /// Decode a framed line and refresh the display.
    ///
    /// A malformed line keeps the previous snapshot on screen. The
    /// divergence mode ignores telemetry entirely.
    fn handle_line(&mut self, line: &[u8]) {
        match decode(line) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                if self.controls.mode != UiMode::Divergence {
                    self.render_mode();
                }
            }
            Err(_) => {
                warn!("telemetry: undecodable line ({} bytes)", line.len());
            }
        }
    }

    /// Redraw the active mode from current state.
    fn render_mode(&mut self) {
        let rows = match self.controls.mode {
            UiMode::PrimaryMetrics => screens::primary_metrics(&self.snapshot),
            UiMode::Memory => screens::memory(&self.snapshot),
            UiMode::Network => screens::network(&self.snapshot),
            UiMode::Divergence => self.meter.value_screen(),
        };
        self.cache.sync_screen(&mut self.display, &rows);
    }

    /// Carry out the action a touch gesture produced.
    async fn handle_action(&mut self, action: ControlAction, now_ms: u64) {
        match action {
            ControlAction::PowerOn => self.power_on().await,
            ControlAction::PowerOff => self.power_off().await,
            ControlAction::AdvanceMode(mode) => {
                info!("mode: {}", mode);
                if mode == UiMode::Divergence {
                    self.meter.enter(now_ms);
                }
                self.render_mode();
            }
        }
    }

    /// Boot banner sequence, then the primary metrics screen.
    async fn power_on(&mut self) {
        info!("display power on");
        self.display.backlight(true);
        self.framer.reset();
        self.snapshot = TelemetrySnapshot::default();

        self.cache.show_banner(&mut self.display, "GearPulse", "");
        Timer::after_millis(600).await;
        self.cache
            .show_banner(&mut self.display, "System Monitor", "Starting...");
        Timer::after_millis(1000).await;
        self.cache
            .show_banner(&mut self.display, "System Ready", "Waiting for data");
        Timer::after_millis(1000).await;

        self.render_mode();
    }

    /// Farewell banner, then dark panel.
    async fn power_off(&mut self) {
        info!("display power off");
        self.cache
            .show_banner(&mut self.display, "Powering Off...", "");
        Timer::after_millis(1000).await;

        self.display.clear();
        self.display.backlight(false);
        self.cache.reset();
        self.meter.reset();
        self.snapshot = TelemetrySnapshot::default();
    }

    /// Advance the divergence animation while its mode is on screen.
    fn tick_divergence(&mut self, now_ms: u64) {
        if !self.controls.power.is_on() || self.controls.mode != UiMode::Divergence {
            return;
        }
        let phase = self.meter.phase();
        if let Some(rows) = self.meter.tick(now_ms, &mut self.rng) {
            self.cache.sync_screen(&mut self.display, &rows);
        }
        if self.meter.phase() != phase {
            info!("divergence phase: {}", self.meter.phase());
        }
    }
}

/// Seed entropy from a floating ADC channel mixed with the boot timestamp.
fn harvest_seed(adc: &mut Adc<'_, embassy_rp::adc::Blocking>, noise: &mut Channel<'_>) -> u32 {
    let mut seed: u32 = 0;
    for _ in 0..8 {
        // Only the noisy low bits are worth keeping.
        let sample = adc.blocking_read(noise).unwrap_or(0) as u32;
        seed = (seed << 4) ^ sample;
    }
    seed ^ Instant::now().as_micros() as u32
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("gearpulse firmware starting...");

    let p = embassy_rp::init(Default::default());

    // UART0 carries the telemetry stream from the host agent. Only RX is
    // wired; the protocol is one-way.
    let uart_config = UartConfig::default(); // 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 1024]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, mut rx) = uart.split();

    // I2C0 drives the PCF8574 backpack on the 1602 panel.
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let mut display = Lcd1602::new(i2c);
    display.init();
    glyphs::register(&mut display);
    display.backlight(false);

    let touch = Input::new(p.PIN_16, Pull::Down);

    let mut adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut noise = Channel::new_pin(p.PIN_26, Pull::None);
    let mut rng = XorShift32::new(harvest_seed(&mut adc, &mut noise));

    let meter = DivergenceMeter::new(Instant::now().as_millis(), &mut rng);
    let mut monitor = Monitor::new(display, meter, rng);

    // The device comes up running: banner sequence, then primary metrics.
    let boot_action = monitor.controls.boot();
    monitor
        .handle_action(boot_action, Instant::now().as_millis())
        .await;

    info!("peripherals initialized, monitor loop running");

    loop {
        let now = Instant::now().as_millis();

        if let Some(gesture) = monitor.touch.update(touch.is_high(), now) {
            if let Some(action) = monitor.controls.handle_touch(gesture) {
                monitor.handle_action(action, now).await;
            }
        }

        // Drain everything the UART buffered since the last tick.
        while matches!(rx.read_ready(), Ok(true)) {
            let mut byte = [0u8; 1];
            match rx.read(&mut byte) {
                Ok(1) => monitor.feed_byte(byte[0]),
                Ok(_) => break,
                Err(_) => {
                    warn!("uart read failed");
                    break;
                }
            }
        }

        monitor.tick_divergence(Instant::now().as_millis());

        Timer::after_millis(LOOP_TICK_MS).await;
    }
}
