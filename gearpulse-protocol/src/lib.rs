//! Serial Telemetry Protocol
//!
//! This crate defines the wire format between the PC-side sender and the
//! GearPulse display firmware. The sender emits one JSON object per line:
//!
//! ```text
//! {"cpu":{"load":N,"temp":N},"gpu":{"load":N,"temp":N},
//!  "ram":{"total":N,"used":N,"usagePercent":N},
//!  "network":{"upload":N,"download":N}}\n
//! ```
//!
//! Framing is newline- or carriage-return-terminated with a bounded line
//! buffer; decoding is structural JSON with missing leaves coerced to zero.
//! The firmware never trusts the sender — malformed lines are dropped.

#![no_std]
#![deny(unsafe_code)]

pub mod framing;
pub mod telemetry;

pub use framing::{Line, LineFramer, MAX_LINE_LEN};
pub use telemetry::{decode, DecodeError, TelemetrySnapshot};
