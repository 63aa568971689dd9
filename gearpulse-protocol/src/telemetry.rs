//! Telemetry snapshot type and JSON decoding.
//!
//! The wire schema is fixed: four nested objects with numeric leaves. All
//! leaves default to zero so a sender that omits a field (e.g. no GPU
//! present) still produces a complete snapshot. Decoding never partially
//! applies: a snapshot is built whole or the line is rejected.

use serde::Deserialize;

/// Decode failure for one telemetry line.
///
/// Carries the underlying JSON error so the caller can log what the sender
/// got wrong. The previous snapshot stays live; the next line is independent.
pub type DecodeError = serde_json_core::de::Error;

/// CPU load and temperature.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct CpuStats {
    /// Load percentage (0-100)
    pub load: f32,
    /// Package temperature in degrees C
    pub temp: f32,
}

/// GPU load and temperature.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct GpuStats {
    /// Load percentage (0-100)
    pub load: f32,
    /// Core temperature in degrees C
    pub temp: f32,
}

/// RAM capacity and usage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct RamStats {
    /// Installed memory in GB
    pub total: f32,
    /// Memory in use in GB
    pub used: f32,
    /// Usage percentage (0-100)
    #[serde(rename = "usagePercent")]
    pub usage_percent: f32,
}

/// Network throughput in bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct NetStats {
    /// Upload rate in B/s
    pub upload: f32,
    /// Download rate in B/s
    pub download: f32,
}

/// One complete set of host telemetry.
///
/// Updated atomically by the decode path: either all nine fields are replaced
/// together or the live snapshot is untouched. Zeroed on power transitions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TelemetrySnapshot {
    /// CPU stats
    pub cpu: CpuStats,
    /// GPU stats
    pub gpu: GpuStats,
    /// RAM stats
    pub ram: RamStats,
    /// Network stats
    #[serde(rename = "network")]
    pub net: NetStats,
}

/// Decode one framed line as a telemetry snapshot.
///
/// Structural only: missing objects or leaves coerce to zero, trailing bytes
/// after the object are ignored. Malformed JSON (or a non-numeric leaf)
/// returns an error and produces no snapshot.
pub fn decode(line: &[u8]) -> Result<TelemetrySnapshot, DecodeError> {
    let (snapshot, _consumed) = serde_json_core::de::from_slice(line)?;
    Ok(snapshot)
}
