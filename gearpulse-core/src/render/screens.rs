//! Per-mode screen formatting
//!
//! Pure functions from a telemetry snapshot to the two 16-byte rows of each
//! display mode. The divergence mode builds its own rows in
//! [`crate::divergence`].

use core::fmt::Write;

use gearpulse_protocol::TelemetrySnapshot;
use heapless::String;

use super::row::{Row, RowBuf, BLANK_ROW, ROW_WIDTH};
use crate::glyphs::{bar_code, DOWN_ARROW_CODE, UP_ARROW_CODE};

/// HD44780 character code of the degree sign.
const DEGREE: u8 = 0xDF;

/// Sub-cell resolution of the bar graph (lit columns per cell).
const BAR_SUBCELLS: u32 = 5;

/// CPU/GPU temperature and load, one unit per row.
pub fn primary_metrics(snap: &TelemetrySnapshot) -> [Row; 2] {
    [
        metric_row("CPU:", snap.cpu.temp, snap.cpu.load),
        metric_row("GPU:", snap.gpu.temp, snap.gpu.load),
    ]
}

fn metric_row(label: &str, temp: f32, load: f32) -> Row {
    let mut buf = RowBuf::new();
    let _ = write!(buf, "{}  {}", label, round_to_i32(temp));
    buf.push_byte(DEGREE);
    let _ = write!(buf, "C {:.1}%", load);
    buf.finish()
}

/// RAM usage line plus the 16-cell bar graph.
pub fn memory(snap: &TelemetrySnapshot) -> [Row; 2] {
    let mut buf = RowBuf::new();
    let _ = write!(
        buf,
        "RAM: {}/{}GB {}%",
        snap.ram.used as i32,
        snap.ram.total as i32,
        snap.ram.usage_percent as i32
    );
    [buf.finish(), ram_bar(snap.ram.usage_percent as u8)]
}

/// Bar graph row for a usage percentage.
///
/// Whole cells fill left to right; the remainder selects one of five partial
/// glyphs, giving 80 distinguishable positions across the 16 cells.
pub fn ram_bar(percent: u8) -> Row {
    let ticks = u32::from(percent) * ROW_WIDTH as u32 * BAR_SUBCELLS / 100;
    let full_cells = ticks / BAR_SUBCELLS;
    let remainder = (ticks % BAR_SUBCELLS) as u8;

    let mut row = BLANK_ROW;
    for (i, cell) in row.iter_mut().enumerate() {
        let i = i as u32;
        *cell = if i < full_cells {
            bar_code(5)
        } else if i == full_cells && remainder > 0 {
            bar_code(remainder)
        } else {
            bar_code(0)
        };
    }
    row
}

/// Network throughput: arrow glyphs with formatted rates.
pub fn network(snap: &TelemetrySnapshot) -> [Row; 2] {
    let mut top = RowBuf::new();
    top.push_str("NET:");

    let mut bottom = RowBuf::new();
    bottom.push_byte(DOWN_ARROW_CODE);
    bottom.push_byte(b':');
    bottom.push_str(&format_net_speed(snap.net.download));
    bottom.push_byte(b' ');
    bottom.push_byte(UP_ARROW_CODE);
    bottom.push_byte(b':');
    bottom.push_str(&format_net_speed(snap.net.upload));

    [top.finish(), bottom.finish()]
}

/// Format a byte rate with a one-character unit suffix.
///
/// Integer bytes below 1 KiB, integer kilobytes below 1 MiB, one-decimal
/// megabytes above.
pub fn format_net_speed(bytes_per_sec: f32) -> String<8> {
    let mut s = String::new();
    if bytes_per_sec < 1024.0 {
        let _ = write!(s, "{:.0}B", bytes_per_sec);
    } else if bytes_per_sec < 1024.0 * 1024.0 {
        let _ = write!(s, "{:.0}K", bytes_per_sec / 1024.0);
    } else {
        let _ = write!(s, "{:.1}M", bytes_per_sec / (1024.0 * 1024.0));
    }
    s
}

/// Round to nearest integer, halves away from zero. `f32::round` lives in
/// std, not core.
fn round_to_i32(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearpulse_protocol::decode;
    use proptest::prelude::*;

    fn snapshot() -> TelemetrySnapshot {
        decode(
            br#"{"cpu":{"load":42.5,"temp":61.4},"gpu":{"load":12.0,"temp":47.6},"ram":{"total":32.0,"used":11.7,"usagePercent":50.0},"network":{"upload":2048.0,"download":500.0}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_primary_metrics_rows() {
        let [row0, row1] = primary_metrics(&snapshot());
        assert_eq!(&row0, b"CPU:  61\xDFC 42.5%");
        assert_eq!(&row1, b"GPU:  48\xDFC 12.0%");
    }

    #[test]
    fn test_memory_row_truncates_values() {
        let [row0, _] = memory(&snapshot());
        assert_eq!(&row0, b"RAM: 11/32GB 50%");
    }

    #[test]
    fn test_bar_boundaries() {
        assert_eq!(ram_bar(0), [bar_code(0); 16]);
        assert_eq!(ram_bar(100), [bar_code(5); 16]);

        // 50% is exactly 8 full cells, no partial.
        let row = ram_bar(50);
        assert_eq!(&row[..8], &[bar_code(5); 8]);
        assert_eq!(&row[8..], &[bar_code(0); 8]);
    }

    #[test]
    fn test_bar_partial_cell() {
        // 33% of 80 sub-cells = 26 ticks: 5 full cells + level-1 partial.
        let row = ram_bar(33);
        assert_eq!(&row[..5], &[bar_code(5); 5]);
        assert_eq!(row[5], bar_code(1));
        assert_eq!(row[6], bar_code(0));
    }

    #[test]
    fn test_network_rows() {
        let [row0, row1] = network(&snapshot());
        assert_eq!(&row0, b"NET:            ");
        assert_eq!(&row1, b"\x01:500B \x00:2K     ");
    }

    #[test]
    fn test_net_speed_suffixes() {
        assert_eq!(format_net_speed(500.0).as_str(), "500B");
        assert_eq!(format_net_speed(2048.0).as_str(), "2K");
        assert_eq!(format_net_speed(1_572_864.0).as_str(), "1.5M");
        assert_eq!(format_net_speed(0.0).as_str(), "0B");
        assert_eq!(format_net_speed(1023.0).as_str(), "1023B");
    }

    #[test]
    fn test_rows_never_exceed_width() {
        let mut snap = snapshot();
        snap.net.download = 123_456_789.0;
        snap.net.upload = 987_654_321.0;
        let [_, row1] = network(&snap);
        assert_eq!(row1.len(), ROW_WIDTH);
    }

    #[test]
    fn test_round_to_i32() {
        assert_eq!(round_to_i32(61.4), 61);
        assert_eq!(round_to_i32(61.5), 62);
        assert_eq!(round_to_i32(0.0), 0);
        assert_eq!(round_to_i32(-0.6), -1);
    }

    proptest! {
        /// Every bar is a run of full cells, at most one partial, then
        /// empties: cell fill levels are valid glyph codes and never
        /// increase left to right.
        #[test]
        fn prop_bar_levels_valid_and_non_increasing(percent in 0u8..=100) {
            let row = ram_bar(percent);
            let mut prev = bar_code(5);
            for &cell in &row {
                prop_assert!((bar_code(0)..=bar_code(5)).contains(&cell));
                prop_assert!(cell <= prev);
                prev = cell;
            }
        }
    }
}
