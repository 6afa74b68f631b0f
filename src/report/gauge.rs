//! Gauge geometry shared by the terminal, PDF and PNG renderers.
//!
//! Percentages run 0–100 along a half circle from the left (0 %) to the
//! right (100 %). Points are in math orientation (y grows upwards); callers
//! drawing in screen space flip the y axis.

use std::f64::consts::PI;

pub type Rgb8 = (u8, u8, u8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: Rgb8,
    pub label: &'static str,
}

pub const BANDS: [GaugeBand; 3] = [
    GaugeBand { from: 0.0, to: 50.0, color: (0xd4, 0xed, 0xda), label: "low" },
    GaugeBand { from: 50.0, to: 75.0, color: (0xff, 0xf3, 0xcd), label: "elevated" },
    GaugeBand { from: 75.0, to: 100.0, color: (0xf8, 0xd7, 0xda), label: "critical" },
];

/// Value bar.
pub const BAR_COLOR: Rgb8 = (0x2c, 0x3e, 0x50);
/// Marker drawn at the computed probability.
pub const THRESHOLD_COLOR: Rgb8 = (0xff, 0x00, 0x00);
pub const BORDER_COLOR: Rgb8 = (0x80, 0x80, 0x80);

pub const TITLE: &str = "Probability of Departure";

/// Index into [`BANDS`] for a percentage. Upper bounds are inclusive, so
/// exactly 50 % sits in the low band like the LOW risk class.
pub fn band_index(pct: f64) -> usize {
    if pct <= 50.0 {
        0
    } else if pct <= 75.0 {
        1
    } else {
        2
    }
}

pub fn band_for(pct: f64) -> &'static GaugeBand {
    &BANDS[band_index(pct)]
}

/// Angle in radians: π at 0 %, 0 at 100 %.
pub fn angle_for(pct: f64) -> f64 {
    PI * (1.0 - pct.clamp(0.0, 100.0) / 100.0)
}

pub fn point_at(center: (f64, f64), radius: f64, pct: f64) -> (f64, f64) {
    let a = angle_for(pct);
    (center.0 + radius * a.cos(), center.1 + radius * a.sin())
}

/// Closed outline of the ring section between `from` and `to` percent:
/// the outer arc forwards then the inner arc backwards.
pub fn ring_segment(
    center: (f64, f64),
    outer: f64,
    inner: f64,
    from: f64,
    to: f64,
    segments: usize,
) -> Vec<(f64, f64)> {
    let segments = segments.max(1);
    let step = (to - from) / segments as f64;
    let mut points = Vec::with_capacity(2 * (segments + 1));
    for i in 0..=segments {
        points.push(point_at(center, outer, from + step * i as f64));
    }
    for i in (0..=segments).rev() {
        points.push(point_at(center, inner, from + step * i as f64));
    }
    points
}

/// Cells filled by `pct` on a horizontal bar of `width` cells.
pub fn filled_cells(pct: f64, width: usize) -> usize {
    ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
}

/// Percentage at the middle of cell `index`.
pub fn cell_midpoint(index: usize, width: usize) -> f64 {
    (index as f64 + 0.5) * 100.0 / width as f64
}
