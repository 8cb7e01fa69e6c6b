//! Utility functions for visualization: colors, axis ranges, tick labels.

use crate::color::Color;
use crate::series::Series;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;
use plotters::style::Color as _;

use super::text::label_width_px;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Concrete drawing color; the automatic sentinel takes the palette color for `idx`.
pub fn resolve_color(color: Color, idx: usize) -> RGBAColor {
    if color.is_automatic() {
        office_color(idx)
    } else {
        RGBAColor(color.r, color.g, color.b, color.a as f64 / 255.0)
    }
}

/// Axis extents over every series. Bars span their category slots and pull the
/// y range to zero; areas pull it to zero too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    fn include_y(&mut self, y: f64) {
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }
}

pub fn data_bounds(series: &[Series]) -> Bounds {
    let mut b = Bounds::empty();
    for s in series {
        match s {
            Series::Line(l) => l.points.iter().for_each(|p| b.include(p.x, p.y)),
            Series::StairStep(l) => l.points.iter().for_each(|p| b.include(p.x, p.y)),
            Series::Area(a) => {
                a.points.iter().for_each(|p| b.include(p.x, p.y));
                if !a.points.is_empty() {
                    b.include_y(0.0);
                }
            }
            Series::Scatter(sc) => sc.points.iter().for_each(|p| b.include(p.x, p.y)),
            Series::Bar(bar) => {
                for (i, item) in bar.items.iter().enumerate() {
                    b.include(i as f64 - 0.5, item.value);
                    b.include(i as f64 + 0.5, 0.0);
                }
            }
            Series::HighLow(h) => {
                for item in &h.items {
                    b.include(item.x - h.tick_length, item.low);
                    b.include(item.x + h.tick_length, item.high);
                }
            }
        }
    }
    if !b.x_min.is_finite() {
        return Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };
    }
    if (b.x_max - b.x_min).abs() < f64::EPSILON {
        b.x_min -= 1.0;
        b.x_max += 1.0;
    }
    if (b.y_max - b.y_min).abs() < f64::EPSILON {
        b.y_min -= 1.0;
        b.y_max += 1.0;
    }
    let pad = (b.y_max - b.y_min) * 0.05;
    b.y_min -= if b.y_min == 0.0 { 0.0 } else { pad };
    b.y_max += pad;
    b
}

/// Tick label: grouped whole numbers for large magnitudes, short decimals otherwise.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        (v.round() as i64).to_formatted_string(&Locale::en)
    } else if a >= 100.0 {
        format!("{v:.0}")
    } else if a >= 10.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.2}")
    }
}

/// Left label area width (px) fitting the widest y tick label, clamped.
pub fn compute_left_label_area_px(y_min: f64, y_max: f64, ticks: usize, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = format_tick(y_min + (y_max - y_min) * t);
        max_px = max_px.max(label_width_px(&s, font_px));
    }
    max_px.saturating_add(18).clamp(48, 140)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{BarItem, BarSeries, DataPoint, LineSeries};

    #[test]
    fn automatic_color_uses_palette() {
        assert_eq!(resolve_color(Color::AUTOMATIC, 1), office_color(1));
        let c = resolve_color(Color::rgb(1, 2, 3), 0);
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
    }

    #[test]
    fn bars_include_zero_and_slots() {
        let bar = BarSeries {
            items: vec![
                BarItem {
                    label: "a".into(),
                    value: 4.0,
                },
                BarItem {
                    label: "b".into(),
                    value: 8.0,
                },
            ],
            ..BarSeries::default()
        };
        let b = data_bounds(&[Series::Bar(bar)]);
        assert_eq!((b.x_min, b.x_max), (-0.5, 1.5));
        assert_eq!(b.y_min, 0.0);
        assert!(b.y_max > 8.0);
    }

    #[test]
    fn single_point_gets_a_nonzero_range() {
        let line = LineSeries {
            points: vec![DataPoint { x: 2.0, y: 3.0 }],
            ..LineSeries::default()
        };
        let b = data_bounds(&[Series::Line(line)]);
        assert!(b.x_max > b.x_min && b.y_max > b.y_min);
    }

    #[test]
    fn ticks_group_thousands() {
        assert_eq!(format_tick(12345.0), "12,345");
        assert_eq!(format_tick(2.5), "2.50");
    }
}
