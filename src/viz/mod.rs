//! Visualization: render a [`Chart`] to **SVG** or **PNG** with Plotters.
//!
//! - Automatic series colors come from the Microsoft Office palette
//! - Series kinds: line, area, scatter, stair step, bar, high/low
//! - Legend for titled series, labels truncated to fit

pub mod text;
pub mod types;
pub mod util;

pub use types::{Chart, RenderSize};

use crate::series::Series;
use anyhow::Result;
use thiserror::Error;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{AreaSeries, LineSeries};
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fmt::Debug;
use std::path::Path;
use std::sync::Once;

use text::fit_label;
use util::{compute_left_label_area_px, data_bounds, format_tick, resolve_color};

/// A Plotters drawing failure.
#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct ChartError(pub String);

fn chart_err<E: Debug>(e: E) -> anyhow::Error {
    ChartError(format!("{e:?}")).into()
}

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render to a file; the backend follows the extension (`.svg`, anything else bitmap).
pub fn render_to_file<P: AsRef<Path>>(chart: &Chart, out_path: P, size: RenderSize) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let dims = (size.width, size.height);
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), dims).into_drawing_area();
        draw_chart(&root, chart, size)?;
        root.present().map_err(chart_err)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), dims).into_drawing_area();
        draw_chart(&root, chart, size)?;
        root.present().map_err(chart_err)?;
    }
    log::info!("rendered {} series to {}", chart.series.len(), out_path.display());
    Ok(())
}

/// Render to an SVG document in memory.
pub fn render_svg(chart: &Chart, size: RenderSize) -> Result<String> {
    ensure_fonts_registered();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
        draw_chart(&root, chart, size)?;
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Render to a packed RGB8 buffer (`width * height * 3` bytes), e.g. for a preview texture.
pub fn render_rgb(chart: &Chart, size: RenderSize) -> Result<Vec<u8>> {
    ensure_fonts_registered();
    let mut buf = vec![0u8; size.width as usize * size.height as usize * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (size.width, size.height)).into_drawing_area();
        draw_chart(&root, chart, size)?;
        root.present().map_err(chart_err)?;
    }
    Ok(buf)
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &Chart, size: RenderSize) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    const Y_TICKS: usize = 8;
    const LEGEND_FONT_PX: u32 = 13;

    let background = if size.background.is_automatic() {
        WHITE.to_rgba()
    } else {
        resolve_color(size.background, 0)
    };
    root.fill(&background).map_err(chart_err)?;

    let b = data_bounds(&chart.series);
    let left_label_width_px = compute_left_label_area_px(b.y_min, b.y_max, Y_TICKS, 12);

    // Bar labels replace numeric x ticks when a bar series is present.
    let bar_labels: Vec<String> = chart
        .series
        .iter()
        .find_map(|s| match s {
            Series::Bar(bar) => Some(bar.items.iter().map(|i| i.label.clone()).collect()),
            _ => None,
        })
        .unwrap_or_default();
    let x_label_fmt = |x: &f64| {
        if bar_labels.is_empty() {
            return format_tick(*x);
        }
        let rounded = x.round();
        if (x - rounded).abs() < 1e-9 && rounded >= 0.0 {
            bar_labels.get(rounded as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |y: &f64| format_tick(*y);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    let title = chart.title.trim();
    if !title.is_empty() {
        builder.caption(title, (FontFamily::SansSerif, 20));
    }
    let mut ctx = builder
        .build_cartesian_2d(b.x_min..b.x_max, b.y_min..b.y_max)
        .map_err(chart_err)?;

    ctx.configure_mesh()
        .x_labels(if bar_labels.is_empty() { 10 } else { bar_labels.len() * 2 + 1 })
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(chart_err)?;

    let legend_max_px = (size.width / 3).max(60);
    let mut any_legend = false;

    for (idx, series) in chart.series.iter().enumerate() {
        let label = fit_label(series.title().trim(), LEGEND_FONT_PX, legend_max_px);
        let (color, anno) = match series {
            Series::Line(line) => {
                let color = resolve_color(line.color, idx);
                let stroke = color.stroke_width(line.stroke_thickness.round() as u32);
                let pts: Vec<(f64, f64)> = line.points.iter().map(|p| (p.x, p.y)).collect();
                if line.marker_size > 0.0 {
                    let r = line.marker_size.round() as i32;
                    ctx.draw_series(pts.iter().map(|&p| Circle::new(p, r, color.filled())))
                        .map_err(chart_err)?;
                }
                let anno = ctx
                    .draw_series(LineSeries::new(pts, stroke))
                    .map_err(chart_err)?;
                (color, anno)
            }
            Series::Area(area) => {
                let color = resolve_color(area.color, idx);
                let fill = if area.fill.is_automatic() {
                    color.mix(0.3)
                } else {
                    resolve_color(area.fill, idx)
                };
                let stroke = color.stroke_width(area.stroke_thickness.round() as u32);
                let anno = ctx
                    .draw_series(
                        AreaSeries::new(area.points.iter().map(|p| (p.x, p.y)), 0.0, fill)
                            .border_style(stroke),
                    )
                    .map_err(chart_err)?;
                (color, anno)
            }
            Series::Scatter(sc) => {
                let color = resolve_color(sc.marker_fill, idx);
                let anno = ctx
                    .draw_series(sc.points.iter().map(|p| {
                        let r = if p.size > 0.0 { p.size } else { sc.marker_size };
                        Circle::new((p.x, p.y), r.round() as i32, color.filled())
                    }))
                    .map_err(chart_err)?;
                (color, anno)
            }
            Series::StairStep(step) => {
                let color = resolve_color(step.color, idx);
                let stroke = color.stroke_width(step.stroke_thickness.round() as u32);
                let mut pts: Vec<(f64, f64)> = Vec::with_capacity(step.points.len() * 2);
                for p in &step.points {
                    if let Some(&(_, prev_y)) = pts.last() {
                        pts.push((p.x, prev_y));
                    }
                    pts.push((p.x, p.y));
                }
                let anno = ctx
                    .draw_series(LineSeries::new(pts, stroke))
                    .map_err(chart_err)?;
                (color, anno)
            }
            Series::Bar(bar) => {
                let color = resolve_color(bar.fill_color, idx);
                let half = bar.bar_width.clamp(0.05, 1.0) / 2.0;
                let anno = ctx
                    .draw_series(bar.items.iter().enumerate().map(|(i, item)| {
                        let x = i as f64;
                        Rectangle::new([(x - half, 0.0), (x + half, item.value)], color.filled())
                    }))
                    .map_err(chart_err)?;
                (color, anno)
            }
            Series::HighLow(hl) => {
                let color = resolve_color(hl.color, idx);
                let stroke = color.stroke_width(hl.stroke_thickness.round().max(1.0) as u32);
                let tick = hl.tick_length;
                let anno = ctx
                    .draw_series(hl.items.iter().flat_map(|item| {
                        [
                            PathElement::new(vec![(item.x, item.low), (item.x, item.high)], stroke),
                            PathElement::new(
                                vec![(item.x - tick, item.open), (item.x, item.open)],
                                stroke,
                            ),
                            PathElement::new(
                                vec![(item.x, item.close), (item.x + tick, item.close)],
                                stroke,
                            ),
                        ]
                    }))
                    .map_err(chart_err)?;
                (color, anno)
            }
        };
        if !label.is_empty() {
            any_legend = true;
            anno.label(label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
        }
    }

    if any_legend {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .label_font((FontFamily::SansSerif, LEGEND_FONT_PX))
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(chart_err)?;
    }
    Ok(())
}
