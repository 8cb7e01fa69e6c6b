//! Chart export: per-format options edited in the property grid, then a file write.

use crate::color::Color;
use crate::descriptor::{Describe, PropertyDescriptor, Value, ValueKind};
use crate::viz::{self, Chart, RenderSize};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 700;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const MIN_DIMENSION: u32 = 16;
pub const MAX_DIMENSION: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported export format: {0}")]
pub struct UnsupportedFormat(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    /// Format from the file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "" => Err(UnsupportedFormat(format!("{} has no extension", path.display())).into()),
            other => Err(UnsupportedFormat(format!(".{other}")).into()),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("PNG"),
            ExportFormat::Svg => f.write_str("SVG"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl ExportOptions {
    pub fn for_format(format: ExportFormat) -> Self {
        Self {
            format,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: Color::WHITE,
        }
    }

    pub fn for_path(path: &Path) -> Result<Self> {
        Ok(Self::for_format(ExportFormat::from_path(path)?))
    }

    pub fn render_size(&self) -> RenderSize {
        RenderSize {
            width: self.width,
            height: self.height,
            background: self.background,
        }
    }
}

fn dimension(name: &str, get: fn(&ExportOptions) -> u32, set: fn(&mut ExportOptions, u32)) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Int,
        move |o: &ExportOptions| Value::Int(get(o) as i64),
        move |o: &mut ExportOptions, v| {
            let px = v
                .into_int()?
                .clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64);
            set(o, px as u32);
            Ok(())
        },
    )
    .with_category("Layout")
}

impl Describe for ExportOptions {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::read_only("Format", ValueKind::Choice, |o: &ExportOptions| {
                Value::Choice(o.format.to_string())
            })
            .with_category("Output"),
            dimension("Width", |o| o.width, |o, v| o.width = v)
                .with_description("Image width in pixels"),
            dimension("Height", |o| o.height, |o, v| o.height = v)
                .with_description("Image height in pixels"),
            PropertyDescriptor::read_write(
                "Background",
                ValueKind::Color,
                |o: &ExportOptions| Value::Color(o.background),
                |o: &mut ExportOptions, v| {
                    o.background = v.into_color()?;
                    Ok(())
                },
            )
            .with_category("Layout")
            .with_child::<ExportOptions>(
                |o| Some(&o.background as &dyn Any),
                |o| Some(&mut o.background as &mut dyn Any),
            ),
        ]
    }
}

/// Write `chart` to `path`. The extension must agree with `options.format`.
pub fn export_chart(chart: &Chart, path: &Path, options: &ExportOptions) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    if format != options.format {
        bail!(
            "export options are for {} but {} is a {} file",
            options.format,
            path.display(),
            format
        );
    }
    match format {
        ExportFormat::Png => viz::render_to_file(chart, path, options.render_size())
            .with_context(|| format!("exporting {}", path.display()))?,
        ExportFormat::Svg => {
            let svg = viz::render_svg(chart, options.render_size())?;
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            out.write_all(svg.as_bytes())?;
            out.flush()?;
        }
    }
    log::info!(
        "exported {} chart ({}x{}) to {}",
        format,
        options.width,
        options.height,
        path.display()
    );
    Ok(())
}
