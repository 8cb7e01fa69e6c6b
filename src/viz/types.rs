//! Public types for the visualization module.

use crate::color::Color;
use crate::rows::SeriesList;
use crate::series::Series;

/// What gets drawn: a title plus the visible series, in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// Snapshot the visible series of `list`.
    pub fn from_list(list: &SeriesList) -> Self {
        Self {
            title: String::new(),
            series: list.series().filter(|s| s.is_visible()).cloned().collect(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn item_count(&self) -> usize {
        self.series.iter().map(Series::item_count).sum()
    }
}

/// Pixel size and background of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl RenderSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
        }
    }
}
