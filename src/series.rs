//! Chart series variants and their item-element types.
//!
//! Every series variant is its own describable type so the property grid can show
//! (and hide) its settings independently. Each variant maps to exactly one item
//! type through [`SeriesKind::item_kind`]; rows of the data table are turned into
//! items through that mapping.

use crate::color::Color;
use crate::descriptor::{
    ConverterContext, Describe, DescriptorError, DescriptorRegistry, DropDownConverter,
    PropertyDescriptor, Value, ValueKind,
};
use crate::mapping::ColumnMapping;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// Chart series variants offered in the "Graph type" dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Area,
    Scatter,
    StairStep,
    Bar,
    HighLow,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 6] = [
        SeriesKind::Line,
        SeriesKind::Area,
        SeriesKind::Scatter,
        SeriesKind::StairStep,
        SeriesKind::Bar,
        SeriesKind::HighLow,
    ];

    /// Name of the Rust type implementing this variant.
    pub fn type_name(self) -> &'static str {
        match self {
            SeriesKind::Line => "LineSeries",
            SeriesKind::Area => "AreaSeries",
            SeriesKind::Scatter => "ScatterSeries",
            SeriesKind::StairStep => "StairStepSeries",
            SeriesKind::Bar => "BarSeries",
            SeriesKind::HighLow => "HighLowSeries",
        }
    }

    /// "StairStepSeries" -> "Stair Step".
    pub fn display_name(self) -> String {
        let name = self.type_name();
        let name = name.strip_suffix("Series").unwrap_or(name);
        let mut out = String::with_capacity(name.len() + 2);
        for (i, ch) in name.chars().enumerate() {
            if i != 0 && ch.is_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Explicit variant -> item-element mapping.
    pub fn item_kind(self) -> ItemKind {
        match self {
            SeriesKind::Line | SeriesKind::Area | SeriesKind::StairStep => ItemKind::DataPoint,
            SeriesKind::Scatter => ItemKind::ScatterPoint,
            SeriesKind::Bar => ItemKind::BarItem,
            SeriesKind::HighLow => ItemKind::HighLowItem,
        }
    }

    /// Dropdown over every variant's display name.
    pub fn converter() -> DropDownConverter {
        DropDownConverter::fixed(
            Self::ALL
                .iter()
                .map(|k| Value::Choice(k.display_name()))
                .collect(),
        )
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for SeriesKind {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| {
                k.display_name().eq_ignore_ascii_case(wanted)
                    || k.type_name().eq_ignore_ascii_case(wanted)
                    || k.display_name().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| DescriptorError::InvalidChoice(s.to_string()))
    }
}

/// Item-element types a series can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Fixed X/Y coordinate pair.
    DataPoint,
    ScatterPoint,
    BarItem,
    HighLowItem,
}

impl ItemKind {
    /// Field names in declaration order. Kept equal to the `Describe` tables.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            ItemKind::DataPoint => &["X", "Y"],
            ItemKind::ScatterPoint => &["X", "Y", "Size"],
            ItemKind::BarItem => &["Label", "Value"],
            ItemKind::HighLowItem => &["X", "High", "Low", "Open", "Close"],
        }
    }

    /// Writable fields as currently described by the registry. `DataPoint` always
    /// yields exactly `X` and `Y`.
    pub fn writable_fields(self, registry: &DescriptorRegistry) -> Vec<String> {
        let descriptor = match self {
            ItemKind::DataPoint => return vec!["X".to_string(), "Y".to_string()],
            ItemKind::ScatterPoint => registry.install::<ScatterPoint>(),
            ItemKind::BarItem => registry.install::<BarItem>(),
            ItemKind::HighLowItem => registry.install::<HighLowItem>(),
        };
        descriptor
            .properties()
            .iter()
            .filter(|p| !p.is_read_only())
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Build one item from a table row.
    ///
    /// A row whose first table cell is blank yields nothing, whatever the mapping
    /// says. The first column marks which rows carry data, so a mapped X or Y in
    /// another column does not rescue a row with an empty first cell.
    pub fn from_row(
        self,
        registry: &DescriptorRegistry,
        mapping: &ColumnMapping,
        columns: &[String],
        cells: &[String],
    ) -> Option<Item> {
        if cells.first().is_none_or(|c| c.trim().is_empty()) {
            return None;
        }
        match self {
            ItemKind::DataPoint => {
                let parse = |field, position| {
                    cell_for(mapping, columns, cells, field, position)?
                        .trim()
                        .parse::<f64>()
                        .ok()
                };
                let x = parse("X", 0)?;
                let y = parse("Y", 1)?;
                Some(Item::Point(DataPoint { x, y }))
            }
            ItemKind::ScatterPoint => {
                Some(Item::Scatter(fill_item(registry, mapping, columns, cells)))
            }
            ItemKind::BarItem => Some(Item::Bar(fill_item(registry, mapping, columns, cells))),
            ItemKind::HighLowItem => {
                Some(Item::HighLow(fill_item(registry, mapping, columns, cells)))
            }
        }
    }
}

/// Cell for `field`: the mapped column if any, else the column at `position`.
fn cell_for<'a>(
    mapping: &ColumnMapping,
    columns: &[String],
    cells: &'a [String],
    field: &str,
    position: usize,
) -> Option<&'a str> {
    let index = match mapping.get(field) {
        Some(column) => columns.iter().position(|c| c == column)?,
        None => position,
    };
    cells.get(index).map(String::as_str)
}

/// Default-construct `T` and assign every writable field that parses.
fn fill_item<T: Describe + Default>(
    registry: &DescriptorRegistry,
    mapping: &ColumnMapping,
    columns: &[String],
    cells: &[String],
) -> T {
    let descriptor = registry.install::<T>();
    let mut item = T::default();
    let writable = descriptor.properties().iter().filter(|p| !p.is_read_only());
    for (position, prop) in writable.enumerate() {
        let Some(text) = cell_for(mapping, columns, cells, prop.name(), position) else {
            continue;
        };
        let Some(converter) = registry.converter_for(prop) else {
            continue;
        };
        let ctx = ConverterContext::new(registry).with_property(prop);
        let assigned = converter
            .try_convert_from(&ctx, text)
            .map_err(|e| e.to_string())
            .and_then(|v| prop.set(&mut item, v).map_err(|e| e.to_string()));
        if let Err(err) = assigned {
            log::debug!("skipping field {}: {err}", prop.name());
        }
    }
    item
}

fn float_field<T: Any>(name: &str, get: fn(&T) -> f64, set: fn(&mut T, f64)) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Float,
        move |t: &T| Value::Float(get(t)),
        move |t: &mut T, v| {
            set(t, v.into_float()?);
            Ok(())
        },
    )
}

fn text_field<T: Any>(
    name: &str,
    get: fn(&T) -> &str,
    set: fn(&mut T, String),
) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Text,
        move |t: &T| Value::Text(get(t).to_string()),
        move |t: &mut T, v| {
            set(t, v.into_text()?);
            Ok(())
        },
    )
}

/// Color property that also expands into the color's channels.
fn color_field<T: Any>(
    name: &str,
    field: fn(&T) -> &Color,
    field_mut: fn(&mut T) -> &mut Color,
) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Color,
        move |t: &T| Value::Color(*field(t)),
        move |t: &mut T, v| {
            *field_mut(t) = v.into_color()?;
            Ok(())
        },
    )
    .with_category("Appearance")
    .with_child::<T>(
        move |t| Some(field(t) as &dyn Any),
        move |t| Some(field_mut(t) as &mut dyn Any),
    )
}

fn bool_field<T: Any>(name: &str, get: fn(&T) -> bool, set: fn(&mut T, bool)) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Bool,
        move |t: &T| Value::Bool(get(t)),
        move |t: &mut T, v| {
            set(t, v.into_bool()?);
            Ok(())
        },
    )
}

/// Non-negative float in the "Appearance" category.
fn width_field<T: Any>(name: &str, get: fn(&T) -> f64, set: fn(&mut T, f64)) -> PropertyDescriptor {
    PropertyDescriptor::read_write(
        name,
        ValueKind::Float,
        move |t: &T| Value::Float(get(t)),
        move |t: &mut T, v| {
            set(t, v.into_float()?.max(0.0));
            Ok(())
        },
    )
    .with_category("Appearance")
}

fn count_field<T: Any>(name: &str, count: fn(&T) -> usize) -> PropertyDescriptor {
    PropertyDescriptor::read_only(name, ValueKind::Int, move |t: &T| {
        Value::Int(count(t) as i64)
    })
    .with_category("Data")
}

// ----------------------------
// Item-element types
// ----------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl Describe for DataPoint {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            float_field("X", |p: &Self| p.x, |p, v| p.x = v),
            float_field("Y", |p: &Self| p.y, |p, v| p.y = v),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker radius; 0 uses the series' marker size.
    pub size: f64,
}

impl Describe for ScatterPoint {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            float_field("X", |p: &Self| p.x, |p, v| p.x = v),
            float_field("Y", |p: &Self| p.y, |p, v| p.y = v),
            float_field("Size", |p: &Self| p.size, |p, v| p.size = v.max(0.0)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarItem {
    pub label: String,
    pub value: f64,
}

impl Describe for BarItem {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Label", |b: &Self| &b.label, |b, v| b.label = v),
            float_field("Value", |b: &Self| b.value, |b, v| b.value = v),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighLowItem {
    pub x: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
}

impl Describe for HighLowItem {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            float_field("X", |h: &Self| h.x, |h, v| h.x = v),
            float_field("High", |h: &Self| h.high, |h, v| h.high = v),
            float_field("Low", |h: &Self| h.low, |h, v| h.low = v),
            float_field("Open", |h: &Self| h.open, |h, v| h.open = v),
            float_field("Close", |h: &Self| h.close, |h, v| h.close = v),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Point(DataPoint),
    Scatter(ScatterPoint),
    Bar(BarItem),
    HighLow(HighLowItem),
}

// ----------------------------
// Series variants
// ----------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub title: String,
    pub color: Color,
    pub stroke_thickness: f64,
    /// Marker radius; 0 draws no markers.
    pub marker_size: f64,
    pub visible: bool,
    pub points: Vec<DataPoint>,
}

impl Default for LineSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: Color::AUTOMATIC,
            stroke_thickness: 2.0,
            marker_size: 0.0,
            visible: true,
            points: Vec::new(),
        }
    }
}

impl Describe for LineSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("Color", |s: &Self| &s.color, |s: &mut Self| &mut s.color),
            width_field("StrokeThickness", |s: &Self| s.stroke_thickness, |s, v| {
                s.stroke_thickness = v
            })
            .with_display_name("Stroke thickness"),
            width_field("MarkerSize", |s: &Self| s.marker_size, |s, v| s.marker_size = v)
                .with_display_name("Marker size"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("PointCount", |s: &Self| s.points.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaSeries {
    pub title: String,
    pub color: Color,
    /// Fill below the line; automatic uses a translucent line color.
    pub fill: Color,
    pub stroke_thickness: f64,
    pub visible: bool,
    pub points: Vec<DataPoint>,
}

impl Default for AreaSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: Color::AUTOMATIC,
            fill: Color::AUTOMATIC,
            stroke_thickness: 2.0,
            visible: true,
            points: Vec::new(),
        }
    }
}

impl Describe for AreaSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("Color", |s: &Self| &s.color, |s: &mut Self| &mut s.color),
            color_field("Fill", |s: &Self| &s.fill, |s: &mut Self| &mut s.fill),
            width_field("StrokeThickness", |s: &Self| s.stroke_thickness, |s, v| {
                s.stroke_thickness = v
            })
            .with_display_name("Stroke thickness"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("PointCount", |s: &Self| s.points.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub title: String,
    pub marker_fill: Color,
    pub marker_size: f64,
    pub visible: bool,
    pub points: Vec<ScatterPoint>,
}

impl Default for ScatterSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            marker_fill: Color::AUTOMATIC,
            marker_size: 5.0,
            visible: true,
            points: Vec::new(),
        }
    }
}

impl Describe for ScatterSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("MarkerFill", |s: &Self| &s.marker_fill, |s: &mut Self| &mut s.marker_fill)
                .with_display_name("Marker fill"),
            width_field("MarkerSize", |s: &Self| s.marker_size, |s, v| s.marker_size = v)
                .with_display_name("Marker size"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("PointCount", |s: &Self| s.points.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StairStepSeries {
    pub title: String,
    pub color: Color,
    pub stroke_thickness: f64,
    pub visible: bool,
    pub points: Vec<DataPoint>,
}

impl Default for StairStepSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: Color::AUTOMATIC,
            stroke_thickness: 2.0,
            visible: true,
            points: Vec::new(),
        }
    }
}

impl Describe for StairStepSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("Color", |s: &Self| &s.color, |s: &mut Self| &mut s.color),
            width_field("StrokeThickness", |s: &Self| s.stroke_thickness, |s, v| {
                s.stroke_thickness = v
            })
            .with_display_name("Stroke thickness"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("PointCount", |s: &Self| s.points.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    pub fill_color: Color,
    /// Bar width as a fraction of the category slot.
    pub bar_width: f64,
    pub visible: bool,
    pub items: Vec<BarItem>,
}

impl Default for BarSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            fill_color: Color::AUTOMATIC,
            bar_width: 0.8,
            visible: true,
            items: Vec::new(),
        }
    }
}

impl Describe for BarSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("FillColor", |s: &Self| &s.fill_color, |s: &mut Self| &mut s.fill_color)
                .with_display_name("Fill color"),
            width_field("BarWidth", |s: &Self| s.bar_width, |s, v| s.bar_width = v.min(1.0))
                .with_display_name("Bar width")
                .with_description("Fraction of the category slot covered by the bar"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("ItemCount", |s: &Self| s.items.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighLowSeries {
    pub title: String,
    pub color: Color,
    pub stroke_thickness: f64,
    /// Open/close tick length in x-axis units.
    pub tick_length: f64,
    pub visible: bool,
    pub items: Vec<HighLowItem>,
}

impl Default for HighLowSeries {
    fn default() -> Self {
        Self {
            title: String::new(),
            color: Color::AUTOMATIC,
            stroke_thickness: 1.0,
            tick_length: 0.25,
            visible: true,
            items: Vec::new(),
        }
    }
}

impl Describe for HighLowSeries {
    fn describe_fields() -> Vec<PropertyDescriptor> {
        vec![
            text_field("Title", |s: &Self| &s.title, |s, v| s.title = v).with_category("Legend"),
            color_field("Color", |s: &Self| &s.color, |s: &mut Self| &mut s.color),
            width_field("StrokeThickness", |s: &Self| s.stroke_thickness, |s, v| {
                s.stroke_thickness = v
            })
            .with_display_name("Stroke thickness"),
            width_field("TickLength", |s: &Self| s.tick_length, |s, v| s.tick_length = v)
                .with_display_name("Tick length"),
            bool_field("IsVisible", |s: &Self| s.visible, |s, v| s.visible = v)
                .with_display_name("Visible"),
            count_field("ItemCount", |s: &Self| s.items.len()),
        ]
    }
}

/// One chart series of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Line(LineSeries),
    Area(AreaSeries),
    Scatter(ScatterSeries),
    StairStep(StairStepSeries),
    Bar(BarSeries),
    HighLow(HighLowSeries),
}

impl Series {
    pub fn new(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Line => Series::Line(LineSeries::default()),
            SeriesKind::Area => Series::Area(AreaSeries::default()),
            SeriesKind::Scatter => Series::Scatter(ScatterSeries::default()),
            SeriesKind::StairStep => Series::StairStep(StairStepSeries::default()),
            SeriesKind::Bar => Series::Bar(BarSeries::default()),
            SeriesKind::HighLow => Series::HighLow(HighLowSeries::default()),
        }
    }

    pub fn kind(&self) -> SeriesKind {
        match self {
            Series::Line(_) => SeriesKind::Line,
            Series::Area(_) => SeriesKind::Area,
            Series::Scatter(_) => SeriesKind::Scatter,
            Series::StairStep(_) => SeriesKind::StairStep,
            Series::Bar(_) => SeriesKind::Bar,
            Series::HighLow(_) => SeriesKind::HighLow,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Series::Line(s) => &s.title,
            Series::Area(s) => &s.title,
            Series::Scatter(s) => &s.title,
            Series::StairStep(s) => &s.title,
            Series::Bar(s) => &s.title,
            Series::HighLow(s) => &s.title,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Series::Line(s) => s.visible,
            Series::Area(s) => s.visible,
            Series::Scatter(s) => s.visible,
            Series::StairStep(s) => s.visible,
            Series::Bar(s) => s.visible,
            Series::HighLow(s) => s.visible,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Series::Line(s) => s.points.len(),
            Series::Area(s) => s.points.len(),
            Series::Scatter(s) => s.points.len(),
            Series::StairStep(s) => s.points.len(),
            Series::Bar(s) => s.items.len(),
            Series::HighLow(s) => s.items.len(),
        }
    }

    /// Replace the series data. Items of a foreign item kind are ignored.
    pub fn set_items(&mut self, items: Vec<Item>) {
        fn points(items: Vec<Item>) -> Vec<DataPoint> {
            items
                .into_iter()
                .filter_map(|i| match i {
                    Item::Point(p) => Some(p),
                    _ => None,
                })
                .collect()
        }
        match self {
            Series::Line(s) => s.points = points(items),
            Series::Area(s) => s.points = points(items),
            Series::StairStep(s) => s.points = points(items),
            Series::Scatter(s) => {
                s.points = items
                    .into_iter()
                    .filter_map(|i| match i {
                        Item::Scatter(p) => Some(p),
                        _ => None,
                    })
                    .collect()
            }
            Series::Bar(s) => {
                s.items = items
                    .into_iter()
                    .filter_map(|i| match i {
                        Item::Bar(b) => Some(b),
                        _ => None,
                    })
                    .collect()
            }
            Series::HighLow(s) => {
                s.items = items
                    .into_iter()
                    .filter_map(|i| match i {
                        Item::HighLow(h) => Some(h),
                        _ => None,
                    })
                    .collect()
            }
        }
    }

    pub fn as_any(&self) -> &dyn Any {
        match self {
            Series::Line(s) => s,
            Series::Area(s) => s,
            Series::Scatter(s) => s,
            Series::StairStep(s) => s,
            Series::Bar(s) => s,
            Series::HighLow(s) => s,
        }
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        match self {
            Series::Line(s) => s,
            Series::Area(s) => s,
            Series::Scatter(s) => s,
            Series::StairStep(s) => s,
            Series::Bar(s) => s,
            Series::HighLow(s) => s,
        }
    }
}

/// Install every series and item type. Read-only series properties are hidden
/// from the grid.
pub fn install_series_types(registry: &DescriptorRegistry) {
    let descriptors = [
        registry.install::<LineSeries>(),
        registry.install::<AreaSeries>(),
        registry.install::<ScatterSeries>(),
        registry.install::<StairStepSeries>(),
        registry.install::<BarSeries>(),
        registry.install::<HighLowSeries>(),
    ];
    for descriptor in &descriptors {
        for prop in descriptor.properties() {
            if prop.is_read_only() {
                prop.set_browsable(false);
            }
        }
    }
    registry.install::<DataPoint>();
    registry.install::<ScatterPoint>();
    registry.install::<BarItem>();
    registry.install::<HighLowItem>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_split_camel_case() {
        assert_eq!(SeriesKind::StairStep.display_name(), "Stair Step");
        assert_eq!(SeriesKind::HighLow.display_name(), "High Low");
        assert_eq!(SeriesKind::Line.display_name(), "Line");
    }

    #[test]
    fn kinds_parse_from_any_name_form() {
        assert_eq!("stair step".parse::<SeriesKind>().unwrap(), SeriesKind::StairStep);
        assert_eq!("HighLowSeries".parse::<SeriesKind>().unwrap(), SeriesKind::HighLow);
        assert_eq!("highlow".parse::<SeriesKind>().unwrap(), SeriesKind::HighLow);
        assert!("Pie".parse::<SeriesKind>().is_err());
    }

    #[test]
    fn declared_fields_match_descriptor_tables() {
        let registry = DescriptorRegistry::with_default_converters();
        for kind in [ItemKind::ScatterPoint, ItemKind::BarItem, ItemKind::HighLowItem] {
            let declared: Vec<String> = kind.fields().iter().map(|f| f.to_string()).collect();
            assert_eq!(kind.writable_fields(&registry), declared);
        }
        assert_eq!(ItemKind::DataPoint.writable_fields(&registry), vec!["X", "Y"]);
    }

    #[test]
    fn as_any_exposes_concrete_variant() {
        let series = Series::new(SeriesKind::Bar);
        assert!(series.as_any().downcast_ref::<BarSeries>().is_some());
    }
}
