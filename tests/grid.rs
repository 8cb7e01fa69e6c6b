use chartgrid::descriptor::{DescriptorError, PropertyFilter, Value};
use chartgrid::export::{ExportFormat, ExportOptions};
use chartgrid::grid::PropertyGrid;
use chartgrid::{Color, SeriesKind, SeriesList, Workspace};
use std::any::Any;
use std::sync::Arc;

fn paths(ws: &Workspace) -> Vec<String> {
    ws.property_rows()
        .unwrap()
        .into_iter()
        .map(|r| r.path)
        .collect()
}

#[test]
fn no_root_gives_no_rows() {
    let ws = Workspace::new();
    let grid = PropertyGrid::new(Arc::clone(ws.registry()));
    assert!(grid.rows(None).unwrap().is_empty());
}

#[test]
fn undescribed_roots_are_an_error() {
    let ws = Workspace::new();
    let grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let err = grid.rows(Some(&42_u8 as &dyn Any)).unwrap_err();
    assert_eq!(err, DescriptorError::NotDescribed);
}

#[test]
fn selected_series_starts_expanded() {
    let ws = Workspace::new();
    assert_eq!(
        paths(&ws),
        [
            "Count",
            "SelectedSeries",
            "SelectedSeries/Series",
            "SelectedSeries/Columns",
        ]
    );
    let rows = ws.property_rows().unwrap();
    assert_eq!(rows[0].label, "Series count");
    assert_eq!(rows[0].value, "1");
    assert_eq!(rows[1].choices.as_deref(), Some(&["0".to_string()][..]));
    assert_eq!(rows[2].depth, 1);
    assert_eq!(rows[2].value, "");
}

#[test]
fn expanding_the_series_shows_its_browsable_settings() {
    let mut ws = Workspace::new();
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    ws.grid_mut().toggle("SelectedSeries/Series");
    let rows = ws.property_rows().unwrap();
    let settings: Vec<&str> = rows
        .iter()
        .filter(|r| r.depth == 2)
        .map(|r| r.name.as_str())
        .collect();
    // Read-only item counts are hidden.
    assert_eq!(
        settings,
        ["Title", "Color", "StrokeThickness", "MarkerSize", "IsVisible"]
    );
    let visible = rows.iter().find(|r| r.name == "IsVisible").unwrap();
    assert_eq!(visible.label, "Visible");
    assert_eq!(visible.choices.as_deref(), Some(&["true".to_string(), "false".to_string()][..]));

    ws.grid_mut().toggle("SelectedSeries/Series");
    assert!(ws.property_rows().unwrap().iter().all(|r| r.depth < 2));
}

#[test]
fn edits_report_changes_and_refresh_requests() {
    let mut ws = Workspace::new();
    let edit = ws.edit_property("Count", "3").unwrap();
    assert!(edit.changed && edit.refresh);
    assert_eq!(ws.series().len(), 3);

    let again = ws.edit_property("Count", "3").unwrap();
    assert!(!again.changed);

    let select = ws.edit_property("SelectedSeries", "2").unwrap();
    assert!(select.changed && !select.refresh);
    assert_eq!(ws.series().selected(), Some(2));

    // Out of range keeps the selection.
    let ignored = ws.edit_property("SelectedSeries", "9").unwrap();
    assert!(!ignored.changed);
    assert_eq!(ws.series().selected(), Some(2));
}

#[test]
fn nested_edits_reach_the_series() {
    let mut ws = Workspace::new();
    ws.edit_property("SelectedSeries/Series", "Bar").unwrap();
    ws.edit_property("SelectedSeries/Series/Title", "Revenue").unwrap();
    ws.edit_property("SelectedSeries/Series/FillColor", "#336699").unwrap();
    ws.edit_property("SelectedSeries/Series/BarWidth", "2.5").unwrap();

    let Some(chartgrid::Series::Bar(bar)) = ws.series().rows()[0].series() else {
        panic!("expected a bar series");
    };
    assert_eq!(bar.title, "Revenue");
    assert_eq!(bar.fill_color, Color::rgb(0x33, 0x66, 0x99));
    assert_eq!(bar.bar_width, 1.0);
}

#[test]
fn unknown_paths_and_non_expandable_segments_fail() {
    let mut ws = Workspace::new();
    assert!(matches!(
        ws.edit_property("Nope", "1"),
        Err(DescriptorError::UnknownProperty(_))
    ));
    assert!(matches!(
        ws.edit_property("Count/Inner", "1"),
        Err(DescriptorError::NotExpandable(_))
    ));
    // No series yet, so there is nothing below "Series".
    assert!(matches!(
        ws.edit_property("SelectedSeries/Series/Title", "x"),
        Err(DescriptorError::NotExpandable(_))
    ));
}

#[test]
fn hidden_properties_cannot_be_edited_through_the_grid() {
    let mut ws = Workspace::new();
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    assert!(matches!(
        ws.edit_property("SelectedSeries/Series/PointCount", "5"),
        Err(DescriptorError::UnknownProperty(_))
    ));
}

#[test]
fn reset_uses_the_value_first_shown() {
    let ws = Workspace::new();
    let mut grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let mut options = ExportOptions::for_format(ExportFormat::Png);

    let rows = grid.rows(Some(&options as &dyn Any)).unwrap();
    let width = rows.iter().find(|r| r.name == "Width").unwrap();
    assert!(width.can_reset);
    assert_eq!(width.value, "700");

    grid.set_text(&mut options, "Width", "1024").unwrap();
    assert_eq!(options.width, 1024);
    grid.reset(&mut options, "Width").unwrap();
    assert_eq!(options.width, 700);

    grid.expand("Background");
    assert!(grid.is_expanded("Background"));
    grid.collapse("Background");
    assert!(!grid.is_expanded("Background"));
}

#[test]
fn typed_values_bypass_text_conversion() {
    let ws = Workspace::new();
    let grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let mut options = ExportOptions::for_format(ExportFormat::Svg);
    let edit = grid
        .set_value(&mut options, "Background", Value::Color(Color::BLACK))
        .unwrap();
    assert!(edit.changed);
    assert_eq!(options.background, Color::BLACK);
    assert!(matches!(
        grid.set_text(&mut options, "Format", "PNG"),
        Err(DescriptorError::ReadOnly(_))
    ));
}

#[test]
fn custom_filters_limit_the_rows() {
    let ws = Workspace::new();
    let grid = PropertyGrid::new(Arc::clone(ws.registry()))
        .with_filters(vec![PropertyFilter::Category("Layout".into())]);
    let options = ExportOptions::for_format(ExportFormat::Png);
    let names: Vec<String> = grid
        .rows(Some(&options as &dyn Any))
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["Width", "Height", "Background"]);
}

#[test]
fn series_list_describes_without_a_workspace() {
    let ws = Workspace::new();
    let mut grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let mut list = SeriesList::new();
    grid.expand("SelectedSeries");
    grid.set_text(&mut list, "SelectedSeries/Series", "scatter").unwrap();
    assert_eq!(list.rows()[0].kind(), Some(SeriesKind::Scatter));
}

#[test]
fn color_rows_expand_into_channels() {
    let ws = Workspace::new();
    let mut grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let mut options = ExportOptions::for_format(ExportFormat::Png);
    grid.expand("Background");

    let rows = grid.rows(Some(&options as &dyn Any)).unwrap();
    let background = rows.iter().find(|r| r.path == "Background").unwrap();
    assert!(background.expandable && background.expanded);
    let channels: Vec<(&str, &str)> = rows
        .iter()
        .filter(|r| r.path.starts_with("Background/"))
        .map(|r| (r.name.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(channels, [("A", "255"), ("R", "255"), ("G", "255"), ("B", "255")]);

    let edit = grid.set_text(&mut options, "Background/R", "0").unwrap();
    assert!(edit.changed);
    assert_eq!(options.background, Color::rgb(0, 255, 255));
}

#[test]
fn series_color_channels_edit_the_series_color() {
    let mut ws = Workspace::new();
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    ws.edit_property("SelectedSeries/Series/Color", "#336699").unwrap();
    let edit = ws
        .edit_property("SelectedSeries/Series/Color/R", "255")
        .unwrap();
    assert!(edit.changed);

    ws.grid_mut().expand("SelectedSeries/Series");
    let rows = ws.property_rows().unwrap();
    let color = rows
        .iter()
        .find(|r| r.path == "SelectedSeries/Series/Color")
        .unwrap();
    assert!(color.expandable);
    assert_eq!(color.value, "#FF6699");
}
