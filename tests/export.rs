use chartgrid::export::{ExportFormat, ExportOptions, export_chart};
use chartgrid::table::parse_csv;
use chartgrid::viz::{self, Chart, RenderSize};
use chartgrid::{Color, Workspace, checked};
use std::fs;

fn sample_workspace() -> Workspace {
    let mut ws = Workspace::new();
    ws.set_table(parse_csv("X,Y\n1,3\n2,5\n3,4\n".as_bytes()).unwrap());
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    ws.edit_property("SelectedSeries/Series/Title", "Demand").unwrap();
    ws.set_title("Weekly demand");
    ws
}

#[test]
fn svg_export_writes_a_document_with_the_legend() {
    let ws = sample_workspace();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    let options = ws.export_options(&path).unwrap();
    assert_eq!(options.format, ExportFormat::Svg);
    ws.export(&path, &options).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Demand"));
    assert!(svg.contains("Weekly demand"));
}

#[test]
fn png_export_honours_the_size() {
    let ws = sample_workspace();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    let mut options = ws.export_options(&path).unwrap();
    options.width = 320;
    options.height = 200;
    ws.export(&path, &options).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR width and height, big endian.
    assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 320);
    assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 200);
}

#[test]
fn pdf_is_reported_as_an_export_error() {
    let ws = sample_workspace();
    let notice = checked(|| ws.export_options("chart.pdf")).unwrap_err();
    assert_eq!(notice.category, "Export error");
    assert!(notice.message.contains(".pdf"));
}

#[test]
fn options_must_match_the_target_extension() {
    let ws = sample_workspace();
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions::for_format(ExportFormat::Png);
    let err = export_chart(&ws.chart(), &dir.path().join("chart.svg"), &options).unwrap_err();
    assert!(err.to_string().contains("PNG"));
}

#[test]
fn dimensions_are_clamped() {
    let ws = sample_workspace();
    let grid = chartgrid::PropertyGrid::new(std::sync::Arc::clone(ws.registry()));
    let mut options = ExportOptions::for_format(ExportFormat::Png);
    grid.set_text(&mut options, "Width", "5").unwrap();
    grid.set_text(&mut options, "Height", "99999").unwrap();
    assert_eq!((options.width, options.height), (16, 10_000));
}

#[test]
fn bitmap_render_fills_the_background() {
    let chart = Chart::default();
    let mut size = RenderSize::new(200, 150);
    size.background = Color::rgb(10, 20, 30);
    let buf = viz::render_rgb(&chart, size).unwrap();
    assert_eq!(buf.len(), 200 * 150 * 3);
    assert_eq!(&buf[..3], &[10, 20, 30]);
}
