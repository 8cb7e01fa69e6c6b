use chartgrid::series::{BarItem, DataPoint, HighLowItem, ScatterPoint};
use chartgrid::table::parse_csv;
use chartgrid::{Series, Workspace};
use std::io::Write;

const PRICES: &str = "\
Date,Price,Volume
1,10.5,200
2,11.0,180
3,oops,170
,12.0,150
4,12.5,210
";

fn workspace(csv: &str) -> Workspace {
    let mut ws = Workspace::new();
    ws.set_table(parse_csv(csv.as_bytes()).unwrap());
    ws
}

fn first_series(ws: &Workspace) -> &Series {
    ws.series().rows()[0].series().expect("series selected")
}

#[test]
fn line_points_come_from_the_first_two_columns_by_default() {
    let mut ws = workspace(PRICES);
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    let Series::Line(line) = first_series(&ws) else {
        panic!("expected a line series");
    };
    // Unparsable and blank-key rows are skipped.
    assert_eq!(
        line.points,
        [
            DataPoint { x: 1.0, y: 10.5 },
            DataPoint { x: 2.0, y: 11.0 },
            DataPoint { x: 4.0, y: 12.5 },
        ]
    );
}

#[test]
fn mapped_columns_override_positions() {
    let mut ws = workspace(PRICES);
    ws.edit_property("SelectedSeries/Series", "Area").unwrap();
    ws.edit_property("SelectedSeries/Columns/Y", "Volume").unwrap();
    let Series::Area(area) = first_series(&ws) else {
        panic!("expected an area series");
    };
    assert_eq!(area.points.len(), 4);
    assert_eq!(area.points[2], DataPoint { x: 3.0, y: 170.0 });
}

#[test]
fn cell_edits_refresh_the_items() {
    let mut ws = workspace(PRICES);
    ws.edit_property("SelectedSeries/Series", "Stair Step").unwrap();
    assert_eq!(first_series(&ws).item_count(), 3);
    ws.edit_cell(2, 1, "11.5").unwrap();
    assert_eq!(first_series(&ws).item_count(), 4);
    assert!(ws.edit_cell(99, 0, "1").is_err());
}

#[test]
fn bar_items_keep_text_labels() {
    let mut ws = workspace("Region,Sales\nNorth,12\nSouth,n/a\nEast,7.5\n");
    ws.edit_property("SelectedSeries/Series", "Bar").unwrap();
    let Series::Bar(bar) = first_series(&ws) else {
        panic!("expected a bar series");
    };
    assert_eq!(bar.items.len(), 3);
    assert_eq!(
        bar.items[0],
        BarItem {
            label: "North".into(),
            value: 12.0
        }
    );
    // Unparsable values keep the field default.
    assert_eq!(bar.items[1].value, 0.0);
    assert_eq!(bar.items[2].value, 7.5);
}

#[test]
fn high_low_items_use_the_mapping() {
    let csv = "Day,Open,High,Low,Close\n1,10,14,9,12\n2,12,13,11,11.5\n";
    let mut ws = workspace(csv);
    ws.edit_property("SelectedSeries/Series", "High Low").unwrap();
    for field in ["High", "Low", "Open", "Close"] {
        ws.edit_property(&format!("SelectedSeries/Columns/{field}"), field)
            .unwrap();
    }
    let Series::HighLow(series) = first_series(&ws) else {
        panic!("expected a high/low series");
    };
    assert_eq!(
        series.items[0],
        HighLowItem {
            x: 1.0,
            high: 14.0,
            low: 9.0,
            open: 10.0,
            close: 12.0
        }
    );
}

#[test]
fn scatter_points_read_size() {
    let mut ws = workspace("X,Y,Size\n1,2,3\n4,5,-1\n");
    ws.edit_property("SelectedSeries/Series", "Scatter").unwrap();
    let Series::Scatter(scatter) = first_series(&ws) else {
        panic!("expected a scatter series");
    };
    assert_eq!(scatter.points[0], ScatterPoint { x: 1.0, y: 2.0, size: 3.0 });
    assert_eq!(scatter.points[1].size, 0.0);
}

#[test]
fn several_series_share_one_table() {
    let mut ws = workspace(PRICES);
    ws.edit_property("Count", "2").unwrap();
    ws.edit_property("SelectedSeries/Series", "Line").unwrap();
    ws.edit_property("SelectedSeries", "1").unwrap();
    ws.edit_property("SelectedSeries/Series", "Bar").unwrap();
    ws.edit_property("SelectedSeries/Columns/Value", "Volume").unwrap();

    let chart = ws.chart();
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.item_count(), 3 + 4);

    ws.edit_property("SelectedSeries/Series/IsVisible", "false").unwrap();
    assert_eq!(ws.chart().series.len(), 1);
}

#[test]
fn csv_files_load_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(PRICES.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut ws = Workspace::new();
    ws.load_csv(file.path()).unwrap();
    assert_eq!(ws.table().columns(), ["Date", "Price", "Volume"]);
    assert_eq!(ws.table().row_count(), 5);
    assert_eq!(ws.column_names().snapshot(), ["Date", "Price", "Volume"]);
}
