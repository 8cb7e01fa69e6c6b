use anyhow::{Context, Result, bail};
use chartgrid::export::ExportFormat;
use chartgrid::grid::GridRow;
use chartgrid::{ExportOptions, PropertyGrid, Series, SeriesKind, Workspace};
use clap::{Args, Parser, Subcommand};
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "chartgrid",
    version,
    about = "Map CSV columns onto chart series and export the chart"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV file, configure series and export the chart.
    Render(RenderArgs),
    /// List the editable properties of a series kind (or of `export` options).
    Properties(PropertiesArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// CSV file; the first line names the columns.
    #[arg(short, long)]
    input: PathBuf,
    /// Series `kind[:Field=Column,...]`, e.g. `line:X=Date,Y=Close`. Repeatable.
    #[arg(short, long = "series", default_value = "line")]
    series: Vec<String>,
    /// Series property `INDEX:Path=Value`, e.g. `0:Series/Title=Close`. Repeatable.
    #[arg(long = "set")]
    set: Vec<String>,
    /// Output chart (.png or .svg).
    #[arg(short, long)]
    out: PathBuf,
    /// Chart title.
    #[arg(long)]
    title: Option<String>,
    /// Width of the chart (default 700).
    #[arg(long)]
    width: Option<u32>,
    /// Height of the chart (default 400).
    #[arg(long)]
    height: Option<u32>,
    /// Background color (#RRGGBB, r,g,b or a name).
    #[arg(long)]
    background: Option<String>,
}

#[derive(Args, Debug)]
struct PropertiesArgs {
    /// Series kind (line, area, scatter, "stair step", bar, "high low") or `export`.
    target: String,
    /// Print the rows as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

struct SeriesArg {
    kind: SeriesKind,
    columns: Vec<(String, String)>,
}

fn parse_series_arg(s: &str) -> Result<SeriesArg> {
    let (kind, rest) = s.split_once(':').unwrap_or((s, ""));
    let kind = kind
        .parse::<SeriesKind>()
        .with_context(|| format!("invalid --series `{s}`"))?;
    let mut columns = Vec::new();
    for pair in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((field, column)) = pair.split_once('=') else {
            bail!("invalid --series `{s}`, expected Field=Column pairs");
        };
        columns.push((field.trim().to_string(), column.trim().to_string()));
    }
    Ok(SeriesArg { kind, columns })
}

fn parse_setting(s: &str) -> Result<(usize, String, String)> {
    let parsed = s.split_once(':').and_then(|(index, rest)| {
        let index = index.trim().parse::<usize>().ok()?;
        let (path, value) = rest.split_once('=')?;
        Some((index, path.trim().to_string(), value.to_string()))
    });
    parsed.ok_or_else(|| anyhow::anyhow!("invalid --set `{s}`, expected INDEX:Path=Value"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Properties(args) => cmd_properties(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let series_args = args
        .series
        .iter()
        .map(|s| parse_series_arg(s))
        .collect::<Result<Vec<_>>>()?;
    let settings = args
        .set
        .iter()
        .map(|s| parse_setting(s))
        .collect::<Result<Vec<_>>>()?;
    // Fail on the output format before doing any work.
    let mut options = ExportOptions::for_path(&args.out)?;

    let mut ws = Workspace::new();
    ws.load_csv(&args.input)?;
    if let Some(title) = &args.title {
        ws.set_title(title);
    }

    ws.edit_property("Count", &series_args.len().to_string())?;
    for (i, arg) in series_args.iter().enumerate() {
        select(&mut ws, i)?;
        ws.edit_property("SelectedSeries/Series", &arg.kind.display_name())?;
        for (field, column) in &arg.columns {
            let path = format!("SelectedSeries/Columns/{field}");
            ws.try_edit_property(&path, column)
                .with_context(|| format!("series {i}: mapping {field} to `{column}`"))?;
        }
    }
    for (i, path, value) in &settings {
        select(&mut ws, *i)?;
        ws.try_edit_property(&format!("SelectedSeries/{path}"), value)
            .with_context(|| format!("series {i}: setting {path}"))?;
    }

    let grid = PropertyGrid::new(Arc::clone(ws.registry()));
    if let Some(width) = args.width {
        grid.try_set_text(&mut options, "Width", &width.to_string())?;
    }
    if let Some(height) = args.height {
        grid.try_set_text(&mut options, "Height", &height.to_string())?;
    }
    if let Some(background) = &args.background {
        grid.try_set_text(&mut options, "Background", background)
            .context("invalid --background")?;
    }

    ws.export(&args.out, &options)?;
    let chart = ws.chart();
    eprintln!(
        "Wrote {} series ({} items) to {}",
        chart.series.len(),
        chart.item_count(),
        args.out.display()
    );
    Ok(())
}

fn select(ws: &mut Workspace, index: usize) -> Result<()> {
    ws.edit_property("SelectedSeries", &index.to_string())?;
    if ws.series().selected() != Some(index) {
        bail!("no series at index {index}");
    }
    Ok(())
}

fn cmd_properties(args: PropertiesArgs) -> Result<()> {
    let ws = Workspace::new();
    let grid = PropertyGrid::new(Arc::clone(ws.registry()));
    let rows = if args.target.eq_ignore_ascii_case("export") {
        let options = ExportOptions::for_format(ExportFormat::Png);
        grid.rows(Some(&options as &dyn Any))?
    } else {
        let series = Series::new(args.target.parse::<SeriesKind>()?);
        grid.rows(Some(series.as_any()))?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_rows(&rows);
    }
    Ok(())
}

fn print_rows(rows: &[GridRow]) {
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for r in rows {
        let choices = r
            .choices
            .as_ref()
            .map(|c| format!("  [{}]", c.join(" | ")))
            .unwrap_or_default();
        println!(
            "{:<12} {:<width$}  {}{}",
            r.category, r.label, r.value, choices
        );
    }
}
