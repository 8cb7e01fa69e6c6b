/*!
 * Desktop front-end for chartgrid
 *
 * - Load a CSV file and edit its cells
 * - Configure chart series and their column mapping in a property grid
 * - Live chart preview and export to PNG/SVG
 *
 * Platform support: Windows, macOS, Linux
 */

use chartgrid::grid::GridRow;
use chartgrid::viz::{self, RenderSize};
use chartgrid::{ExportOptions, Notice, PropertyGrid, Workspace, checked};
use eframe::egui;
use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([700.0, 450.0])
            .with_title("chartgrid"),
        ..Default::default()
    };

    eframe::run_native(
        "chartgrid",
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new()))),
    )
}

/// A user interaction with a property grid, applied after the frame is laid out.
enum GridAction {
    Edit(String, String),
    Toggle(String),
    Reset(String),
}

struct ExportDialog {
    path: PathBuf,
    options: ExportOptions,
    grid: PropertyGrid,
    drafts: HashMap<String, String>,
}

struct ChartApp {
    ws: Workspace,
    home_dir: PathBuf,
    drafts: HashMap<String, String>,
    cell_drafts: HashMap<(usize, usize), String>,
    new_column: String,
    export: Option<ExportDialog>,
    preview: Option<egui::TextureHandle>,
    preview_size: [usize; 2],
    dirty: bool,
    status_message: String,
    notice: Option<Notice>,
}

impl ChartApp {
    fn new() -> Self {
        Self {
            ws: Workspace::new(),
            home_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            drafts: HashMap::new(),
            cell_drafts: HashMap::new(),
            new_column: String::new(),
            export: None,
            preview: None,
            preview_size: [0, 0],
            dirty: true,
            status_message: String::new(),
            notice: None,
        }
    }

    fn report<T>(&mut self, result: Result<T, Notice>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(notice) => {
                self.status_message.clear();
                self.notice = Some(notice);
                None
            }
        }
    }

    fn load_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv", "txt"])
            .set_directory(&self.home_dir)
            .pick_file()
        else {
            return;
        };
        let loaded = checked(|| self.ws.load_csv(&path));
        if self.report(loaded).is_some() {
            self.cell_drafts.clear();
            self.dirty = true;
            self.status_message = format!(
                "Loaded {} rows from {}",
                self.ws.table().row_count(),
                path.display()
            );
        }
    }

    fn open_export_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .set_directory(&self.home_dir)
            .set_file_name("chart.png")
            .save_file()
        else {
            return;
        };
        let options = checked(|| self.ws.export_options(&path));
        if let Some(options) = self.report(options) {
            self.export = Some(ExportDialog {
                path,
                options,
                grid: PropertyGrid::new(Arc::clone(self.ws.registry())),
                drafts: HashMap::new(),
            });
        }
    }

    fn apply_series_actions(&mut self, actions: Vec<GridAction>) {
        for action in actions {
            let result = match action {
                GridAction::Toggle(path) => {
                    self.ws.grid_mut().toggle(&path);
                    continue;
                }
                GridAction::Edit(path, text) => checked(|| Ok(self.ws.edit_property(&path, &text)?)),
                GridAction::Reset(path) => checked(|| Ok(self.ws.reset_property(&path)?)),
            };
            if let Some(edit) = self.report(result) {
                self.dirty |= edit.changed;
            }
        }
    }

    fn refresh_preview(&mut self, ctx: &egui::Context, size: egui::Vec2) {
        let w = size.x.max(240.0) as usize;
        let h = size.y.max(160.0) as usize;
        if !self.dirty && self.preview.is_some() && self.preview_size == [w, h] {
            return;
        }
        self.dirty = false;
        self.preview_size = [w, h];
        let chart = self.ws.chart();
        let rendered = checked(|| viz::render_rgb(&chart, RenderSize::new(w as u32, h as u32)));
        if let Some(buf) = self.report(rendered) {
            let image = egui::ColorImage::from_rgb([w, h], &buf);
            match &mut self.preview {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.preview =
                        Some(ctx.load_texture("chart-preview", image, egui::TextureOptions::LINEAR))
                }
            }
        }
    }

    fn data_table_ui(&mut self, ui: &mut egui::Ui) {
        let mut commit: Option<(usize, usize, String)> = None;
        let table = self.ws.table();
        egui::ScrollArea::both()
            .id_salt("data-table")
            .max_height(220.0)
            .show(ui, |ui| {
                egui::Grid::new("cells").striped(true).show(ui, |ui| {
                    for name in table.columns() {
                        ui.strong(name);
                    }
                    ui.end_row();
                    for (r, row) in table.rows().iter().enumerate() {
                        for (c, cell) in row.iter().enumerate() {
                            let key = (r, c);
                            let mut buf = self
                                .cell_drafts
                                .get(&key)
                                .cloned()
                                .unwrap_or_else(|| cell.clone());
                            let resp = ui.add(egui::TextEdit::singleline(&mut buf).desired_width(80.0));
                            if resp.changed() {
                                self.cell_drafts.insert(key, buf.clone());
                            }
                            if resp.lost_focus()
                                && let Some(text) = self.cell_drafts.remove(&key)
                            {
                                commit = Some((r, c, text));
                            }
                        }
                        ui.end_row();
                    }
                });
            });
        ui.horizontal(|ui| {
            if ui.button("Add row").clicked() {
                self.ws.add_row();
            }
            ui.text_edit_singleline(&mut self.new_column)
                .on_hover_text("Name of the new column");
            if ui.button("Add column").clicked() {
                self.ws.add_column(&self.new_column);
                self.new_column.clear();
            }
        });
        if let Some((r, c, text)) = commit {
            let edited = checked(|| self.ws.edit_cell(r, c, &text));
            if self.report(edited).is_some() {
                self.dirty = true;
            }
        }
    }

    fn export_dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.export.as_mut() else {
            return;
        };
        let mut open = true;
        let mut confirmed = false;
        let mut actions = Vec::new();
        egui::Window::new("Export options")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(dialog.path.display().to_string());
                ui.add_space(5.0);
                match dialog.grid.rows(Some(&dialog.options as &dyn Any)) {
                    Ok(rows) => actions = property_grid_ui(ui, "export-grid", &rows, &mut dialog.drafts),
                    Err(err) => {
                        ui.colored_label(egui::Color32::RED, err.to_string());
                    }
                }
                ui.add_space(10.0);
                if ui.button("Export").clicked() {
                    confirmed = true;
                }
            });
        let mut failure = None;
        for action in actions {
            let result = match action {
                GridAction::Toggle(path) => {
                    dialog.grid.toggle(&path);
                    continue;
                }
                GridAction::Edit(path, text) => dialog.grid.set_text(&mut dialog.options, &path, &text),
                GridAction::Reset(path) => dialog.grid.reset(&mut dialog.options, &path),
            };
            if let Err(err) = result {
                failure = Some(Notice::from_error(&err.into()));
            }
        }
        if let Some(notice) = failure {
            self.notice = Some(notice);
        }
        if confirmed {
            if let Some(dialog) = self.export.take() {
                let exported = checked(|| self.ws.export(&dialog.path, &dialog.options));
                if self.report(exported).is_some() {
                    self.status_message = format!("Chart exported to {}", dialog.path.display());
                }
            }
        } else if !open {
            self.export = None;
        }
    }
}

/// Draw rows as a three-column grid (name, value, reset) and collect interactions.
fn property_grid_ui(
    ui: &mut egui::Ui,
    id: &str,
    rows: &[GridRow],
    drafts: &mut HashMap<String, String>,
) -> Vec<GridAction> {
    let mut actions = Vec::new();
    egui::Grid::new(id)
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for row in rows {
                ui.horizontal(|ui| {
                    ui.add_space(row.depth as f32 * 14.0);
                    if row.expandable {
                        let arrow = if row.expanded { "⏷" } else { "⏵" };
                        if ui.small_button(arrow).clicked() {
                            actions.push(GridAction::Toggle(row.path.clone()));
                        }
                    }
                    let hover = if row.description.is_empty() {
                        row.category.clone()
                    } else {
                        format!("{} ({})", row.description, row.category)
                    };
                    ui.label(&row.label).on_hover_text(hover);
                });

                if row.read_only {
                    ui.label(&row.value);
                } else if let Some(choices) = &row.choices {
                    let shown = |s: &str| if s.is_empty() { "(none)".to_string() } else { s.to_string() };
                    egui::ComboBox::from_id_salt((id, &row.path))
                        .selected_text(shown(&row.value))
                        .show_ui(ui, |ui| {
                            for choice in choices {
                                if ui
                                    .selectable_label(*choice == row.value, shown(choice))
                                    .clicked()
                                {
                                    actions.push(GridAction::Edit(row.path.clone(), choice.clone()));
                                }
                            }
                        });
                } else {
                    let mut buf = drafts
                        .get(&row.path)
                        .cloned()
                        .unwrap_or_else(|| row.value.clone());
                    let resp = ui.text_edit_singleline(&mut buf);
                    if resp.changed() {
                        drafts.insert(row.path.clone(), buf);
                    }
                    if resp.lost_focus()
                        && let Some(text) = drafts.remove(&row.path)
                    {
                        actions.push(GridAction::Edit(row.path.clone(), text));
                    }
                }

                if row.can_reset && !row.read_only {
                    if ui.small_button("↺").on_hover_text("Reset").clicked() {
                        actions.push(GridAction::Reset(row.path.clone()));
                    }
                } else {
                    ui.label("");
                }
                ui.end_row();
            }
        });
    actions
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load CSV…").clicked() {
                        ui.close_menu();
                        self.load_csv();
                    }
                    if ui.button("Export chart…").clicked() {
                        ui.close_menu();
                        self.open_export_dialog();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(notice) = &self.notice {
                let mut dismiss = false;
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, format!("{}: {}", notice.category, notice.message));
                    dismiss = ui.button("Dismiss").clicked();
                });
                if dismiss {
                    self.notice = None;
                }
            } else if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            } else {
                ui.label("Ready");
            }
        });

        let mut actions = Vec::new();
        egui::SidePanel::right("properties")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Series");
                ui.add_space(5.0);
                egui::ScrollArea::vertical().show(ui, |ui| match self.ws.property_rows() {
                    Ok(rows) => actions = property_grid_ui(ui, "series-grid", &rows, &mut self.drafts),
                    Err(err) => {
                        ui.colored_label(egui::Color32::RED, err.to_string());
                    }
                });
            });
        self.apply_series_actions(actions);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.group(|ui| {
                ui.label("Data");
                self.data_table_ui(ui);
            });
            ui.add_space(10.0);
            let size = ui.available_size();
            self.refresh_preview(ctx, size);
            if let Some(texture) = &self.preview {
                ui.image((texture.id(), texture.size_vec2()));
            }
        });

        self.export_dialog_ui(ctx);
    }
}
