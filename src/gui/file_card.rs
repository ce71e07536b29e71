//! File Card Widget
//! Per-file card with preview, cleaning controls, column selection,
//! visualization and conversion controls.

use egui::{Color32, Grid, RichText, ScrollArea};
use polars::prelude::*;

use crate::charts::ChartPlotter;
use crate::data::{numeric_columns, Projector};
use crate::export::ExportFormat;

/// How many rows the preview grid shows.
const PREVIEW_ROWS: usize = 5;

/// Notice surfaced on a card after an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

/// Actions triggered by a file card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCardAction {
    None,
    RemoveDuplicates,
    FillMissing,
    Convert,
}

/// Per-file session state. One session per uploaded file; widget values
/// live here rather than in ambient GUI state.
pub struct FileSession {
    pub file_name: String,
    pub df: DataFrame,
    /// Column-selection mask, aligned with `df`'s column order.
    pub selected_columns: Vec<bool>,
    pub clean_open: bool,
    pub show_chart: bool,
    pub export_format: ExportFormat,
    pub notice: Option<Notice>,
}

impl FileSession {
    pub fn new(file_name: String, df: DataFrame) -> Self {
        let width = df.width();
        Self {
            file_name,
            df,
            selected_columns: vec![true; width],
            clean_open: false,
            show_chart: false,
            export_format: ExportFormat::Csv,
            notice: None,
        }
    }

    /// Column names currently ticked, in table order.
    pub fn selected_column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .zip(self.selected_columns.iter())
            .filter(|(_, &keep)| keep)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Replace the frame after a cleaning op. Cleaning only edits rows, so
    /// the column mask survives; a changed width resets it.
    pub fn set_frame(&mut self, df: DataFrame) {
        if df.width() != self.selected_columns.len() {
            self.selected_columns = vec![true; df.width()];
        }
        self.df = df;
    }

    /// Current frame restricted to the ticked columns.
    pub fn projected(&self) -> PolarsResult<DataFrame> {
        Projector::select(&self.df, &self.selected_column_names())
    }
}

/// Renders one file session as a card and reports the pressed action.
pub struct FileCard;

impl FileCard {
    pub fn show(ui: &mut egui::Ui, session: &mut FileSession) -> FileCardAction {
        let mut action = FileCardAction::None;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(96, 125, 139)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("📄 {}", session.file_name))
                        .size(16.0)
                        .strong(),
                );
                ui.label(
                    RichText::new(format!(
                        "{} rows × {} columns",
                        session.df.height(),
                        session.df.width()
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );

                ui.add_space(8.0);
                Self::preview_grid(ui, session);

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                // ===== Cleaning Section =====
                ui.checkbox(&mut session.clean_open, "Clean data");
                if session.clean_open {
                    ui.horizontal(|ui| {
                        if ui.button("Remove duplicates").clicked() {
                            action = FileCardAction::RemoveDuplicates;
                        }
                        if ui.button("Fill missing values").clicked() {
                            action = FileCardAction::FillMissing;
                        }
                    });
                }

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                // ===== Column Selection Section =====
                ui.label(RichText::new("Columns to keep").size(13.0).strong());
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ScrollArea::vertical()
                            .id_salt(format!("columns_{}", session.file_name))
                            .max_height(120.0)
                            .show(ui, |ui| {
                                let names: Vec<String> = session
                                    .df
                                    .get_column_names()
                                    .iter()
                                    .map(|n| n.to_string())
                                    .collect();
                                for (i, name) in names.iter().enumerate() {
                                    if i < session.selected_columns.len() {
                                        ui.checkbox(&mut session.selected_columns[i], name);
                                    }
                                }
                            });
                    });
                ui.horizontal(|ui| {
                    if ui.small_button("Select All").clicked() {
                        session.selected_columns.iter_mut().for_each(|v| *v = true);
                    }
                    if ui.small_button("Clear All").clicked() {
                        session.selected_columns.iter_mut().for_each(|v| *v = false);
                    }
                });

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                // ===== Visualization Section =====
                ui.checkbox(&mut session.show_chart, "Show visualization");
                if session.show_chart {
                    Self::chart_section(ui, session);
                }

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                // ===== Conversion Section =====
                ui.label(RichText::new("Convert to").size(13.0).strong());
                ui.horizontal(|ui| {
                    ui.radio_value(&mut session.export_format, ExportFormat::Csv, "CSV");
                    ui.radio_value(&mut session.export_format, ExportFormat::Excel, "Excel");
                    if ui.button("⬇ Convert").clicked() {
                        action = FileCardAction::Convert;
                    }
                });

                if let Some(notice) = &session.notice {
                    ui.add_space(6.0);
                    let (text, color) = match notice {
                        Notice::Success(msg) => (msg, Color32::from_rgb(40, 167, 69)),
                        Notice::Warning(msg) => (msg, Color32::from_rgb(243, 156, 18)),
                        Notice::Error(msg) => (msg, Color32::from_rgb(220, 53, 69)),
                    };
                    ui.label(RichText::new(text).size(11.0).color(color));
                }
            });

        action
    }

    /// Head of the current frame, one grid row per table row.
    fn preview_grid(ui: &mut egui::Ui, session: &FileSession) {
        let df = &session.df;
        if df.width() == 0 {
            ui.label(RichText::new("No columns").size(11.0).color(Color32::GRAY));
            return;
        }

        ScrollArea::horizontal()
            .id_salt(format!("preview_{}", session.file_name))
            .show(ui, |ui| {
                Grid::new(format!("preview_grid_{}", session.file_name))
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        for name in df.get_column_names() {
                            ui.label(RichText::new(name.as_str()).size(12.0).strong());
                        }
                        ui.end_row();

                        for row in 0..df.height().min(PREVIEW_ROWS) {
                            for column in df.get_columns() {
                                let text = cell_text(column.as_materialized_series(), row);
                                ui.label(RichText::new(text).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn chart_section(ui: &mut egui::Ui, session: &FileSession) {
        let projected = match session.projected() {
            Ok(df) => df,
            Err(e) => {
                ui.label(
                    RichText::new(e.to_string())
                        .size(11.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                return;
            }
        };

        let numeric = numeric_columns(&projected);
        if numeric.len() < 2 {
            ui.label(
                RichText::new("Not enough numeric columns to visualize.")
                    .size(11.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
            return;
        }

        ChartPlotter::draw_row_bars(ui, &projected, &numeric[0], &numeric[1], &session.file_name);
    }
}

fn cell_text(series: &Series, row: usize) -> String {
    match series.get(row) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(value) => value.to_string().trim_matches('"').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FileSession {
        let df = df!(
            "a" => [1i64, 2],
            "b" => ["x", "y"],
            "c" => [0.5f64, 1.5],
        )
        .unwrap();
        FileSession::new("data.csv".to_string(), df)
    }

    #[test]
    fn all_columns_selected_by_default_in_original_order() {
        let session = session();
        assert_eq!(session.selected_column_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn projection_follows_the_mask() {
        let mut session = session();
        session.selected_columns[1] = false;
        let projected = session.projected().unwrap();

        assert_eq!(
            projected
                .get_column_names()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(projected.height(), 2);
    }

    #[test]
    fn empty_mask_projects_to_empty_frame() {
        let mut session = session();
        session.selected_columns.iter_mut().for_each(|v| *v = false);
        assert_eq!(session.projected().unwrap().width(), 0);
    }

    #[test]
    fn set_frame_keeps_mask_for_row_only_edits() {
        let mut session = session();
        session.selected_columns[2] = false;

        let fewer_rows = df!(
            "a" => [1i64],
            "b" => ["x"],
            "c" => [0.5f64],
        )
        .unwrap();
        session.set_frame(fewer_rows);

        assert_eq!(session.selected_columns, vec![true, true, false]);
    }
}
