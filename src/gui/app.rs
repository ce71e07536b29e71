//! TableSweep Main Application
//! Left panel for uploads and batch status, central panel with one card
//! per uploaded file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use egui::{Color32, RichText, ScrollArea, SidePanel};

use crate::data::{DataCleaner, FileLoader, ImputeOutcome};
use crate::export::{ExportArtifact, Exporter};
use crate::gui::{FileCard, FileCardAction, FileSession, Notice};

/// Main application window.
pub struct SweepApp {
    /// One session per successfully loaded file, in upload order.
    sessions: Vec<FileSession>,
    /// Files that failed to load, with the surfaced reason. A failed file
    /// never aborts the rest of its batch.
    skipped: Vec<String>,
}

impl SweepApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            sessions: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Pick files and run each through the loader synchronously. Every
    /// interaction completes within the current update pass.
    fn handle_upload(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Tabular Files", &["csv", "xlsx"])
            .pick_files()
        else {
            return;
        };

        for path in paths {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match Self::load_file(&path, &file_name) {
                Ok(session) => self.sessions.push(session),
                Err(e) => self.skipped.push(format!("{}: {:#}", file_name, e)),
            }
        }
    }

    fn load_file(path: &Path, file_name: &str) -> Result<FileSession> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let df = FileLoader::load(bytes, file_name)?;
        Ok(FileSession::new(file_name.to_string(), df))
    }

    /// Apply a card action to its own session. Cleaning acts on the current
    /// in-memory frame, so repeated clicks compose with prior edits.
    fn handle_card_action(session: &mut FileSession, action: FileCardAction) {
        match action {
            FileCardAction::RemoveDuplicates => {
                match DataCleaner::remove_duplicates(&session.df) {
                    Ok(df) => {
                        let removed = session.df.height() - df.height();
                        session.set_frame(df);
                        session.notice = Some(Notice::Success(format!(
                            "Duplicates removed ({} rows dropped).",
                            removed
                        )));
                    }
                    Err(e) => session.notice = Some(Notice::Error(e.to_string())),
                }
            }
            FileCardAction::FillMissing => match DataCleaner::fill_missing(&session.df) {
                Ok((df, ImputeOutcome::Filled)) => {
                    session.set_frame(df);
                    session.notice =
                        Some(Notice::Success("Missing values have been filled.".to_string()));
                }
                Ok((_, ImputeOutcome::NoNumericColumns)) => {
                    session.notice = Some(Notice::Warning(
                        "No numeric columns found to fill missing values.".to_string(),
                    ));
                }
                Err(e) => session.notice = Some(Notice::Error(e.to_string())),
            },
            FileCardAction::Convert => Self::handle_convert(session),
            FileCardAction::None => {}
        }
    }

    /// Project, serialize and hand the artifact to a save dialog. A failed
    /// serialization surfaces on the card; no partial file is offered.
    fn handle_convert(session: &mut FileSession) {
        let projected = match session.projected() {
            Ok(df) => df,
            Err(e) => {
                session.notice = Some(Notice::Error(e.to_string()));
                return;
            }
        };

        let artifact = match Exporter::export(&projected, session.export_format, &session.file_name)
        {
            Ok(artifact) => artifact,
            Err(e) => {
                session.notice = Some(Notice::Error(e.to_string()));
                return;
            }
        };

        match Self::save_artifact(&artifact) {
            Ok(true) => {
                session.notice = Some(Notice::Success(format!(
                    "Saved {} ({})",
                    artifact.file_name, artifact.mime
                )));
            }
            Ok(false) => {} // user cancelled the save dialog
            Err(e) => session.notice = Some(Notice::Error(format!("{:#}", e))),
        }
    }

    /// Returns Ok(false) when the user cancels the dialog.
    fn save_artifact(artifact: &ExportArtifact) -> Result<bool> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&artifact.file_name)
            .save_file()
        else {
            return Ok(false);
        };

        fs::write(&path, &artifact.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }
}

impl eframe::App for SweepApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - uploads and batch status
        SidePanel::left("batch_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("🧹 TableSweep")
                            .size(22.0)
                            .color(Color32::from_rgb(100, 149, 237)),
                    );
                    ui.label(
                        RichText::new("CSV & Excel cleanup")
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                });
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(5.0);

                ui.label(RichText::new("📁 Upload").size(14.0).strong());
                ui.add_space(5.0);
                if ui.button("📂 Upload files (.csv / .xlsx)").clicked() {
                    self.handle_upload();
                }

                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("{} file(s) loaded", self.sessions.len()))
                        .size(11.0)
                        .color(Color32::GRAY),
                );

                if !self.skipped.is_empty() {
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(5.0);
                    ui.label(RichText::new("⚠ Skipped files").size(14.0).strong());
                    for reason in &self.skipped {
                        ui.label(
                            RichText::new(reason)
                                .size(11.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    }
                }
            });

        // Central panel - file cards
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.sessions.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No files uploaded").size(20.0));
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for session in &mut self.sessions {
                        let action = FileCard::show(ui, session);
                        Self::handle_card_action(session, action);
                        ui.add_space(15.0);
                    }
                });
        });
    }
}
