//! TableSweep - CSV & Excel Data Cleaning, Preview and Conversion Tool
//!
//! A Rust application for uploading tabular files, cleaning them and
//! converting between CSV and Excel.

mod charts;
mod data;
mod export;
mod gui;

use eframe::egui;
use gui::SweepApp;

fn main() -> eframe::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("TableSweep"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "TableSweep",
        options,
        Box::new(|cc| Ok(Box::new(SweepApp::new(cc)))),
    )
}
