//! Chart Plotter Module
//! Renders two numeric columns as row-indexed bars using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot};
use polars::prelude::*;

/// Series colors for the two plotted columns
pub const SERIES_COLORS: [Color32; 2] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
];

const BAR_WIDTH: f64 = 0.35;
const BAR_OFFSET: f64 = 0.2;

/// Creates the read-only bar visualization using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw grouped bars for two numeric columns, one group per row index.
    /// The table is not mutated; `id_salt` keeps plot ids unique per file.
    pub fn draw_row_bars(
        ui: &mut egui::Ui,
        df: &DataFrame,
        col_a: &str,
        col_b: &str,
        id_salt: &str,
    ) {
        let bars_a = Self::column_bars(df, col_a, -BAR_OFFSET);
        let bars_b = Self::column_bars(df, col_b, BAR_OFFSET);

        Plot::new(format!("row_bars_{}", id_salt))
            .height(260.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Row")
            .y_axis_label("Value")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars_a)
                        .name(col_a)
                        .color(SERIES_COLORS[0]),
                );
                plot_ui.bar_chart(
                    BarChart::new(bars_b)
                        .name(col_b)
                        .color(SERIES_COLORS[1]),
                );
            });
    }

    /// One bar per non-null cell, aligned by row index and shifted by
    /// `offset` so the two series sit side by side.
    fn column_bars(df: &DataFrame, name: &str, offset: f64) -> Vec<Bar> {
        let values = Self::column_values(df, name);
        values
            .iter()
            .enumerate()
            .filter_map(|(row, value)| {
                value.map(|v| Bar::new(row as f64 + offset, v).width(BAR_WIDTH))
            })
            .collect()
    }

    fn column_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        let Ok(column) = df.column(name) else {
            return Vec::new();
        };
        let Ok(casted) = column.cast(&DataType::Float64) else {
            return Vec::new();
        };
        let Ok(ca) = casted.f64() else {
            return Vec::new();
        };
        (0..ca.len()).map(|i| ca.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_bars_skip_nulls_and_keep_row_alignment() {
        let df = df!("x" => [Some(1.0f64), None, Some(3.0)]).unwrap();
        let bars = ChartPlotter::column_bars(&df, "x", 0.0);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].argument, 0.0);
        assert_eq!(bars[0].value, 1.0);
        assert_eq!(bars[1].argument, 2.0);
        assert_eq!(bars[1].value, 3.0);
    }

    #[test]
    fn missing_column_yields_no_bars() {
        let df = df!("x" => [1.0f64]).unwrap();
        assert!(ChartPlotter::column_bars(&df, "y", 0.0).is_empty());
    }
}
