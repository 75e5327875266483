use std::path::PathBuf;

use eframe::egui;
use ssm_viewer::data::model::AxisRanges;
use ssm_viewer::state::Session;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Axis range text fields
// ---------------------------------------------------------------------------

/// Raw text of the four axis-range fields, `[x_min, x_max, y_min, y_max]`.
#[derive(Debug, Default)]
pub struct AxisInputs {
    pub fields: [String; 4],
    pub error: Option<String>,
}

impl AxisInputs {
    /// Push the parsed fields into the session.  Invalid input clears all
    /// ranges so the plot falls back to auto bounds.
    pub fn apply(&mut self, session: &mut Session) {
        let fields = [
            self.fields[0].as_str(),
            self.fields[1].as_str(),
            self.fields[2].as_str(),
            self.fields[3].as_str(),
        ];
        match AxisRanges::from_fields(fields) {
            Ok(ranges) => {
                session.axis_ranges = ranges;
                self.error = None;
            }
            Err(e) => {
                session.axis_ranges = AxisRanges::default();
                self.error = Some(e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SsmViewerApp {
    pub session: Session,
    pub axis: AxisInputs,
    plot_bounds: Option<plot::Bounds>,
}

impl SsmViewerApp {
    /// Start with `paths` already loaded (and plotted) when any are given.
    pub fn with_files(paths: &[PathBuf]) -> Self {
        let mut app = Self::default();
        if !paths.is_empty() && app.session.load(paths).is_ok() {
            let _ = app.session.plot();
        }
        app
    }
}

impl eframe::App for SsmViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Left side panel: files and axis ranges ----
        egui::SidePanel::left("file_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session, &mut self.axis);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::overlay_plot(ui, &self.session, &mut self.plot_bounds);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_axis_input_clears_ranges() {
        let mut session = Session::default();
        let mut axis = AxisInputs::default();

        axis.fields = ["0".into(), "1130".into(), String::new(), String::new()];
        axis.apply(&mut session);
        assert_eq!(session.axis_ranges.x_bounds(), Some((0.0, 1130.0)));
        assert!(axis.error.is_none());

        axis.fields[2] = "low".into();
        axis.apply(&mut session);
        assert_eq!(session.axis_ranges, AxisRanges::default());
        assert_eq!(axis.error.as_deref(), Some("Invalid axis range input: 'low'"));
    }
}
