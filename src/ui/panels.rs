use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use ssm_viewer::state::{Session, ViewMode};

use crate::app::AxisInputs;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar: open / plot / rescale / clear and the status line.
pub fn top_bar(ui: &mut Ui, session: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(session);
                ui.close_menu();
            }
        });

        ui.separator();

        let has_data = session.mode() != ViewMode::Empty;
        if ui.add_enabled(has_data, egui::Button::new("Plot")).clicked() {
            // Errors are already reflected in the status line.
            let _ = session.plot();
        }
        if ui
            .add_enabled(has_data, egui::Button::new("Rescale & Plot"))
            .clicked()
        {
            let _ = session.rescale();
        }
        if ui.button("Clear").clicked() {
            session.clear();
        }

        ui.separator();

        let color = if session.failures().is_empty() {
            ui.visuals().text_color()
        } else {
            Color32::RED
        };
        ui.label(RichText::new(session.status()).color(color));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – loaded files and axis ranges
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, session: &mut Session, axis: &mut AxisInputs) {
    ui.heading("Axes ranges");
    ui.separator();

    let mut changed = false;
    egui::Grid::new("axis_ranges")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            for (label, field) in ["X Min", "X Max", "Y Min", "Y Max"]
                .iter()
                .zip(axis.fields.iter_mut())
            {
                ui.label(*label);
                changed |= ui
                    .add(
                        egui::TextEdit::singleline(field)
                            .hint_text(*label)
                            .desired_width(80.0),
                    )
                    .changed();
                ui.end_row();
            }
        });
    if changed {
        axis.apply(session);
    }
    if let Some(err) = &axis.error {
        ui.label(RichText::new(err).color(Color32::RED));
    }

    ui.add_space(8.0);
    ui.heading("Files");
    ui.separator();

    if session.spectra().is_empty() && session.failures().is_empty() {
        ui.label("No file loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for entry in session.spectra() {
                ui.strong(entry.label.as_str());
                let time = entry
                    .spectrum
                    .integration_time_ms
                    .map(|t| format!("{t} ms"))
                    .unwrap_or_else(|| "n/a".to_string());
                ui.label(format!(
                    "{} samples, integration time {time}",
                    entry.spectrum.len()
                ));
            }

            if !session.failures().is_empty() {
                ui.separator();
                for failure in session.failures() {
                    ui.label(RichText::new(failure.to_string()).color(Color32::RED));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut Session) {
    let files = rfd::FileDialog::new()
        .set_title("Open spectrum files")
        .add_filter("Spectra", &["ssm", "SSM", "csv"])
        .add_filter("SSM", &["ssm", "SSM"])
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_files();

    if let Some(paths) = files {
        if let Err(e) = session.load(&paths) {
            log::error!("{e}");
        }
    }
}
