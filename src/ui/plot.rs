use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};
use ssm_viewer::data::model::AxisRanges;
use ssm_viewer::data::overlay::Curve;
use ssm_viewer::state::{Session, ViewMode};

use crate::color::curve_palette;

// ---------------------------------------------------------------------------
// Overlay plot (central panel)
// ---------------------------------------------------------------------------

/// Plot rectangle as `(min, max)` corners.
pub type Bounds = ([f64; 2], [f64; 2]);

/// Render the overlay of every curve the session currently shows.
///
/// `applied` remembers the bounds last pushed to the plot, so the user can
/// still pan and zoom until the ranges or the data change.
pub fn overlay_plot(ui: &mut Ui, session: &Session, applied: &mut Option<Bounds>) {
    let curves = session.curves();
    if curves.is_empty() {
        *applied = None;
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = match session.mode() {
                ViewMode::Empty => "Open spectrum files  (File → Open…)",
                _ => "Press Plot or Rescale & Plot",
            };
            ui.heading(hint);
        });
        return;
    }

    let y_label = match session.mode() {
        ViewMode::Rescaled => "Intensity (arb)",
        _ => "Counts",
    };
    let change = bounds_change(display_bounds(&curves, &session.axis_ranges), applied);
    let colors = curve_palette(curves.len());

    Plot::new("overlay_plot")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("λ (nm)")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (curve, color) in curves.iter().zip(colors) {
                let points: PlotPoints = curve
                    .samples
                    .iter()
                    .map(|s| [s.wavelength, s.intensity])
                    .collect();
                plot_ui.line(Line::new(points).name(&curve.label).color(color).width(1.5));
            }
            match change {
                Some(Some((min, max))) => {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                }
                Some(None) => plot_ui.set_auto_bounds(true),
                None => {}
            }
        });
}

/// `Some(next)` when `next` differs from what was last applied, recording it.
fn bounds_change(next: Option<Bounds>, applied: &mut Option<Bounds>) -> Option<Option<Bounds>> {
    if next == *applied {
        return None;
    }
    *applied = next;
    Some(next)
}

/// Plot bounds from the user's axis ranges.  An axis without both ends set
/// falls back to the data extent; `None` when neither axis is constrained.
fn display_bounds(curves: &[Curve], ranges: &AxisRanges) -> Option<Bounds> {
    let x = ranges.x_bounds();
    let y = ranges.y_bounds();
    if x.is_none() && y.is_none() {
        return None;
    }

    let extent = |f: fn(&ssm_viewer::Sample) -> f64| {
        curves
            .iter()
            .flat_map(|c| c.samples.iter().map(f))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    };
    let (x0, x1) = x.unwrap_or_else(|| extent(|s| s.wavelength));
    let (y0, y1) = y.unwrap_or_else(|| extent(|s| s.intensity));
    Some(([x0, y0], [x1, y1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssm_viewer::Sample;

    fn curve() -> Vec<Curve> {
        vec![Curve {
            label: "a".into(),
            samples: vec![Sample::new(200.0, -5.0), Sample::new(900.0, 40.0)],
        }]
    }

    #[test]
    fn test_no_ranges_no_bounds() {
        assert_eq!(display_bounds(&curve(), &AxisRanges::default()), None);
    }

    #[test]
    fn test_half_set_axis_uses_data() {
        let ranges = AxisRanges {
            x_min: Some(0.0),
            x_max: Some(1130.0),
            y_min: Some(-500.0),
            y_max: None,
        };
        assert_eq!(
            display_bounds(&curve(), &ranges),
            Some(([0.0, -5.0], [1130.0, 40.0]))
        );
    }

    #[test]
    fn test_bounds_pushed_only_when_changed() {
        let mut applied = None;
        let fixed = Some(([0.0, -5.0], [1130.0, 40.0]));

        assert_eq!(bounds_change(fixed, &mut applied), Some(fixed));
        // later frames leave the user's pan/zoom alone
        assert_eq!(bounds_change(fixed, &mut applied), None);
        assert_eq!(bounds_change(fixed, &mut applied), None);

        // clearing the ranges hands control back to auto bounds once
        assert_eq!(bounds_change(None, &mut applied), Some(None));
        assert_eq!(bounds_change(None, &mut applied), None);
    }
}
