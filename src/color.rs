use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

/// `n` distinct line colours, one per overlaid file, hues spread evenly.
///
/// Starts at blue so a single spectrum looks like the classic plot.
pub fn curve_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (220.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            let rgb = rgb.into_format::<u8>();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}
