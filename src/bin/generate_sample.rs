use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ssm_viewer::load_file;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Counts on `grid` for a set of `(centre, width, height)` emission lines,
/// on a small dark-current baseline with a deterministic ripple.
fn emission_counts(grid: &[f64], lines: &[(f64, f64, f64)], baseline: f64) -> Vec<f64> {
    grid.iter()
        .map(|&wl| {
            let signal: f64 = lines
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
                .sum();
            let ripple = if baseline > 0.0 {
                (wl * 0.7).sin() * baseline * 0.1
            } else {
                0.0
            };
            (signal + baseline + ripple).round()
        })
        .collect()
}

/// Render an SSM export.  Rows are written in interleaved (even, then odd)
/// order, as the spectrometer does, so the reader has to sort them.
fn ssm_text(integration_ms: u32, grid: &[f64], counts: &[f64]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Silver-Nova spectrum export")?;
    writeln!(out, "Int.Time={integration_ms})")?;
    let order = (0..grid.len()).step_by(2).chain((1..grid.len()).step_by(2));
    for i in order {
        writeln!(out, "{:.2} {:.0},0,0", grid[i], counts[i])?;
    }
    Ok(out)
}

fn csv_text(grid: &[f64], counts: &[f64]) -> Result<String> {
    let mut out = String::from("x,y\n");
    for (x, y) in grid.iter().zip(counts) {
        writeln!(out, "{x:.2},{y:.0}")?;
    }
    Ok(out)
}

fn write(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "sample_spectra".into()));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    // 190 → 1130 nm, 0.5 nm step
    let grid: Vec<f64> = (0..=1880).map(|i| 190.0 + i as f64 * 0.5).collect();

    let sets: [(&str, u32, Vec<(f64, f64, f64)>, f64); 3] = [
        ("532_OD4_Before.SSM", 100, vec![(532.0, 1.2, 52000.0), (1064.0, 2.0, 3100.0)], 600.0),
        ("532_OD3_After.SSM", 50, vec![(532.0, 1.5, 18000.0), (808.0, 4.0, 2400.0)], 550.0),
        ("dark_flat.SSM", 10, Vec::new(), 0.0),
    ];

    let mut written = Vec::new();
    for (name, integration_ms, lines, baseline) in &sets {
        let counts = emission_counts(&grid, lines, *baseline);
        written.push(write(&dir, name, &ssm_text(*integration_ms, &grid, &counts)?)?);
    }

    let counts = emission_counts(&grid, &[(656.3, 1.0, 9000.0), (486.1, 1.0, 3200.0)], 200.0);
    written.push(write(&dir, "hydrogen.csv", &csv_text(&grid, &counts)?)?);

    for path in &written {
        let spectrum = load_file(path).with_context(|| format!("re-reading {}", path.display()))?;
        log::info!(
            "{}: {} samples, peak {:?}",
            path.display(),
            spectrum.len(),
            spectrum.max_intensity()
        );
    }

    println!(
        "Wrote {} spectra ({} wavelengths each) to {}",
        written.len(),
        grid.len(),
        dir.display()
    );
    Ok(())
}
