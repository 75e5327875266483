use std::path::Path;

use crate::data::model::{AxisRanges, LabeledSpectrum};
use crate::data::overlay::{load_all, rescale_all, Curve, FileFailure};

// ---------------------------------------------------------------------------
// View mode
// ---------------------------------------------------------------------------

/// Where the session is in its load → plot → clear cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Empty,
    Loaded,
    Plotted,
    Rescaled,
}

/// Operations that don't apply in the current state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No data to plot.")]
    NothingLoaded,
    #[error("None of the selected files could be loaded.")]
    NoFilesParsed,
    #[error("None of the loaded spectra could be rescaled.")]
    NothingRescaled,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Loaded spectra plus the current view, independent of rendering.
#[derive(Debug)]
pub struct Session {
    mode: ViewMode,
    spectra: Vec<LabeledSpectrum>,
    rescaled: Vec<Curve>,
    /// Problems from the last load or rescale, one per file.
    failures: Vec<FileFailure>,
    status: String,
    pub axis_ranges: AxisRanges,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            mode: ViewMode::Empty,
            spectra: Vec::new(),
            rescaled: Vec::new(),
            failures: Vec::new(),
            status: "No file loaded.".to_string(),
            axis_ranges: AxisRanges::default(),
        }
    }
}

impl Session {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Loaded spectra in selection order.
    pub fn spectra(&self) -> &[LabeledSpectrum] {
        &self.spectra
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the loaded spectra with the files at `paths`.
    ///
    /// When nothing parses the previous spectra and mode are kept.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), SessionError> {
        let report = load_all(paths);
        self.failures = report.failures;

        if report.loaded.is_empty() {
            self.status = "No file loaded.".to_string();
            if !self.failures.is_empty() {
                self.status = format!("Failed to load: {}", self.failure_labels());
            }
            return Err(SessionError::NoFilesParsed);
        }

        let names: Vec<&str> = report.loaded.iter().map(|s| s.label.as_str()).collect();
        self.status = format!("Loaded files: {}", names.join(", "));
        if !self.failures.is_empty() {
            let failed = self.failure_labels();
            self.status.push_str(&format!(" (failed: {failed})"));
        }
        log::info!("{}", self.status);

        self.spectra = report.loaded;
        self.rescaled.clear();
        self.mode = ViewMode::Loaded;
        Ok(())
    }

    /// Show the loaded spectra unscaled.
    pub fn plot(&mut self) -> Result<(), SessionError> {
        if self.mode == ViewMode::Empty {
            self.status = SessionError::NothingLoaded.to_string();
            return Err(SessionError::NothingLoaded);
        }
        self.mode = ViewMode::Plotted;
        Ok(())
    }

    /// Show every loaded spectrum scaled to a unit peak.  Spectra with no
    /// positive peak are left out and listed in [`Session::failures`].
    pub fn rescale(&mut self) -> Result<(), SessionError> {
        if self.mode == ViewMode::Empty {
            self.status = SessionError::NothingLoaded.to_string();
            return Err(SessionError::NothingLoaded);
        }

        let report = rescale_all(&self.spectra);
        self.failures = report.failures;
        if report.curves.is_empty() {
            self.status = self.failure_details();
            return Err(SessionError::NothingRescaled);
        }
        self.status = if self.failures.is_empty() {
            let names: Vec<&str> = report.curves.iter().map(|c| c.label.as_str()).collect();
            format!("Rescaled files: {}", names.join(", "))
        } else {
            self.failure_details()
        };

        self.rescaled = report.curves;
        self.mode = ViewMode::Rescaled;
        Ok(())
    }

    /// Drop everything and return to [`ViewMode::Empty`].
    pub fn clear(&mut self) {
        self.spectra.clear();
        self.rescaled.clear();
        self.failures.clear();
        self.mode = ViewMode::Empty;
        self.status = "Plot cleared. Ready to start over.".to_string();
        log::info!("Session cleared");
    }

    /// Curves to draw for the current mode, in selection order.
    pub fn curves(&self) -> Vec<Curve> {
        match self.mode {
            ViewMode::Plotted => self
                .spectra
                .iter()
                .map(|s| Curve {
                    label: s.label.clone(),
                    samples: s.spectrum.samples.clone(),
                })
                .collect(),
            ViewMode::Rescaled => self.rescaled.clone(),
            ViewMode::Empty | ViewMode::Loaded => Vec::new(),
        }
    }

    /// Each failure with its own message, e.g. `a.SSM: Max value is -3, cannot rescale`.
    fn failure_details(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn failure_labels(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    fn fixture() -> (tempfile::TempDir, Vec<std::path::PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.SSM", "hdr\nInt.Time=50)\n300.0 10.0,x\n200.0 5.0,x\n");
        let flat = write_file(&dir, "flat.SSM", "hdr\nInt.Time=20)\n300.0 0.0,x\n");
        let bad = write_file(&dir, "bad.SSM", "hdr\nInt.Time=20)\nabc,100\n");
        (dir, vec![good, flat, bad])
    }

    #[test]
    fn test_starts_empty() {
        let mut s = Session::default();
        assert_eq!(s.mode(), ViewMode::Empty);
        assert_eq!(s.status(), "No file loaded.");
        assert!(matches!(s.plot(), Err(SessionError::NothingLoaded)));
        assert!(matches!(s.rescale(), Err(SessionError::NothingLoaded)));
        assert_eq!(s.mode(), ViewMode::Empty);
        assert!(s.curves().is_empty());
    }

    #[test]
    fn test_full_cycle() {
        let (_dir, paths) = fixture();
        let mut s = Session::default();

        s.load(&paths).unwrap();
        assert_eq!(s.mode(), ViewMode::Loaded);
        assert_eq!(s.spectra().len(), 2);
        assert_eq!(s.failures().len(), 1);
        assert_eq!(s.failures()[0].label, "bad.SSM");
        assert_eq!(s.failures()[0].error.line(), Some(3));
        assert!(s.status().starts_with("Loaded files: good.SSM, flat.SSM"));
        assert!(s.curves().is_empty());

        s.plot().unwrap();
        assert_eq!(s.mode(), ViewMode::Plotted);
        assert_eq!(s.curves().len(), 2);

        s.rescale().unwrap();
        assert_eq!(s.mode(), ViewMode::Rescaled);
        let curves = s.curves();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, "good.SSM");
        assert_eq!(curves[0].samples[1].intensity, 1.0);
        assert_eq!(s.failures()[0].label, "flat.SSM");

        // loaded data is untouched by rescaling
        assert_eq!(s.spectra()[0].spectrum.samples[1].intensity, 10.0);

        s.clear();
        assert_eq!(s.mode(), ViewMode::Empty);
        assert!(s.spectra().is_empty());
        assert_eq!(s.status(), "Plot cleared. Ready to start over.");
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let (_dir, paths) = fixture();
        let mut s = Session::default();
        s.load(&paths[..1]).unwrap();
        s.plot().unwrap();

        assert!(matches!(s.load(&paths[2..]), Err(SessionError::NoFilesParsed)));
        assert_eq!(s.mode(), ViewMode::Plotted);
        assert_eq!(s.spectra().len(), 1);
        assert_eq!(s.status(), "Failed to load: bad.SSM");
    }

    #[test]
    fn test_all_flat_rescale_fails() {
        let (_dir, paths) = fixture();
        let mut s = Session::default();
        s.load(&paths[1..2]).unwrap();
        assert!(matches!(s.rescale(), Err(SessionError::NothingRescaled)));
        assert_eq!(s.mode(), ViewMode::Loaded);
        assert_eq!(s.status(), "flat.SSM: Max value is 0, cannot rescale");
    }

    #[test]
    fn test_negative_peak_reports_real_max() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.SSM", "hdr\nInt.Time=50)\n300.0 10.0,x\n");
        let dark = write_file(&dir, "dark.SSM", "hdr\nInt.Time=50)\n300.0 -3.0,x\n301.0 -7.0,x\n");
        let mut s = Session::default();
        s.load(&[good, dark]).unwrap();

        s.rescale().unwrap();
        assert_eq!(s.curves().len(), 1);
        assert_eq!(s.status(), "dark.SSM: Max value is -3, cannot rescale");
    }

    #[test]
    fn test_clean_rescale_replaces_load_failures_in_status() {
        let (_dir, paths) = fixture();
        let mut s = Session::default();
        s.load(&[paths[0].clone(), paths[2].clone()]).unwrap();
        assert!(s.status().contains("(failed: bad.SSM)"));

        s.rescale().unwrap();
        assert!(s.failures().is_empty());
        assert_eq!(s.status(), "Rescaled files: good.SSM");
    }
}
