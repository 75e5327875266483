use std::path::{Path, PathBuf};

use super::error::SpectrumError;
use super::loader::load_file;
use super::model::{LabeledSpectrum, Sample};

// ---------------------------------------------------------------------------
// Per-file outcomes
// ---------------------------------------------------------------------------

/// A file (or loaded spectrum) that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub label: String,
    pub path: Option<PathBuf>,
    pub error: SpectrumError,
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.error)
    }
}

/// Result of loading a batch of files.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully parsed spectra, in selection order.
    pub loaded: Vec<LabeledSpectrum>,
    pub failures: Vec<FileFailure>,
}

/// A rescaled curve ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub samples: Vec<Sample>,
}

/// Result of rescaling every loaded spectrum.
#[derive(Debug, Default)]
pub struct RescaleReport {
    pub curves: Vec<Curve>,
    pub failures: Vec<FileFailure>,
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Display label for a file: its name without directories.
pub fn label_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load each file independently.  A bad file is reported and skipped; it
/// never aborts the rest of the batch.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> LoadReport {
    let mut report = LoadReport::default();
    for path in paths {
        let path = path.as_ref();
        let label = label_for(path);
        match load_file(path) {
            Ok(spectrum) => report.loaded.push(LabeledSpectrum { label, spectrum }),
            Err(error) => {
                log::warn!("Failed to load {}: {error}", path.display());
                report.failures.push(FileFailure {
                    label,
                    path: Some(path.to_path_buf()),
                    error,
                });
            }
        }
    }
    report
}

/// Rescale every spectrum by its own peak.  Spectra without a positive peak
/// are reported per file.
pub fn rescale_all(spectra: &[LabeledSpectrum]) -> RescaleReport {
    let mut report = RescaleReport::default();
    for entry in spectra {
        match entry.spectrum.normalized() {
            Ok(samples) => report.curves.push(Curve {
                label: entry.label.clone(),
                samples,
            }),
            Err(error) => {
                log::warn!("Cannot rescale {}: {error}", entry.label);
                report.failures.push(FileFailure {
                    label: entry.label.clone(),
                    path: None,
                    error,
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Spectrum;

    fn labeled(label: &str, rows: &[(f64, f64)]) -> LabeledSpectrum {
        LabeledSpectrum {
            label: label.to_string(),
            spectrum: Spectrum::from_unsorted(
                Some(10),
                rows.iter().copied().map(Sample::from).collect(),
            ),
        }
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(Path::new("/data/run/OD4_Before.SSM")), "OD4_Before.SSM");
        assert_eq!(label_for(Path::new("plain.csv")), "plain.csv");
    }

    #[test]
    fn test_missing_file_is_reported_not_fatal() {
        let report = load_all(&["/definitely/not/here.SSM"]);
        assert!(report.loaded.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "here.SSM");
        assert!(matches!(report.failures[0].error, SpectrumError::Io { .. }));
    }

    #[test]
    fn test_rescale_all_partial_failure() {
        let spectra = vec![
            labeled("a", &[(1.0, 2.0), (2.0, 4.0)]),
            labeled("flat", &[(1.0, 0.0), (2.0, 0.0)]),
            labeled("b", &[(1.0, 10.0)]),
        ];
        let report = rescale_all(&spectra);
        let labels: Vec<&str> = report.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert_eq!(report.curves[0].samples[0], Sample::new(1.0, 0.5));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "flat");
        assert!(report.failures[0].to_string().starts_with("flat: Max value is 0"));
    }
}
