use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Sample – one (wavelength, intensity) pair
// ---------------------------------------------------------------------------

/// A single point of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Wavelength in nanometres (x).
    pub wavelength: f64,
    /// Intensity in detector counts (y).
    pub intensity: f64,
}

impl Sample {
    pub fn new(wavelength: f64, intensity: f64) -> Self {
        Sample {
            wavelength,
            intensity,
        }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((wavelength, intensity): (f64, f64)) -> Self {
        Sample::new(wavelength, intensity)
    }
}

// ---------------------------------------------------------------------------
// Spectrum – one parsed file
// ---------------------------------------------------------------------------

/// One parsed spectrum file.
///
/// Samples are sorted ascending by wavelength and never empty; both are
/// guaranteed by the loader, which is the only place spectra are built from
/// file content.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Exposure time in milliseconds. `None` for formats that don't record it.
    pub integration_time_ms: Option<u32>,
    pub samples: Vec<Sample>,
}

impl Spectrum {
    /// Build a spectrum, sorting the samples by wavelength.
    ///
    /// The sort is stable so rows with equal wavelengths (`-0.0` and `0.0`
    /// included) keep file order. Wavelengths are never NaN here.
    pub fn from_unsorted(integration_time_ms: Option<u32>, mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| {
            a.wavelength
                .partial_cmp(&b.wavelength)
                .unwrap_or(Ordering::Equal)
        });
        Spectrum {
            integration_time_ms,
            samples,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the spectrum holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest intensity, `None` when empty.
    pub fn max_intensity(&self) -> Option<f64> {
        max_intensity(&self.samples)
    }

    /// Wavelength span covered by the samples.
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.wavelength, last.wavelength))
    }
}

pub(crate) fn max_intensity(samples: &[Sample]) -> Option<f64> {
    samples
        .iter()
        .map(|s| s.intensity)
        .reduce(f64::max)
}

// ---------------------------------------------------------------------------
// LabeledSpectrum – a spectrum plus its display label
// ---------------------------------------------------------------------------

/// A spectrum together with the label it is shown under (the file name).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSpectrum {
    pub label: String,
    pub spectrum: Spectrum,
}

// ---------------------------------------------------------------------------
// SpectrumFormat – supported input layouts
// ---------------------------------------------------------------------------

/// On-disk layouts the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumFormat {
    /// Spectrometer export: header, integration-time line, `wl intensity,...` rows.
    Ssm,
    /// Plain CSV with a header row naming `x` and `y` columns.
    XyCsv,
}

impl fmt::Display for SpectrumFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrumFormat::Ssm => write!(f, "SSM"),
            SpectrumFormat::XyCsv => write!(f, "x/y CSV"),
        }
    }
}

// ---------------------------------------------------------------------------
// AxisRanges – caller-supplied display bounds
// ---------------------------------------------------------------------------

/// Error returned for an axis bound that isn't a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid axis range input: '{0}'")]
pub struct AxisInputError(pub String);

/// Optional display bounds. Each value is independent; a pair only takes
/// effect when both its min and max are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRanges {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl AxisRanges {
    /// Parse one text field: blank means "unset".
    pub fn parse_field(text: &str) -> Result<Option<f64>, AxisInputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| AxisInputError(trimmed.to_string()))
    }

    /// Parse all four fields in `[x_min, x_max, y_min, y_max]` order.
    pub fn from_fields(fields: [&str; 4]) -> Result<Self, AxisInputError> {
        Ok(AxisRanges {
            x_min: Self::parse_field(fields[0])?,
            x_max: Self::parse_field(fields[1])?,
            y_min: Self::parse_field(fields[2])?,
            y_max: Self::parse_field(fields[3])?,
        })
    }

    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        Some((self.x_min?, self.x_max?))
    }

    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        Some((self.y_min?, self.y_max?))
    }
}
