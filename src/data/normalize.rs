use super::error::SpectrumError;
use super::model::{max_intensity, Sample, Spectrum};

/// Divide every intensity by the largest one, producing a unit-peak curve.
///
/// Wavelengths are copied unchanged and the input is left untouched, so the
/// unscaled data can still be plotted.  Fails with
/// [`SpectrumError::DegenerateRange`] when there is no positive peak to
/// divide by (flat zero signal, empty input, all-negative counts).
pub fn rescale_by_max(samples: &[Sample]) -> Result<Vec<Sample>, SpectrumError> {
    let max = max_intensity(samples).unwrap_or(0.0);
    if !(max.is_finite() && max > 0.0) {
        return Err(SpectrumError::DegenerateRange { max });
    }
    Ok(samples
        .iter()
        .map(|s| Sample::new(s.wavelength, s.intensity / max))
        .collect())
}

impl Spectrum {
    /// Unit-peak copy of the samples. See [`rescale_by_max`].
    pub fn normalized(&self) -> Result<Vec<Sample>, SpectrumError> {
        rescale_by_max(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rescale_example() {
        let input = vec![Sample::new(200.0, 5.0), Sample::new(300.0, 10.0)];
        let out = rescale_by_max(&input).unwrap();
        assert_eq!(out, vec![Sample::new(200.0, 0.5), Sample::new(300.0, 1.0)]);
        // input untouched
        assert_eq!(input[0].intensity, 5.0);
    }

    #[test]
    fn test_negative_values_below_peak() {
        let out = rescale_by_max(&[(1.0, -2.0).into(), (2.0, 4.0).into()]).unwrap();
        assert_relative_eq!(out[0].intensity, -0.5);
        assert_relative_eq!(out[1].intensity, 1.0);
    }

    #[test]
    fn test_zero_max_is_degenerate() {
        let err = rescale_by_max(&[(1.0, 0.0).into(), (2.0, 0.0).into()]).unwrap_err();
        assert!(matches!(err, SpectrumError::DegenerateRange { max } if max == 0.0));
    }

    #[test]
    fn test_empty_and_negative_are_degenerate() {
        assert!(matches!(
            rescale_by_max(&[]),
            Err(SpectrumError::DegenerateRange { .. })
        ));
        assert!(matches!(
            rescale_by_max(&[(1.0, -3.0).into()]),
            Err(SpectrumError::DegenerateRange { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_unit_peak_and_same_wavelengths(
            rows in prop::collection::vec((0.0f64..2000.0, -1.0e5f64..1.0e5), 1..200)
                .prop_filter("needs a positive peak", |rows| rows.iter().any(|r| r.1 > 0.0))
        ) {
            let samples: Vec<Sample> = rows.into_iter().map(Sample::from).collect();
            let out = rescale_by_max(&samples).unwrap();

            let peak = out.iter().map(|s| s.intensity).fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(peak, 1.0);
            prop_assert!(out
                .iter()
                .zip(&samples)
                .all(|(a, b)| a.wavelength == b.wavelength));
        }
    }
}
