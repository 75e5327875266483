use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;

use super::error::SpectrumError;
use super::model::{Sample, Spectrum, SpectrumFormat};

type Result<T> = std::result::Result<T, SpectrumError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a spectrum from a file.  Dispatch by extension, falling back to
/// sniffing the first two lines.
///
/// Supported formats:
/// * `.ssm` – spectrometer export (header, integration time, `wl counts,...` rows)
/// * `.csv` – header row with `x` and `y` columns, one sample per row
pub fn load_file(path: &Path) -> Result<Spectrum> {
    // Decoded lossily: header lines sometimes carry non-UTF-8 bytes.
    let bytes = std::fs::read(path).map_err(|source| SpectrumError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let format = SpectrumFormat::detect(path, &text)?;
    log::debug!("{}: detected {format} format", path.display());

    let spectrum = format.parse(&text)?;
    log::debug!(
        "{}: {} samples, integration time {:?} ms",
        path.display(),
        spectrum.len(),
        spectrum.integration_time_ms
    );
    Ok(spectrum)
}

impl SpectrumFormat {
    /// Pick the format for `path`.  The extension wins when it is known;
    /// otherwise the content decides.
    pub fn detect(path: &Path, text: &str) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "ssm" => Ok(SpectrumFormat::Ssm),
            "csv" => Ok(SpectrumFormat::XyCsv),
            _ => Self::sniff(text)
                .ok_or_else(|| SpectrumError::parse("unrecognised spectrum format")),
        }
    }

    /// Guess the format from content alone.
    pub fn sniff(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let first = lines.next()?;
        let has_column = |name: &str| {
            first
                .split(',')
                .any(|field| field.trim().eq_ignore_ascii_case(name))
        };
        if has_column("x") && has_column("y") {
            return Some(SpectrumFormat::XyCsv);
        }
        let second = lines.next()?;
        find_time_label(second).map(|_| SpectrumFormat::Ssm)
    }

    /// Parse `text` according to this format.
    pub fn parse(self, text: &str) -> Result<Spectrum> {
        match self {
            SpectrumFormat::Ssm => parse_ssm(text),
            SpectrumFormat::XyCsv => parse_xy_csv(text),
        }
    }
}

// ---------------------------------------------------------------------------
// SSM parser
// ---------------------------------------------------------------------------

/// SSM layout:
///
/// ```text
/// <header line, ignored>
/// ...Int.Time=50)
/// 200.13 1024.0,<ignored>...
/// 200.52 1031.0,<ignored>...
/// ```
///
/// Data rows keep everything after the first comma out of the sample; blank
/// rows are skipped.  The returned samples are sorted by wavelength.
pub fn parse_ssm(text: &str) -> Result<Spectrum> {
    let mut lines = text.lines();
    let (Some(_header), Some(time_line)) = (lines.next(), lines.next()) else {
        return Err(SpectrumError::parse(
            "missing header or integration-time line",
        ));
    };

    let integration_time_ms =
        parse_integration_time(time_line).map_err(|msg| SpectrumError::parse_at(2, msg))?;

    let mut samples = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 3;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(parse_ssm_row(line, line_no)?);
    }

    if samples.is_empty() {
        return Err(SpectrumError::parse("no data rows"));
    }

    Ok(Spectrum::from_unsorted(Some(integration_time_ms), samples))
}

/// Byte offset just past a case-insensitive `time` label.
///
/// `time` has to stand as its own word (`Int.Time`, `Integration Time`) or be
/// glued to `int` (`IntTime`); `Timestamp` or `Runtime` don't count.
fn find_time_label(line: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with `line`.
    let lower = line.to_ascii_lowercase();
    lower
        .match_indices("time")
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let before = &lower[..pos];
            let starts_word = before
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
                || before.ends_with("int");
            let ends_word = lower[pos + 4..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            starts_word && ends_word
        })
        .map(|pos| pos + 4)
}

/// Read the integer following the `time` label, e.g. `Int.Time=50)`,
/// `Integration Time (ms): 50`, `IntTime: 50 ms`.
///
/// Only separators (`=`, `:`, brackets, a `(ms)` unit) may sit between the
/// label and the value, and only an `ms` unit and closing brackets may follow it.
fn parse_integration_time(line: &str) -> std::result::Result<u32, String> {
    let after_label = find_time_label(line)
        .map(|pos| &line[pos..])
        .ok_or_else(|| format!("no integration-time label in '{}'", line.trim()))?;

    let start = after_label
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("integration time has no value in '{}'", line.trim()))?;

    let prefix = after_label[..start]
        .to_ascii_lowercase()
        .replace("(ms)", "")
        .replace("[ms]", "");
    if prefix.trim_end().ends_with('-') {
        return Err("integration time is negative".to_string());
    }
    if !prefix
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '=' | ':' | '(' | '['))
    {
        return Err(format!(
            "unexpected '{}' before the integration time",
            after_label[..start].trim()
        ));
    }

    let tail = &after_label[start..];
    let end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let digits = &tail[..end];

    let mut rest = tail[end..].trim_start();
    if rest.get(..2).is_some_and(|unit| unit.eq_ignore_ascii_case("ms"))
        && !rest[2..].starts_with(|c: char| c.is_alphanumeric())
    {
        rest = rest[2..].trim_start();
    }
    if !rest.chars().all(|c| c.is_whitespace() || matches!(c, ')' | ']')) {
        return Err(format!(
            "integration time '{}' is not an integer",
            tail.trim_end()
        ));
    }

    digits
        .parse::<u32>()
        .map_err(|e| format!("integration time '{digits}': {e}"))
}

fn parse_ssm_row(line: &str, line_no: usize) -> Result<Sample> {
    let first_field = line.split(',').next().unwrap_or("");
    let tokens: Vec<&str> = first_field.split_whitespace().collect();
    let [wavelength, intensity] = tokens.as_slice() else {
        return Err(SpectrumError::parse_at(
            line_no,
            format!(
                "expected 'wavelength intensity' before the first comma, found '{}'",
                first_field.trim()
            ),
        ));
    };
    Ok(Sample::new(
        parse_number(wavelength, line_no, "wavelength")?,
        parse_number(intensity, line_no, "intensity")?,
    ))
}

fn parse_number(token: &str, line_no: usize, what: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SpectrumError::parse_at(line_no, format!("{what} '{token}' is not a number")))
}

// ---------------------------------------------------------------------------
// x/y CSV parser
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct XyRow {
    x: f64,
    y: f64,
}

/// CSV layout: header row naming `x` and `y` (any case, any position).
/// Other columns are ignored.  The returned samples are sorted by `x`.
pub fn parse_xy_csv(text: &str) -> Result<Spectrum> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    for column in ["x", "y"] {
        if !headers.iter().any(|h| h == column) {
            return Err(SpectrumError::parse_at(
                1,
                format!("CSV header is missing an '{column}' column"),
            ));
        }
    }

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line_no = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(samples.len() + 2);

        let row: XyRow = record.deserialize(Some(&headers)).map_err(|e| {
            SpectrumError::parse_at(line_no, format!("x and y must be numbers: {e}"))
        })?;
        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(SpectrumError::parse_at(line_no, "x and y must be finite"));
        }
        samples.push(Sample::new(row.x, row.y));
    }

    if samples.is_empty() {
        return Err(SpectrumError::parse("no data rows"));
    }

    Ok(Spectrum::from_unsorted(None, samples))
}

fn csv_error(e: csv::Error) -> SpectrumError {
    SpectrumError::Parse {
        line: e.position().map(|p| p.line() as usize),
        message: e.to_string(),
    }
}
