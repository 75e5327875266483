use std::path::PathBuf;

/// Errors raised while loading or rescaling a single spectrum.
#[derive(Debug, thiserror::Error)]
pub enum SpectrumError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content doesn't match the expected layout. `line` is 1-based.
    #[error("{}", parse_message(*line, message))]
    Parse {
        line: Option<usize>,
        message: String,
    },

    /// Rescaling needs a positive peak intensity.
    #[error("Max value is {max}, cannot rescale")]
    DegenerateRange { max: f64 },
}

fn parse_message(line: Option<usize>, message: &str) -> String {
    match line {
        Some(n) => format!("Parse error on line {n}: {message}"),
        None => format!("Parse error: {message}"),
    }
}

impl SpectrumError {
    pub(crate) fn parse_at(line: usize, message: impl Into<String>) -> Self {
        SpectrumError::Parse {
            line: Some(line),
            message: message.into(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        SpectrumError::Parse {
            line: None,
            message: message.into(),
        }
    }

    /// Line number for parse errors that point at a specific line.
    pub fn line(&self) -> Option<usize> {
        match self {
            SpectrumError::Parse { line, .. } => *line,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = SpectrumError::parse_at(3, "expected two numbers");
        assert_eq!(err.to_string(), "Parse error on line 3: expected two numbers");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_display_without_line() {
        let err = SpectrumError::parse("no data rows");
        assert_eq!(err.to_string(), "Parse error: no data rows");
        assert_eq!(err.line(), None);
    }
}
