//! Exit codes following sysexits.h conventions.
//!
//! These codes provide semantic meaning for different failure modes,
//! enabling scripts and CI systems to handle errors appropriately.

#![allow(dead_code)] // Constants may be used in future or for documentation

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data error (gate rejection, no recoverable mark, malformed payload).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output file).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Classify an error chain into an exit code by its message.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        let code = if message.contains("Failed to read") {
            INPUT_ERROR
        } else if message.contains("Failed to write") {
            IO_ERROR
        } else if message.contains("rejected")
            || message.contains("no recoverable mark")
            || message.contains("malformed payload")
        {
            DATA_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_input_error() {
        let err = anyhow::anyhow!("Failed to read file: missing.png");
        assert_eq!(ExitCode::from_anyhow(&err).code, INPUT_ERROR);
    }

    #[test]
    fn test_classify_data_error() {
        let err = anyhow::anyhow!("watermark rejected: capacity shortfall");
        assert_eq!(ExitCode::from_anyhow(&err).code, DATA_ERROR);

        let err = anyhow::anyhow!("image contains no recoverable mark");
        assert_eq!(ExitCode::from_anyhow(&err).code, DATA_ERROR);
    }

    #[test]
    fn test_classify_io_error() {
        let err = anyhow::anyhow!("Failed to write marked image");
        assert_eq!(ExitCode::from_anyhow(&err).code, IO_ERROR);
    }

    #[test]
    fn test_classify_general_error() {
        let err = anyhow::anyhow!("something unexpected");
        assert_eq!(ExitCode::from_anyhow(&err).code, GENERAL_ERROR);
    }
}
