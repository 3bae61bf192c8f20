//! Checks applied to the two interactive answers before any data is read.
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::series::Period;

/// The extension an input file must carry, compared case-sensitively
pub const XVG_EXTENSION: &str = "xvg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputValidationError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Not an .xvg file: {0}")]
    WrongExtension(String),
    #[error("Period of time ({0}) invalid.")]
    InvalidPeriod(String),
}

/// Accept `path` if it names an existing regular file ending in `.xvg`.
pub fn validate_xvg_path(path: &str) -> Result<PathBuf, InputValidationError> {
    let path = path.trim();
    let candidate = Path::new(path);
    if !candidate.is_file() {
        return Err(InputValidationError::FileNotFound(path.to_string()));
    }
    match candidate.extension() {
        Some(ext) if ext == XVG_EXTENSION => Ok(candidate.to_path_buf()),
        _ => Err(InputValidationError::WrongExtension(path.to_string())),
    }
}

/// Parse a period typed by the user. Only a plain run of decimal digits with
/// a value of at least one is accepted, so `+3`, `3.0` and `0` are all refused.
pub fn parse_period(text: &str) -> Result<Period, InputValidationError> {
    let text = text.trim();
    let invalid = || InputValidationError::InvalidPeriod(text.to_string());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let width: usize = text.parse().map_err(|_| invalid())?;
    Period::new(width).ok_or_else(invalid)
}

impl FromStr for Period {
    type Err = InputValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_period(s)
    }
}
