//! Read, smooth and write a series in one pass.
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::series::{Period, SmoothedRecord};
use crate::smooth::MovingAverageError;
use crate::text::{records_to_file, series_from_file, ParseError, WriteError};
use crate::validate::InputValidationError;

/// The file written into the working directory by the command line tool
pub const OUTPUT_FILE_NAME: &str = "moving_average.xvg";

/// Any failure that ends a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InputValidation(#[from] InputValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    MovingAverage(#[from] MovingAverageError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Parse `input`, average it over `period` samples and write the result to `output`.
///
/// The output file is only created once the whole input has been parsed and
/// averaged, so a malformed input never leaves a partial file behind.
pub fn run_pipeline<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    period: Period,
    output: Q,
) -> Result<Vec<SmoothedRecord<f64>>, PipelineError> {
    let series = series_from_file(input.as_ref())?;
    info!(
        "Parsed {} rows from {}",
        series.len(),
        input.as_ref().display()
    );
    let smoothed = series.moving_average(period)?;
    records_to_file(&smoothed, output)?;
    Ok(smoothed)
}
