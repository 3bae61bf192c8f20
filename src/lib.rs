//! `xvgsma` computes a simple moving average over the two-column series
//! stored in a GROMACS `.xvg` file, such as the output of `gmx energy`.
//!
//! The work is split into three stages that can be used on their own:
//! [`text`] reads a [`Series`] and writes smoothed records back out, and
//! [`smooth`] computes the average itself. [`run_pipeline`] strings them
//! together the way the `xvgsma` binary does.
//!
//! The average is a trailing window of `period` samples whose warm-up is
//! padded with zeros, so the first `period - 1` values are pulled towards
//! zero rather than averaged over fewer samples.
//!
//! # Usage
//! ```
//! use xvgsma::{moving_average, text, Period};
//!
//! let content = "@ title \"Potential\"\n0 5\n1 10\n2 15\n";
//! let series = text::parse_lines(content.lines()).unwrap();
//! let period = Period::new(3).unwrap();
//! let smoothed = moving_average(series.independent(), series.dependent(), period).unwrap();
//! assert_eq!(smoothed.len(), 3);
//! assert_eq!(smoothed[1].averaged_value, 5.0);
//! assert_eq!(smoothed[2].averaged_value, 10.0);
//!
//! let mut out = Vec::new();
//! text::records_to_writer(&smoothed, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().ends_with("2.0 10.0\n"));
//! ```
pub mod pipeline;
pub mod prelude;
pub mod series;
pub mod smooth;
pub mod text;
pub mod validate;

#[cfg(test)]
mod test_data;

pub use crate::pipeline::{run_pipeline, PipelineError, OUTPUT_FILE_NAME};
pub use crate::series::{Period, RawRecord, Series, SeriesError, SmoothedRecord};
pub use crate::smooth::{moving_average, MovingAverageError};
pub use crate::text::{ParseError, WriteError};
pub use crate::validate::InputValidationError;
