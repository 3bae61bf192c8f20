//! Reading and writing the whitespace-delimited XVG text format.
//!
//! Only lines whose first character is an ASCII digit are read as data. Lines
//! starting with `@` or `#` are metadata, and everything else, including rows
//! that begin with a minus sign, is passed over.
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

use log::{debug, info};
use num_traits::Float;
use thiserror::Error;

use crate::series::{RawRecord, Series, SmoothedRecord};

/// All the ways reading a series can fail
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Line {line}: could not parse {token:?} as a number")]
    InvalidNumber { line: usize, token: String },
    #[error("Line {line}: expected at least two columns, found {found}")]
    MissingColumn { line: usize, found: usize },
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Writing the smoothed series failed
#[derive(Debug, Error)]
#[error("Failed to write output: {0}")]
pub struct WriteError(#[from] pub io::Error);

/// How a single trimmed line of an XVG file is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `@` directives and `#` comments
    Metadata,
    /// Begins with a digit
    Data,
    /// Blank, or begins with anything else
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> LineKind {
        match line.chars().next() {
            Some('@') | Some('#') => LineKind::Metadata,
            Some(c) if c.is_ascii_digit() => LineKind::Data,
            _ => LineKind::Other,
        }
    }
}

/// Parse one data line, checking every token but keeping only the first two.
fn parse_record(line: &str, line_number: usize) -> Result<RawRecord, ParseError> {
    let mut columns = [0.0f64; 2];
    let mut found = 0;
    for token in line.split_whitespace() {
        let value: f64 = token.parse().map_err(|_| ParseError::InvalidNumber {
            line: line_number,
            token: token.to_string(),
        })?;
        if found < columns.len() {
            columns[found] = value;
        }
        found += 1;
    }
    if found < 2 {
        return Err(ParseError::MissingColumn {
            line: line_number,
            found,
        });
    }
    Ok(RawRecord::new(columns[0], columns[1]))
}

/// Classify one raw line and append it to `series` if it is a data row.
fn accept_line(series: &mut Series, line: &str, line_number: usize) -> Result<(), ParseError> {
    let line = line.trim();
    match LineKind::classify(line) {
        LineKind::Metadata => {}
        LineKind::Data => series.push(parse_record(line, line_number)?),
        LineKind::Other => {
            if !line.is_empty() {
                debug!("Skipping line {line_number}, not a data row: {line:?}");
            }
        }
    }
    Ok(())
}

/// Build a [`Series`] from the lines of an XVG file, in order.
pub fn parse_lines<I, S>(lines: I) -> Result<Series, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut series = Series::new();
    for (i, line) in lines.into_iter().enumerate() {
        accept_line(&mut series, line.as_ref(), i + 1)?;
    }
    Ok(series)
}

pub fn series_from_reader<R: BufRead>(mut reader: R) -> Result<Series, ParseError> {
    let mut series = Series::new();
    let mut buffer = String::new();
    let mut line_number = 0;
    loop {
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }
        line_number += 1;
        accept_line(&mut series, &buffer, line_number)?;
    }
    info!("Read {} rows from {line_number} lines", series.len());
    Ok(series)
}

pub fn series_from_file<P: AsRef<path::Path>>(path: P) -> Result<Series, ParseError> {
    let file = fs::File::open(path)?;
    series_from_reader(io::BufReader::new(file))
}

/// Format a value with the shortest digits that read back to the same number.
///
/// Values in `[1e-4, 1e16)` are written positionally and always carry a decimal
/// point (`5.0`, `0.00025`). Anything else uses an exponent with an explicit
/// sign and at least two digits (`1e-05`, `1.5e+16`). Non-finite values are
/// written `nan`, `inf` and `-inf`.
pub fn format_value<F: Float>(value: F, buffer: &mut String) {
    let value = value.to_f64().unwrap_or(f64::NAN);
    if value.is_nan() {
        buffer.push_str("nan");
        return;
    }
    if value.is_infinite() {
        buffer.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = match mantissa.strip_prefix('-') {
        Some(rest) => {
            buffer.push('-');
            rest
        }
        None => mantissa,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // Position of the decimal point relative to the first significant digit
    let point = exponent + 1;
    if point > -4 && point <= 16 {
        if point <= 0 {
            buffer.push_str("0.");
            buffer.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
            buffer.push_str(&digits);
        } else {
            let point = point as usize;
            if point >= digits.len() {
                buffer.push_str(&digits);
                buffer.extend(std::iter::repeat('0').take(point - digits.len()));
                buffer.push_str(".0");
            } else {
                buffer.push_str(&digits[..point]);
                buffer.push('.');
                buffer.push_str(&digits[point..]);
            }
        }
    } else {
        let (head, tail) = digits.split_at(1);
        buffer.push_str(head);
        if !tail.is_empty() {
            buffer.push('.');
            buffer.push_str(tail);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(buffer, "e{sign}{:02}", exponent.unsigned_abs());
    }
}

/// Render a record as it appears in the output file, without the newline
pub fn format_record<F: Float>(record: &SmoothedRecord<F>) -> String {
    let mut line = String::new();
    format_value(record.independent_value, &mut line);
    line.push(' ');
    format_value(record.averaged_value, &mut line);
    line
}

pub fn records_to_writer<F: Float, W: io::Write>(
    records: &[SmoothedRecord<F>],
    writer: &mut W,
) -> Result<(), WriteError> {
    for record in records {
        let line = format_record(record);
        debug!("{line}");
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Create or truncate `path` and write `records` to it, one per line.
pub fn records_to_file<F: Float, P: AsRef<path::Path>>(
    records: &[SmoothedRecord<F>],
    path: P,
) -> Result<(), WriteError> {
    let file = fs::File::create(path.as_ref())?;
    let mut writer = io::BufWriter::new(file);
    records_to_writer(records, &mut writer)?;
    info!(
        "Wrote {} records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_data::ENERGY_XVG;
    use rstest::rstest;

    #[test]
    fn test_parse_gromacs_energy() {
        let series = parse_lines(ENERGY_XVG.lines()).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.independent(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            series.dependent(),
            &[-51234.5, -51987.25, -52301.0, -52410.75, -52398.5]
        );
    }

    #[test]
    fn test_metadata_only() {
        let lines = ["# This file was created by gmx energy", "@TITLE \"x\"", "#comment", ""];
        let series = parse_lines(lines).unwrap();
        assert!(series.is_empty());
    }

    #[rstest]
    #[case::digit("1 2", LineKind::Data)]
    #[case::directive("@    xaxis  label \"Time (ps)\"", LineKind::Metadata)]
    #[case::comment("# gmx energy", LineKind::Metadata)]
    #[case::negative("-1.0 2.0", LineKind::Other)]
    #[case::decimal_point(".5 2.0", LineKind::Other)]
    #[case::blank("", LineKind::Other)]
    #[case::text("energy 5", LineKind::Other)]
    fn test_classify(#[case] line: &str, #[case] kind: LineKind) {
        assert_eq!(LineKind::classify(line), kind);
    }

    #[test_log::test]
    fn test_negative_leading_rows_are_skipped() {
        let lines = ["0 1.5", "-1 2.5", "  2 -3.5  "];
        let series = parse_lines(lines).unwrap();
        assert_eq!(series.independent(), &[0.0, 2.0]);
        assert_eq!(series.dependent(), &[1.5, -3.5]);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let series = parse_lines(["0 1 2 3", "1\t4\t5\t6"]).unwrap();
        assert_eq!(series.independent(), &[0.0, 1.0]);
        assert_eq!(series.dependent(), &[1.0, 4.0]);
    }

    #[test]
    fn test_invalid_token() {
        let err = parse_lines(["0 1", "1 abc"]).unwrap_err();
        match err {
            ParseError::InvalidNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            e => panic!("Unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_invalid_token_beyond_second_column() {
        let err = parse_lines(["0 1 x"]).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_lines(["0 1", "7"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn { line: 2, found: 1 }));
    }

    #[test]
    fn test_reader_matches_lines() {
        let from_reader = series_from_reader(io::Cursor::new(ENERGY_XVG)).unwrap();
        let from_lines = parse_lines(ENERGY_XVG.lines()).unwrap();
        assert_eq!(from_reader, from_lines);
    }

    #[test]
    fn test_reader_reports_line_number() {
        let text = "@ title\n0 1\n\n2 oops\n";
        let err = series_from_reader(io::Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 4, .. }));
    }

    #[test]
    fn test_write_records() {
        let records = vec![
            SmoothedRecord::new(0.0, 5.0 / 3.0),
            SmoothedRecord::new(1.0, 5.0),
            SmoothedRecord::new(2.5, -10.0),
        ];
        let mut sink = Vec::new();
        records_to_writer(&records, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text, "0.0 1.6666666666666667\n1.0 5.0\n2.5 -10.0\n");
    }

    #[rstest]
    #[case::zero(0.0, "0.0")]
    #[case::negative_zero(-0.0, "-0.0")]
    #[case::integral(52410.0, "52410.0")]
    #[case::fraction(-25617.25, "-25617.25")]
    #[case::smallest_positional(1e-4, "0.0001")]
    #[case::small_positional(0.00025, "0.00025")]
    #[case::tiny(1e-5, "1e-05")]
    #[case::tiny_fraction(-2.5e-10, "-2.5e-10")]
    #[case::largest_positional(1e15, "1000000000000000.0")]
    #[case::huge(1e16, "1e+16")]
    #[case::huge_fraction(1.2345e20, "1.2345e+20")]
    #[case::three_digit_exponent(1e100, "1e+100")]
    #[case::nan(f64::NAN, "nan")]
    #[case::infinity(f64::INFINITY, "inf")]
    #[case::negative_infinity(f64::NEG_INFINITY, "-inf")]
    fn test_write_value_formatting(#[case] value: f64, #[case] expected: &str) {
        let mut text = String::new();
        format_value(value, &mut text);
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_non_finite_rows() {
        let series = parse_lines(["0 nan", "1 inf", "2 1e-5"]).unwrap();
        let smoothed = series.moving_average(crate::series::Period::new(1).unwrap()).unwrap();
        let mut sink = Vec::new();
        records_to_writer(&smoothed, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text, "0.0 nan\n1.0 inf\n2.0 1e-05\n");
    }

    #[test]
    fn test_write_empty() {
        let records: Vec<SmoothedRecord<f64>> = Vec::new();
        let mut sink = Vec::new();
        records_to_writer(&records, &mut sink).unwrap();
        assert!(sink.is_empty());
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces() {
        let records = vec![SmoothedRecord::new(0.0, 1.0)];
        let err = records_to_writer(&records, &mut FailingWriter).unwrap_err();
        assert_eq!(err.0.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_write_to_missing_directory() {
        let path = std::env::temp_dir()
            .join("xvgsma-no-such-directory")
            .join("moving_average.xvg");
        let records = vec![SmoothedRecord::new(0.0, 1.0)];
        assert!(records_to_file(&records, path).is_err());
    }
}
