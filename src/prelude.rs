pub use crate::series::{Period, RawRecord, Series, SmoothedRecord};
pub use crate::smooth::{moving_average, MovingAverage, ZeroPaddedWindow};
pub use crate::text::{parse_lines, records_to_file, records_to_writer, series_from_file};
pub use crate::validate::{parse_period, validate_xvg_path};
