//! The in-memory shapes data takes on its way through the pipeline: the
//! parsed [`Series`], the smoothing [`Period`] and the [`SmoothedRecord`]
//! pairs that are written back out.
use std::fmt;
use std::num::NonZeroUsize;

use num_traits::Float;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::smooth::{moving_average, MovingAverageError};

/// All the ways a [`Series`] can fail to be assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("The independent and dependent arrays do not match in length ({0} vs {1})")]
    LengthMismatch(usize, usize),
}

/// One data row of an XVG file, keeping only its first two columns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawRecord {
    /// The first column, usually simulation time or step
    pub independent_value: f64,
    /// The second column, the observable being smoothed
    pub dependent_value: f64,
}

impl RawRecord {
    pub fn new(independent_value: f64, dependent_value: f64) -> Self {
        Self {
            independent_value,
            dependent_value,
        }
    }
}

/// Two index-aligned arrays read from an XVG file in line order.
///
/// The arrays can only grow together, so `independent[i]` always pairs
/// with `dependent[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    independent: Vec<f64>,
    dependent: Vec<f64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from two existing arrays, checking that they are the same length
    pub fn from_arrays(independent: Vec<f64>, dependent: Vec<f64>) -> Result<Self, SeriesError> {
        if independent.len() != dependent.len() {
            return Err(SeriesError::LengthMismatch(
                independent.len(),
                dependent.len(),
            ));
        }
        Ok(Self {
            independent,
            dependent,
        })
    }

    pub fn push(&mut self, record: RawRecord) {
        self.independent.push(record.independent_value);
        self.dependent.push(record.dependent_value);
    }

    pub fn independent(&self) -> &[f64] {
        &self.independent
    }

    pub fn dependent(&self) -> &[f64] {
        &self.dependent
    }

    pub fn len(&self) -> usize {
        self.independent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.independent.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RawRecord> {
        let x = self.independent.get(index)?;
        let y = self.dependent.get(index)?;
        Some(RawRecord::new(*x, *y))
    }

    pub fn iter(&self) -> impl Iterator<Item = RawRecord> + '_ {
        self.independent
            .iter()
            .zip(self.dependent.iter())
            .map(|(x, y)| RawRecord::new(*x, *y))
    }

    /// Smooth the dependent array with a trailing, zero-padded window of `period` samples.
    pub fn moving_average(
        &self,
        period: Period,
    ) -> Result<Vec<SmoothedRecord<f64>>, MovingAverageError> {
        moving_average(&self.independent, &self.dependent, period)
    }
}

impl FromIterator<RawRecord> for Series {
    fn from_iter<T: IntoIterator<Item = RawRecord>>(iter: T) -> Self {
        let mut series = Series::new();
        series.extend(iter);
        series
    }
}

impl Extend<RawRecord> for Series {
    fn extend<T: IntoIterator<Item = RawRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

/// The number of samples averaged at each position. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period(NonZeroUsize);

impl Period {
    /// Returns `None` when `width` is zero
    pub fn new(width: usize) -> Option<Self> {
        NonZeroUsize::new(width).map(Self)
    }

    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for Period {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An independent value paired with the moving average ending at it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmoothedRecord<F: Float> {
    pub independent_value: F,
    pub averaged_value: F,
}

impl<F: Float> SmoothedRecord<F> {
    pub fn new(independent_value: F, averaged_value: F) -> Self {
        Self {
            independent_value,
            averaged_value,
        }
    }
}
