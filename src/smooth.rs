//! Trailing simple moving average with a zero-filled warm-up.
//!
//! The window starts out holding `period` zeros, so the first `period - 1`
//! averages are diluted by padding instead of being taken over fewer samples.
//! For `[5, 10, 15]` with a period of 3 this gives `[5/3, 15/3, 30/3]`.
use std::collections::VecDeque;

use log::{log_enabled, trace, Level};
use num_traits::Float;
use thiserror::Error;

use crate::series::{Period, SmoothedRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MovingAverageError {
    #[error("The independent and dependent arrays do not match in length ({0} vs {1})")]
    LengthMismatch(usize, usize),
}

/// A fixed-width window over a series that has `period` zeros prepended to it.
///
/// Once `n` values have been passed to [`ZeroPaddedWindow::add`] the window
/// covers `padded[n..n + period]`, i.e. the `period` values ending at the `n`-th
/// sample. The leading zeros are never stored, so the buffer holds at most
/// `min(n, period)` values.
#[derive(Debug, Clone)]
pub struct ZeroPaddedWindow<F: Float> {
    buffer: VecDeque<F>,
    period: usize,
}

impl<F: Float> ZeroPaddedWindow<F> {
    pub fn new(period: Period) -> Self {
        Self {
            buffer: VecDeque::new(),
            period: period.get(),
        }
    }

    /// Push `value` into the window, returning the value that fell out of it,
    /// which is a padding zero until the window has filled.
    pub fn add(&mut self, value: F) -> F {
        let first = if self.buffer.len() == self.period {
            self.buffer.pop_front().unwrap_or_else(F::zero)
        } else {
            F::zero()
        };
        self.buffer.push_back(value);
        first
    }

    /// Sum the window from oldest to newest. The padding zeros would come first
    /// and leave a zero start unchanged, so only stored values are added.
    pub fn sum(&self) -> F {
        self.buffer.iter().fold(F::zero(), |acc, val| acc + *val)
    }
}

#[derive(Debug, Clone)]
pub struct MovingAverage<F: Float> {
    window: ZeroPaddedWindow<F>,
    divisor: F,
}

impl<F: Float> MovingAverage<F> {
    pub fn new(period: Period) -> Self {
        let window = ZeroPaddedWindow::new(period);
        // A period too large for `F` degrades to an infinite divisor
        let divisor = F::from(period.get()).unwrap_or_else(F::infinity);
        Self { window, divisor }
    }

    pub fn add(&mut self, value: F) {
        self.window.add(value);
    }

    /// The sum of the whole window divided by the period. With a period of one
    /// this is the last value added, unchanged.
    pub fn average(&self) -> F {
        self.window.sum() / self.divisor
    }

    pub fn average_over<I: Iterator<Item = F>>(self, source: I) -> MovingAverageIter<F, I> {
        MovingAverageIter {
            state: self,
            source,
            index: 0,
        }
    }
}

pub struct MovingAverageIter<F: Float, I: Iterator<Item = F>> {
    state: MovingAverage<F>,
    source: I,
    index: usize,
}

impl<F: Float, I: Iterator<Item = F>> Iterator for MovingAverageIter<F, I> {
    type Item = F;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.source.next()?;
        self.state.add(x);
        let averaged = self.state.average();
        if log_enabled!(Level::Trace) {
            trace!(
                "{}: window sum = {:?} / {:?} = {:?}",
                self.index,
                self.state.window.sum().to_f64(),
                self.state.divisor.to_f64(),
                averaged.to_f64()
            );
        }
        self.index += 1;
        Some(averaged)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

/// Compute the simple moving average of `dependent`, pairing each averaged value
/// with the matching entry of `independent`.
///
/// The result always has one record per input sample, in input order.
///
/// # Errors
/// [`MovingAverageError::LengthMismatch`] if the two arrays differ in length.
pub fn moving_average<F: Float>(
    independent: &[F],
    dependent: &[F],
    period: Period,
) -> Result<Vec<SmoothedRecord<F>>, MovingAverageError> {
    if independent.len() != dependent.len() {
        return Err(MovingAverageError::LengthMismatch(
            independent.len(),
            dependent.len(),
        ));
    }

    let averages = MovingAverage::new(period).average_over(dependent.iter().copied());
    Ok(independent
        .iter()
        .zip(averages)
        .map(|(x, averaged)| SmoothedRecord::new(*x, averaged))
        .collect())
}
