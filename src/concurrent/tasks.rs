use std::sync::Arc;

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedResult;

// ─────────────────────────────────────────────────────────────────────────────
// Worker tasks over a shared function
// ─────────────────────────────────────────────────────────────────────────────
//
// Each task walks the samples by index and takes the lock once per index, so
// tasks running on different threads interleave between indices but never
// inside one read-modify-write.

/// Doubles every y value.
pub struct MultiplyingTask<T> {
    function: Arc<SynchronizedTabulatedFunction<T>>
}

impl<T> MultiplyingTask<T>
where
    T: TabulatedFunction,
{
    pub fn new(function: Arc<SynchronizedTabulatedFunction<T>>) -> MultiplyingTask<T> {
        MultiplyingTask { function }
    }

    /// Returns the number of samples updated.
    pub fn run(&self) -> TabulatedResult<usize> {
        let count = self.function.count();
        for index in 0..count {
            self.function.do_synchronously(|function| {
                let y = function.y(index)?;
                function.set_y(index, 2.0 * y)
            })?;
        }
        Ok(count)
    }
}

/// Overwrites every y value with a constant.
pub struct WriteTask<T> {
    function: Arc<SynchronizedTabulatedFunction<T>>,
    value: f64
}

impl<T> WriteTask<T>
where
    T: TabulatedFunction,
{
    pub fn new(function: Arc<SynchronizedTabulatedFunction<T>>, value: f64) -> WriteTask<T> {
        WriteTask { function, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn run(&self) -> TabulatedResult<usize> {
        let count = self.function.count();
        for index in 0..count {
            self.function.set_y(index, self.value)?;
        }
        Ok(count)
    }
}

/// Reads every sample, one locked read per index.
pub struct ReadTask<T> {
    function: Arc<SynchronizedTabulatedFunction<T>>
}

impl<T> ReadTask<T>
where
    T: TabulatedFunction,
{
    pub fn new(function: Arc<SynchronizedTabulatedFunction<T>>) -> ReadTask<T> {
        ReadTask { function }
    }

    pub fn run(&self) -> TabulatedResult<Vec<Point>> {
        (0..self.function.count())
            .map(|index| self.function.point(index))
            .collect()
    }
}
