use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError
};

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    MutableTabulatedFunction,
    PointIter,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedResult;

/// Thread-safe decorator over any tabulated function.
///
/// # Locking
///
/// Each call takes the instance's single mutex for its own duration, so calls
/// are atomic one by one and nothing spans two calls. Reads serialize with
/// writes and with each other. Multi-step sequences go through
/// [`do_synchronously`](Self::do_synchronously), which holds the lock for the
/// whole closure.
///
/// # Iteration
///
/// `iter()` copies the samples while locked and iterates the copy, so a
/// traversal never blocks writers and never sees a half-applied mutation, but
/// also does not see anything written after it started.
///
/// A poisoned lock is recovered: a panic inside one caller's compound
/// operation does not make the function unusable for the others.
pub struct SynchronizedTabulatedFunction<T> {
    function: Mutex<T>
}

impl<T> SynchronizedTabulatedFunction<T>
where
    T: TabulatedFunction,
{
    pub fn new(function: T) -> SynchronizedTabulatedFunction<T> {
        SynchronizedTabulatedFunction { function: Mutex::new(function) }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.function.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `operation` as one critical section.
    pub fn do_synchronously<R>(&self, operation: impl FnOnce(&mut T) -> R) -> R {
        let mut function = self.lock();
        operation(&mut function)
    }

    pub fn set_y(&self, index: usize, value: f64) -> TabulatedResult<()> {
        self.lock().set_y(index, value)
    }

    /// All samples, copied under the lock.
    pub fn snapshot(&self) -> Vec<Point> {
        self.lock().points()
    }

    /// Iterator over a private copy; it borrows neither the lock nor `self`.
    pub fn snapshot_iter(&self) -> std::vec::IntoIter<Point> {
        self.snapshot().into_iter()
    }

    pub fn into_inner(self) -> T {
        self.function.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> SynchronizedTabulatedFunction<T>
where
    T: MutableTabulatedFunction,
{
    pub fn insert(&self, x: f64, y: f64) -> TabulatedResult<()> {
        self.lock().insert(x, y)
    }

    pub fn remove(&self, index: usize) -> TabulatedResult<()> {
        self.lock().remove(index)
    }
}

impl<T> MathFunction for SynchronizedTabulatedFunction<T>
where
    T: TabulatedFunction,
{
    fn apply(&self, x: f64) -> f64 {
        self.lock().apply(x)
    }
}

impl<T> TabulatedFunction for SynchronizedTabulatedFunction<T>
where
    T: TabulatedFunction,
{
    // ── storage primitives ──────────────────────────────────────────────────

    fn count(&self) -> usize                           { self.lock().count() }
    fn point(&self, index: usize) -> TabulatedResult<Point> { self.lock().point(index) }
    fn left_segment(&self) -> (Point, Point)           { self.lock().left_segment() }
    fn right_segment(&self) -> (Point, Point)          { self.lock().right_segment() }

    fn set_y(&mut self, index: usize, value: f64) -> TabulatedResult<()> {
        self.function
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .set_y(index, value)
    }

    fn bracket(&self, floor_index: usize) -> TabulatedResult<(Point, Point)> {
        self.lock().bracket(floor_index)
    }

    fn iter(&self) -> PointIter<'_> {
        Box::new(self.snapshot_iter())
    }

    // ── shared algorithm: one lock per call instead of one per primitive ────

    fn x(&self, index: usize) -> TabulatedResult<f64>  { self.lock().x(index) }
    fn y(&self, index: usize) -> TabulatedResult<f64>  { self.lock().y(index) }
    fn left_bound(&self) -> f64                        { self.lock().left_bound() }
    fn right_bound(&self) -> f64                       { self.lock().right_bound() }
    fn index_of_x(&self, x: f64) -> Option<usize>      { self.lock().index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>      { self.lock().index_of_y(y) }
    fn extrapolate_left(&self, x: f64) -> f64          { self.lock().extrapolate_left(x) }
    fn extrapolate_right(&self, x: f64) -> f64         { self.lock().extrapolate_right(x) }
    fn points(&self) -> Vec<Point>                     { self.snapshot() }

    fn floor_index_of_x(&self, x: f64) -> TabulatedResult<usize> {
        self.lock().floor_index_of_x(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> TabulatedResult<f64> {
        self.lock().interpolate_at(x, floor_index)
    }
}
