use std::fmt;

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Two x (or y) values closer than this are the same sample.
pub const X_TOLERANCE: f64 = 1e-12;

/// Every store keeps at least this many samples, so both boundary segments exist.
pub const MIN_POINT_COUNT: usize = 2;

pub type PointIter<'a> = Box<dyn ExactSizeIterator<Item = Point> + 'a>;

// ─────────────────────────────────────────────────────────────────────────────
// TabulatedFunction
// ─────────────────────────────────────────────────────────────────────────────
//
// Stores implement the storage primitives (count / point / set_y / segments /
// iter); bounds, floor index, extrapolation and interpolation are written once
// below in terms of those primitives.

pub trait TabulatedFunction: MathFunction {
    fn count(&self) -> usize;

    fn point(&self, index: usize) -> TabulatedResult<Point>;

    fn set_y(&mut self, index: usize, value: f64) -> TabulatedResult<()>;

    /// The two samples with the smallest x.
    fn left_segment(&self) -> (Point, Point);

    /// The two samples with the largest x, in ascending order.
    fn right_segment(&self) -> (Point, Point);

    /// Samples `floor_index` and `floor_index + 1`.
    fn bracket(&self, floor_index: usize) -> TabulatedResult<(Point, Point)>;

    /// Ascending-x traversal. Each call starts an independent cursor.
    fn iter(&self) -> PointIter<'_>;

    fn x(&self, index: usize) -> TabulatedResult<f64> {
        self.point(index).map(|pt| pt.x())
    }

    fn y(&self, index: usize) -> TabulatedResult<f64> {
        self.point(index).map(|pt| pt.y())
    }

    fn left_bound(&self) -> f64 {
        self.left_segment().0.x()
    }

    fn right_bound(&self) -> f64 {
        self.right_segment().1.x()
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.iter().position(|pt| (pt.x() - x).abs() < X_TOLERANCE)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.iter().position(|pt| (pt.y() - y).abs() < X_TOLERANCE)
    }

    /// Index `i` with `x[i] <= x < x[i + 1]`.
    ///
    /// Returns `count` past the right bound and the last bracket (`count - 2`)
    /// at the right bound itself. Below the left bound there is no bracket.
    fn floor_index_of_x(&self, x: f64) -> TabulatedResult<usize> {
        let left_bound = self.left_bound();
        if x < left_bound {
            return Err(TabulatedFunctionError::BelowLeftBound { x, left_bound });
        }
        if x > self.right_bound() {
            return Ok(self.count());
        }
        let upper = self.iter()
            .skip(1)
            .position(|pt| x < pt.x());
        Ok(upper.unwrap_or(self.count() - MIN_POINT_COUNT))
    }

    fn extrapolate_left(&self, x: f64) -> f64 {
        let (left, right) = self.left_segment();
        interpolate(x, left.x(), right.x(), left.y(), right.y())
    }

    fn extrapolate_right(&self, x: f64) -> f64 {
        let (left, right) = self.right_segment();
        interpolate(x, left.x(), right.x(), left.y(), right.y())
    }

    /// Linear interpolation on the bracket starting at `floor_index`; `x` must lie inside it.
    fn interpolate_at(&self, x: f64, floor_index: usize) -> TabulatedResult<f64> {
        let (left, right) = self.bracket(floor_index)?;
        if x < left.x() || x > right.x() {
            return Err(TabulatedFunctionError::Interpolation {
                x,
                left_x: left.x(),
                right_x: right.x()
            });
        }
        Ok(interpolate(x, left.x(), right.x(), left.y(), right.y()))
    }

    fn points(&self) -> Vec<Point> {
        self.iter().collect()
    }
}

/// Optional in-place structural mutation.
pub trait MutableTabulatedFunction: TabulatedFunction {
    /// Adds `(x, y)` keeping x ascending; an existing x (within [`X_TOLERANCE`]) only has its y replaced.
    fn insert(&mut self, x: f64, y: f64) -> TabulatedResult<()>;

    /// Fails with `NotEnoughPoints` rather than leave fewer than [`MIN_POINT_COUNT`] samples.
    fn remove(&mut self, index: usize) -> TabulatedResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Boxed stores
// ─────────────────────────────────────────────────────────────────────────────
//
// Factories, operators and readers hand out `Box<dyn TabulatedFunction>`; these
// impls let such a box go wherever a concrete store does, the guard included.

impl MathFunction for Box<dyn TabulatedFunction> {
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

impl TabulatedFunction for Box<dyn TabulatedFunction> {
    fn count(&self) -> usize                                { (**self).count() }
    fn point(&self, index: usize) -> TabulatedResult<Point> { (**self).point(index) }
    fn left_segment(&self) -> (Point, Point)                { (**self).left_segment() }
    fn right_segment(&self) -> (Point, Point)               { (**self).right_segment() }
    fn iter(&self) -> PointIter<'_>                         { (**self).iter() }
    fn x(&self, index: usize) -> TabulatedResult<f64>       { (**self).x(index) }
    fn y(&self, index: usize) -> TabulatedResult<f64>       { (**self).y(index) }
    fn left_bound(&self) -> f64                             { (**self).left_bound() }
    fn right_bound(&self) -> f64                            { (**self).right_bound() }
    fn index_of_x(&self, x: f64) -> Option<usize>           { (**self).index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>           { (**self).index_of_y(y) }
    fn extrapolate_left(&self, x: f64) -> f64               { (**self).extrapolate_left(x) }
    fn extrapolate_right(&self, x: f64) -> f64              { (**self).extrapolate_right(x) }
    fn points(&self) -> Vec<Point>                          { (**self).points() }

    fn set_y(&mut self, index: usize, value: f64) -> TabulatedResult<()> {
        (**self).set_y(index, value)
    }

    fn bracket(&self, floor_index: usize) -> TabulatedResult<(Point, Point)> {
        (**self).bracket(floor_index)
    }

    fn floor_index_of_x(&self, x: f64) -> TabulatedResult<usize> {
        (**self).floor_index_of_x(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> TabulatedResult<f64> {
        (**self).interpolate_at(x, floor_index)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared evaluation
// ─────────────────────────────────────────────────────────────────────────────

pub fn interpolate(x: f64, left_x: f64, right_x: f64, left_y: f64, right_y: f64) -> f64 {
    left_y + (right_y - left_y) * (x - left_x) / (right_x - left_x)
}

/// The evaluation algorithm every store's `MathFunction::apply` forwards to.
pub fn evaluate<T>(function: &T, x: f64) -> f64
where
    T: TabulatedFunction + ?Sized,
{
    if x < function.left_bound() {
        function.extrapolate_left(x)
    } else if x > function.right_bound() {
        function.extrapolate_right(x)
    } else if let Some(pt) = function.iter().find(|pt| (pt.x() - x).abs() < X_TOLERANCE) {
        pt.y()
    } else {
        // first adjacent pair whose right x lies above `x`; NaN falls through to the last pair
        let (left, right) = function.iter()
            .zip(function.iter().skip(1))
            .find(|(_, right)| x < right.x())
            .unwrap_or_else(|| function.right_segment());
        interpolate(x, left.x(), right.x(), left.y(), right.y())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

pub fn check_length_is_the_same(x_values: &[f64], y_values: &[f64]) -> TabulatedResult<()> {
    if x_values.len() != y_values.len() {
        return Err(TabulatedFunctionError::DifferentLengthOfArrays {
            x_len: x_values.len(),
            y_len: y_values.len()
        });
    }
    Ok(())
}

pub fn check_sorted(x_values: &[f64]) -> TabulatedResult<()> {
    if let Some(&x) = x_values.iter().find(|x| !x.is_finite()) {
        return Err(TabulatedFunctionError::NonFiniteCoordinate(x));
    }
    match x_values.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(TabulatedFunctionError::ArrayIsNotSorted { index }),
        None => Ok(())
    }
}

pub fn check_enough_points(count: usize) -> TabulatedResult<()> {
    if count < MIN_POINT_COUNT {
        return Err(TabulatedFunctionError::NotEnoughPoints {
            required: MIN_POINT_COUNT,
            actual: count
        });
    }
    Ok(())
}

pub fn check_index(index: usize, count: usize) -> TabulatedResult<()> {
    if index >= count {
        return Err(TabulatedFunctionError::IndexOutOfBounds { index, count });
    }
    Ok(())
}

/// Everything a constructor checks before copying coordinate arrays.
pub fn validate_coordinates(x_values: &[f64], y_values: &[f64]) -> TabulatedResult<()> {
    check_enough_points(x_values.len())?;
    check_length_is_the_same(x_values, y_values)?;
    check_sorted(x_values)
}

/// Removing one sample from a store of `count` must leave a valid store.
pub fn check_removable(index: usize, count: usize) -> TabulatedResult<()> {
    check_index(index, count)?;
    check_enough_points(count - 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Sampling
// ─────────────────────────────────────────────────────────────────────────────

/// `count` evenly spaced samples of `source` over `[from, to]`; reversed bounds are swapped.
pub fn sample<F>(source: &F, from: f64, to: f64, count: usize) -> TabulatedResult<(Vec<f64>, Vec<f64>)>
where
    F: MathFunction + ?Sized,
{
    check_enough_points(count)?;
    let (start, end) = if from > to { (to, from) } else { (from, to) };
    let step = (end - start) / (count - 1) as f64;
    let x_values: Vec<f64> = (0..count)
        .map(|i| start + i as f64 * step)
        .collect();
    // a zero-width range degenerates to repeated x
    check_sorted(&x_values)?;
    let y_values = x_values.iter()
        .map(|&x| source.apply(x))
        .collect();
    Ok((x_values, y_values))
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

pub fn fmt_points<T>(function: &T, type_name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: TabulatedFunction + ?Sized,
{
    writeln!(f, "{} size = {}", type_name, function.count())?;
    for pt in function.iter() {
        writeln!(f, "[{}; {}]", pt.x(), pt.y())?;
    }
    Ok(())
}
