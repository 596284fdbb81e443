use std::fmt;

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    self,
    MutableTabulatedFunction,
    PointIter,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};

/// Tabulated function over two parallel slabs.
///
/// Only the first `count` slots of each slab are samples; the rest is spare
/// capacity left behind by growth or removal and is never read.
#[derive(Debug, Clone)]
pub struct ArrayTabulatedFunction {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    count: usize
}

impl ArrayTabulatedFunction {
    /// Copies validated coordinate arrays.
    pub fn new(x_values: &[f64], y_values: &[f64]) -> TabulatedResult<ArrayTabulatedFunction> {
        tabulatedfunction::validate_coordinates(x_values, y_values)?;
        Ok(ArrayTabulatedFunction {
            x_values: x_values.to_vec(),
            y_values: y_values.to_vec(),
            count: x_values.len()
        })
    }

    pub fn from_function<F>(source: &F, from: f64, to: f64, count: usize) -> TabulatedResult<ArrayTabulatedFunction>
    where
        F: MathFunction + ?Sized,
    {
        let (x_values, y_values) = tabulatedfunction::sample(source, from, to, count)?;
        Ok(ArrayTabulatedFunction { x_values, y_values, count })
    }

    /// Number of slots in each slab, samples included.
    pub fn capacity(&self) -> usize {
        self.x_values.len()
    }

    fn grow(&mut self) {
        let new_capacity = self.count + self.count / 2 + 1;
        self.x_values.resize(new_capacity, 0.0);
        self.y_values.resize(new_capacity, 0.0);
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        tabulatedfunction::evaluate(self, x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn point(&self, index: usize) -> TabulatedResult<Point> {
        tabulatedfunction::check_index(index, self.count)?;
        Ok(Point::new(self.x_values[index], self.y_values[index]))
    }

    fn set_y(&mut self, index: usize, value: f64) -> TabulatedResult<()> {
        tabulatedfunction::check_index(index, self.count)?;
        self.y_values[index] = value;
        Ok(())
    }

    fn left_segment(&self) -> (Point, Point) {
        (
            Point::new(self.x_values[0], self.y_values[0]),
            Point::new(self.x_values[1], self.y_values[1])
        )
    }

    fn right_segment(&self) -> (Point, Point) {
        let last = self.count - 1;
        (
            Point::new(self.x_values[last - 1], self.y_values[last - 1]),
            Point::new(self.x_values[last], self.y_values[last])
        )
    }

    fn bracket(&self, floor_index: usize) -> TabulatedResult<(Point, Point)> {
        tabulatedfunction::check_index(floor_index + 1, self.count)?;
        Ok((
            Point::new(self.x_values[floor_index], self.y_values[floor_index]),
            Point::new(self.x_values[floor_index + 1], self.y_values[floor_index + 1])
        ))
    }

    fn iter(&self) -> PointIter<'_> {
        let iter = self.x_values[..self.count]
            .iter()
            .zip(&self.y_values[..self.count])
            .map(|(&x, &y)| Point::new(x, y));
        Box::new(iter)
    }

    fn left_bound(&self) -> f64 {
        self.x_values[0]
    }

    fn right_bound(&self) -> f64 {
        self.x_values[self.count - 1]
    }
}

impl MutableTabulatedFunction for ArrayTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> TabulatedResult<()> {
        if !x.is_finite() {
            return Err(TabulatedFunctionError::NonFiniteCoordinate(x));
        }
        if let Some(index) = self.index_of_x(x) {
            self.y_values[index] = y;
            return Ok(());
        }

        let insert_index = self.x_values[..self.count]
            .iter()
            .position(|&xi| xi >= x)
            .unwrap_or(self.count);
        if self.count == self.capacity() {
            self.grow();
        }
        self.x_values.copy_within(insert_index..self.count, insert_index + 1);
        self.y_values.copy_within(insert_index..self.count, insert_index + 1);
        self.x_values[insert_index] = x;
        self.y_values[insert_index] = y;
        self.count += 1;
        Ok(())
    }

    fn remove(&mut self, index: usize) -> TabulatedResult<()> {
        tabulatedfunction::check_removable(index, self.count)?;
        self.x_values.copy_within((index + 1)..self.count, index);
        self.y_values.copy_within((index + 1)..self.count, index);
        self.count -= 1;
        Ok(())
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        tabulatedfunction::fmt_points(self, "ArrayTabulatedFunction", f)
    }
}
