use std::sync::Arc;

use crate::function::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::point::Point;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::{
    GridMismatch,
    TabulatedFunctionError,
    TabulatedResult
};

/// Two grids are aligned when every pair of x values is closer than this.
/// Kept separate from the point-identity tolerance `X_TOLERANCE`.
pub const GRID_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sum,
    Subtract,
    Multiply,
    Divide
}

impl Operation {
    /// IEEE semantics throughout: dividing by zero yields an infinity or NaN.
    pub fn apply(&self, u: f64, v: f64) -> f64 {
        match self {
            Operation::Sum => u + v,
            Operation::Subtract => u - v,
            Operation::Multiply => u * v,
            Operation::Divide => u / v
        }
    }
}

/// Elementwise arithmetic on two sample sets sharing one grid.
pub struct TabulatedFunctionOperationService {
    factory: Arc<dyn TabulatedFunctionFactory>
}

impl TabulatedFunctionOperationService {
    pub fn new(factory: Arc<dyn TabulatedFunctionFactory>) -> TabulatedFunctionOperationService {
        TabulatedFunctionOperationService { factory }
    }

    pub fn factory(&self) -> &Arc<dyn TabulatedFunctionFactory> {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: Arc<dyn TabulatedFunctionFactory>) {
        self.factory = factory;
    }

    pub fn as_points<T>(function: &T) -> Vec<Point>
    where
        T: TabulatedFunction + ?Sized,
    {
        function.points()
    }

    pub fn combine<A, B>(&self,
                         lhs: &A,
                         rhs: &B,
                         operation: Operation) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        let lhs_points = Self::as_points(lhs);
        let rhs_points = Self::as_points(rhs);
        if lhs_points.len() != rhs_points.len() {
            return Err(TabulatedFunctionError::InconsistentFunctions(GridMismatch::Count {
                lhs: lhs_points.len(),
                rhs: rhs_points.len()
            }));
        }

        let mut x_values = Vec::with_capacity(lhs_points.len());
        let mut y_values = Vec::with_capacity(lhs_points.len());
        for (index, (l, r)) in lhs_points.iter().zip(&rhs_points).enumerate() {
            // negated so that a NaN distance also counts as misaligned
            if !((l.x() - r.x()).abs() < GRID_TOLERANCE) {
                return Err(TabulatedFunctionError::InconsistentFunctions(GridMismatch::X {
                    index,
                    lhs: l.x(),
                    rhs: r.x()
                }));
            }
            x_values.push(l.x());
            y_values.push(operation.apply(l.y(), r.y()));
        }
        self.factory.create(&x_values, &y_values)
    }

    pub fn sum<A, B>(&self, lhs: &A, rhs: &B) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(lhs, rhs, Operation::Sum)
    }

    pub fn subtract<A, B>(&self, lhs: &A, rhs: &B) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(lhs, rhs, Operation::Subtract)
    }

    pub fn multiply<A, B>(&self, lhs: &A, rhs: &B) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(lhs, rhs, Operation::Multiply)
    }

    pub fn divide<A, B>(&self, lhs: &A, rhs: &B) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(lhs, rhs, Operation::Divide)
    }
}

impl Default for TabulatedFunctionOperationService {
    fn default() -> Self {
        TabulatedFunctionOperationService::new(Arc::new(ArrayTabulatedFunctionFactory))
    }
}
