use std::sync::Arc;

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::tabulatedfunction::{
    self,
    TabulatedFunction,
    X_TOLERANCE
};
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};
use crate::operations::tabulatedfunctionoperationservice::TabulatedFunctionOperationService;

/// Forward-difference derivative of a sample set.
///
/// The result keeps the source grid. Sample `i` holds the slope of segment
/// `[i, i + 1]`, and the last sample repeats the last slope because no forward
/// segment exists there. The kind of store returned is decided by the factory.
pub struct TabulatedDifferentialOperator {
    factory: Arc<dyn TabulatedFunctionFactory>
}

impl TabulatedDifferentialOperator {
    pub fn new(factory: Arc<dyn TabulatedFunctionFactory>) -> TabulatedDifferentialOperator {
        TabulatedDifferentialOperator { factory }
    }

    pub fn factory(&self) -> &Arc<dyn TabulatedFunctionFactory> {
        &self.factory
    }

    pub fn set_factory(&mut self, factory: Arc<dyn TabulatedFunctionFactory>) {
        self.factory = factory;
    }

    pub fn derive<T>(&self, function: &T) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        T: TabulatedFunction + ?Sized,
    {
        let points = TabulatedFunctionOperationService::as_points(function);
        tabulatedfunction::check_enough_points(points.len())?;

        let x_values: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
        let mut y_values = Vec::with_capacity(points.len());
        for (index, pair) in points.windows(2).enumerate() {
            let distance = pair[1].x() - pair[0].x();
            if distance.abs() < X_TOLERANCE {
                return Err(TabulatedFunctionError::SingularInterval { index, distance });
            }
            y_values.push((pair[1].y() - pair[0].y()) / distance);
        }
        let last_slope = y_values[y_values.len() - 1];
        y_values.push(last_slope);

        self.factory.create(&x_values, &y_values)
    }

    /// Derives while holding the guard's lock for the whole read.
    pub fn derive_synchronously<T>(&self,
                                   function: &SynchronizedTabulatedFunction<T>) -> TabulatedResult<Box<dyn TabulatedFunction>>
    where
        T: TabulatedFunction,
    {
        function.do_synchronously(|inner| self.derive(&*inner))
    }
}

impl Default for TabulatedDifferentialOperator {
    fn default() -> Self {
        TabulatedDifferentialOperator::new(Arc::new(ArrayTabulatedFunctionFactory))
    }
}
