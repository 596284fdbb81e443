use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedListTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedListTabulatedFunctionFactory {
    fn create(&self,
              x_values: &[f64],
              y_values: &[f64]) -> TabulatedResult<Box<dyn TabulatedFunction>> {
        let function = LinkedListTabulatedFunction::new(x_values, y_values)?;
        Ok(Box::new(function))
    }
}
