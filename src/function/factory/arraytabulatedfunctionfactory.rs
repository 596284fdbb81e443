use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    fn create(&self,
              x_values: &[f64],
              y_values: &[f64]) -> TabulatedResult<Box<dyn TabulatedFunction>> {
        let function = ArrayTabulatedFunction::new(x_values, y_values)?;
        Ok(Box::new(function))
    }
}
