use std::sync::Arc;

use serde::Deserialize;

use crate::function::factory::arraytabulatedfunctionfactory::ArrayTabulatedFunctionFactory;
use crate::function::factory::linkedlisttabulatedfunctionfactory::LinkedListTabulatedFunctionFactory;
use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunction::{
    self,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedResult;

/// Decides which kind of store a derived or deserialized sample set becomes.
pub trait TabulatedFunctionFactory: Send + Sync {
    fn create(&self,
              x_values: &[f64],
              y_values: &[f64]) -> TabulatedResult<Box<dyn TabulatedFunction>>;

    fn create_from_function(&self,
                            source: &dyn MathFunction,
                            from: f64,
                            to: f64,
                            count: usize) -> TabulatedResult<Box<dyn TabulatedFunction>> {
        let (x_values, y_values) = tabulatedfunction::sample(source, from, to, count)?;
        self.create(&x_values, &y_values)
    }
}

/// Configuration tag for the two built-in factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FactoryType {
    #[default]
    Array,
    LinkedList
}

impl FactoryType {
    pub fn factory(&self) -> Arc<dyn TabulatedFunctionFactory> {
        match self {
            FactoryType::Array => Arc::new(ArrayTabulatedFunctionFactory),
            FactoryType::LinkedList => Arc::new(LinkedListTabulatedFunctionFactory)
        }
    }
}
