use crate::function::mathfunction::MathFunction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFunction {
    constant: f64
}

impl ConstantFunction {
    pub fn new(constant: f64) -> ConstantFunction {
        ConstantFunction { constant }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl MathFunction for ConstantFunction {
    fn apply(&self, _x: f64) -> f64 {
        self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroFunction;

impl MathFunction for ZeroFunction {
    fn apply(&self, _x: f64) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitFunction;

impl MathFunction for UnitFunction {
    fn apply(&self, _x: f64) -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentityFunction;

impl MathFunction for IdentityFunction {
    fn apply(&self, x: f64) -> f64 {
        x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrFunction;

impl MathFunction for SqrFunction {
    fn apply(&self, x: f64) -> f64 {
        x * x
    }
}
