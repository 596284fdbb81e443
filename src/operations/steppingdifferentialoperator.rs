use serde::Deserialize;

use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StepDirection {
    /// `(f(x) - f(x - h)) / h`
    Left,
    /// `(f(x + h) - f(x)) / h`
    Right
}

/// Finite-difference derivative of an arbitrary function with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    step: f64,
    direction: StepDirection
}

fn check_step(step: f64) -> TabulatedResult<()> {
    if step <= 0.0 || !step.is_finite() {
        return Err(TabulatedFunctionError::InvalidStep(step));
    }
    Ok(())
}

impl SteppingDifferentialOperator {
    pub fn new(step: f64, direction: StepDirection) -> TabulatedResult<SteppingDifferentialOperator> {
        check_step(step)?;
        Ok(SteppingDifferentialOperator { step, direction })
    }

    pub fn left(step: f64) -> TabulatedResult<SteppingDifferentialOperator> {
        Self::new(step, StepDirection::Left)
    }

    pub fn right(step: f64) -> TabulatedResult<SteppingDifferentialOperator> {
        Self::new(step, StepDirection::Right)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    pub fn set_step(&mut self, step: f64) -> TabulatedResult<()> {
        check_step(step)?;
        self.step = step;
        Ok(())
    }

    pub fn derive<F>(&self, function: F) -> SteppingDerivative<F>
    where
        F: MathFunction,
    {
        SteppingDerivative {
            function,
            step: self.step,
            direction: self.direction
        }
    }
}

pub struct SteppingDerivative<F> {
    function: F,
    step: f64,
    direction: StepDirection
}

impl<F> SteppingDerivative<F> {
    pub fn function(&self) -> &F {
        &self.function
    }
}

impl<F> MathFunction for SteppingDerivative<F>
where
    F: MathFunction,
{
    fn apply(&self, x: f64) -> f64 {
        let h = self.step;
        match self.direction {
            StepDirection::Left => (self.function.apply(x) - self.function.apply(x - h)) / h,
            StepDirection::Right => (self.function.apply(x + h) - self.function.apply(x)) / h
        }
    }
}
