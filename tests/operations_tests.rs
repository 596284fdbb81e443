//! Tests for derived sample sets.
//!
//! ## Test Organization
//!
//! 1. **Tabulated derivative** - Forward differences, replicated last slope, singular grids
//! 2. **Stepping derivative** - Left / right differences of arbitrary functions
//! 3. **Operation service** - Elementwise arithmetic and grid compatibility
//! 4. **Output kind** - The injected factory decides the result's store

use std::sync::Arc;

use approx::assert_relative_eq;

use tabfunc::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabfunc::function::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfunc::function::elementaryfunction::{
    IdentityFunction,
    SqrFunction
};
use tabfunc::function::factory::linkedlisttabulatedfunctionfactory::LinkedListTabulatedFunctionFactory;
use tabfunc::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use tabfunc::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::function::mathfunction::MathFunction;
use tabfunc::function::tabulatedfunction::TabulatedFunction;
use tabfunc::function::tabulatedfunctionerror::{
    GridMismatch,
    TabulatedFunctionError
};
use tabfunc::operations::steppingdifferentialoperator::{
    StepDirection,
    SteppingDifferentialOperator
};
use tabfunc::operations::tabulateddifferentialoperator::TabulatedDifferentialOperator;
use tabfunc::operations::tabulatedfunctionoperationservice::{
    Operation,
    TabulatedFunctionOperationService
};

// ============================================================================
// Helper Functions
// ============================================================================

fn ys(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.iter().map(|pt| pt.y()).collect()
}

fn xs(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.iter().map(|pt| pt.x()).collect()
}

// ============================================================================
// Tabulated Derivative Tests
// ============================================================================

#[test]
fn test_derive_concrete() {
    let function = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
    let derivative = TabulatedDifferentialOperator::default().derive(&function).unwrap();
    assert_eq!(xs(derivative.as_ref()), vec![0.0, 1.0, 2.0]);
    assert_eq!(ys(derivative.as_ref()), vec![1.0, 3.0, 3.0]);
}

/// A linear source differentiates to its slope at every index.
#[test]
fn test_derive_linear_is_constant() {
    let source = |x: f64| 3.5 * x - 2.0;
    let function = LinkedListTabulatedFunction::from_function(&source, -5.0, 5.0, 41).unwrap();
    let derivative = TabulatedDifferentialOperator::default().derive(&function).unwrap();
    assert_eq!(derivative.count(), 41);
    for slope in ys(derivative.as_ref()) {
        assert_relative_eq!(slope, 3.5, epsilon = 1e-9);
    }
}

#[test]
fn test_derive_two_points() {
    let function = LinkedListTabulatedFunction::new(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
    let derivative = TabulatedDifferentialOperator::default().derive(&function).unwrap();
    assert_eq!(ys(derivative.as_ref()), vec![2.0, 2.0]);
}

/// Samples closer than the identity tolerance make a zero-width interval.
#[test]
fn test_derive_singular_interval() {
    let function = ArrayTabulatedFunction::new(&[0.0, 1.0, 1.0 + 1e-13], &[0.0, 1.0, 2.0]).unwrap();
    let result = TabulatedDifferentialOperator::default().derive(&function);
    assert!(matches!(result, Err(TabulatedFunctionError::SingularInterval { index: 1, .. })));
}

#[test]
fn test_derive_synchronously() {
    let function = LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
    let shared = SynchronizedTabulatedFunction::new(function);
    let derivative = TabulatedDifferentialOperator::default().derive_synchronously(&shared).unwrap();
    assert_eq!(ys(derivative.as_ref()), vec![1.0, 3.0, 3.0]);
}

// ============================================================================
// Stepping Derivative Tests
// ============================================================================

#[test]
fn test_stepping_derivative_of_square() {
    let right = SteppingDifferentialOperator::right(0.5).unwrap().derive(SqrFunction);
    let left = SteppingDifferentialOperator::left(0.5).unwrap().derive(SqrFunction);
    // (x + h)^2 - x^2 over h = 2x + h
    assert_relative_eq!(right.apply(3.0), 6.5, epsilon = 1e-12);
    assert_relative_eq!(left.apply(3.0), 5.5, epsilon = 1e-12);
}

#[test]
fn test_stepping_derivative_of_tabulated_function() {
    let function = ArrayTabulatedFunction::from_function(&IdentityFunction, 0.0, 10.0, 11).unwrap();
    let derivative = SteppingDifferentialOperator::right(1e-3).unwrap().derive(function);
    assert_relative_eq!(derivative.apply(4.2), 1.0, epsilon = 1e-9);
    assert_relative_eq!(derivative.apply(-3.0), 1.0, epsilon = 1e-9);
}

#[test]
fn test_stepping_step_validation() {
    assert!(matches!(SteppingDifferentialOperator::left(0.0), Err(TabulatedFunctionError::InvalidStep(_))));
    assert!(matches!(SteppingDifferentialOperator::right(-1.0), Err(TabulatedFunctionError::InvalidStep(_))));
    assert!(SteppingDifferentialOperator::right(f64::NAN).is_err());
    assert!(SteppingDifferentialOperator::right(f64::INFINITY).is_err());

    let mut operator = SteppingDifferentialOperator::new(0.1, StepDirection::Left).unwrap();
    assert!(operator.set_step(0.0).is_err());
    assert_eq!(operator.step(), 0.1);
    operator.set_step(0.25).unwrap();
    assert_eq!(operator.step(), 0.25);
    assert_eq!(operator.direction(), StepDirection::Left);
}

// ============================================================================
// Operation Service Tests
// ============================================================================

#[test]
fn test_sum_concrete() {
    let lhs = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let rhs = LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
    let service = TabulatedFunctionOperationService::default();
    let sum = service.sum(&lhs, &rhs).unwrap();
    assert_eq!(xs(sum.as_ref()), vec![0.0, 1.0, 2.0]);
    assert_eq!(ys(sum.as_ref()), vec![0.0, 3.0, 6.0]);
}

#[test]
fn test_all_operations() {
    let lhs = ArrayTabulatedFunction::new(&[1.0, 2.0, 3.0], &[6.0, 8.0, 9.0]).unwrap();
    let rhs = ArrayTabulatedFunction::new(&[1.0, 2.0, 3.0], &[2.0, 4.0, 3.0]).unwrap();
    let service = TabulatedFunctionOperationService::default();
    assert_eq!(ys(service.subtract(&lhs, &rhs).unwrap().as_ref()), vec![4.0, 4.0, 6.0]);
    assert_eq!(ys(service.multiply(&lhs, &rhs).unwrap().as_ref()), vec![12.0, 32.0, 27.0]);
    assert_eq!(ys(service.divide(&lhs, &rhs).unwrap().as_ref()), vec![3.0, 2.0, 3.0]);
    assert_eq!(Operation::Sum.apply(1.0, 2.0), 3.0);
}

/// Division by zero follows IEEE semantics instead of failing.
#[test]
fn test_divide_by_zero_propagates() {
    let lhs = ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
    let rhs = ArrayTabulatedFunction::new(&[0.0, 1.0], &[0.0, 0.0]).unwrap();
    let quotient = TabulatedFunctionOperationService::default().divide(&lhs, &rhs).unwrap();
    let values = ys(quotient.as_ref());
    assert_eq!(values[0], f64::INFINITY);
    assert!(values[1].is_nan());
}

#[test]
fn test_incompatible_count() {
    let lhs = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0; 3]).unwrap();
    let rhs = ArrayTabulatedFunction::new(&[0.0, 1.0], &[0.0; 2]).unwrap();
    let result = TabulatedFunctionOperationService::default().sum(&lhs, &rhs);
    assert!(matches!(
        result,
        Err(TabulatedFunctionError::InconsistentFunctions(GridMismatch::Count { lhs: 3, rhs: 2 }))
    ));
}

/// Grids may differ by less than 1e-9, which is looser than point identity.
#[test]
fn test_grid_tolerance() {
    let lhs = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0], &[1.0; 3]).unwrap();
    let close = ArrayTabulatedFunction::new(&[0.0, 1.0 + 5e-10, 2.0], &[1.0; 3]).unwrap();
    let far = ArrayTabulatedFunction::new(&[0.0, 1.0 + 1e-8, 2.0], &[1.0; 3]).unwrap();
    let service = TabulatedFunctionOperationService::default();

    let sum = service.sum(&lhs, &close).unwrap();
    assert_eq!(ys(sum.as_ref()), vec![2.0, 2.0, 2.0]);
    assert_eq!(sum.x(1).unwrap(), 1.0);

    assert!(matches!(
        service.sum(&lhs, &far),
        Err(TabulatedFunctionError::InconsistentFunctions(GridMismatch::X { index: 1, .. }))
    ));
}

/// Guarded functions are valid operands.
#[test]
fn test_sum_of_guarded_functions() {
    let lhs = SynchronizedTabulatedFunction::new(ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 2.0]).unwrap());
    let rhs = SynchronizedTabulatedFunction::new(LinkedListTabulatedFunction::new(&[0.0, 1.0], &[3.0, 4.0]).unwrap());
    let sum = TabulatedFunctionOperationService::default().sum(&lhs, &rhs).unwrap();
    assert_eq!(ys(sum.as_ref()), vec![4.0, 6.0]);
}

// ============================================================================
// Output Kind Tests
// ============================================================================

/// A linked factory produces linked stores regardless of the operands' kind.
#[test]
fn test_factory_decides_output_kind() {
    let lhs = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
    let factory: Arc<dyn TabulatedFunctionFactory> = Arc::new(LinkedListTabulatedFunctionFactory);

    let mut service = TabulatedFunctionOperationService::default();
    service.set_factory(Arc::clone(&factory));
    let sum = service.sum(&lhs, &lhs).unwrap();
    assert_eq!(ys(sum.as_ref()), vec![0.0, 2.0, 8.0]);

    let derivative = TabulatedDifferentialOperator::new(factory).derive(&lhs).unwrap();
    assert_eq!(ys(derivative.as_ref()), vec![1.0, 3.0, 3.0]);
}

#[test]
fn test_factory_create_from_function() {
    let factory = LinkedListTabulatedFunctionFactory;
    let function = factory.create_from_function(&SqrFunction, 2.0, -2.0, 5).unwrap();
    assert_eq!(xs(function.as_ref()), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(function.apply(0.5), 0.5);
}
