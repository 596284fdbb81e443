/// A real function of one real argument.
///
/// Every tabulated store implements this, as does any `Fn(f64) -> f64`, so
/// samplers and stepping derivatives accept either.
pub trait MathFunction: Send + Sync {
    fn apply(&self, x: f64) -> f64;

    /// `self` first, then `after`: `x -> after(self(x))`.
    fn and_then<G>(self, after: G) -> CompositeFunction<Self, G>
    where
        Self: Sized,
        G: MathFunction,
    {
        CompositeFunction::new(self, after)
    }
}

impl<F> MathFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn apply(&self, x: f64) -> f64 {
        self(x)
    }
}

pub struct CompositeFunction<F, G> {
    first_function: F,
    second_function: G
}

impl<F, G> CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    pub fn new(first_function: F, second_function: G) -> CompositeFunction<F, G> {
        CompositeFunction { first_function, second_function }
    }

    pub fn first_function(&self) -> &F {
        &self.first_function
    }

    pub fn second_function(&self) -> &G {
        &self.second_function
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    fn apply(&self, x: f64) -> f64 {
        self.second_function.apply(self.first_function.apply(x))
    }
}
