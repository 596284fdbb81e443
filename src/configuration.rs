use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use serde::Deserialize;

use crate::function::factory::tabulatedfunctionfactory::{
    FactoryType,
    TabulatedFunctionFactory
};
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};
use crate::operations::steppingdifferentialoperator::{
    StepDirection,
    SteppingDifferentialOperator
};
use crate::operations::tabulateddifferentialoperator::TabulatedDifferentialOperator;
use crate::operations::tabulatedfunctionoperationservice::TabulatedFunctionOperationService;

const DEFAULT_DIFFERENTIAL_STEP: f64 = 1e-6;

fn default_differential_step() -> f64 {
    DEFAULT_DIFFERENTIAL_STEP
}

/// Which store kind derived functions become, and the default stepping width.
///
/// ```json
/// { "factory_type": "LinkedList", "differential_step": 0.001 }
/// ```
///
/// Both fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    factory_type: FactoryType,
    #[serde(default = "default_differential_step")]
    differential_step: f64
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            factory_type: FactoryType::default(),
            differential_step: DEFAULT_DIFFERENTIAL_STEP
        }
    }
}

impl Configuration {
    pub fn new(factory_type: FactoryType, differential_step: f64) -> TabulatedResult<Configuration> {
        Configuration { factory_type, differential_step }.validated()
    }

    pub fn from_reader(file_path: &str) -> TabulatedResult<Configuration> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validated()
    }

    pub fn from_json(json_value: serde_json::Value) -> TabulatedResult<Configuration> {
        let configuration: Configuration = serde_json::from_value(json_value)?;
        configuration.validated()
    }

    fn validated(self) -> TabulatedResult<Configuration> {
        if self.differential_step <= 0.0 || !self.differential_step.is_finite() {
            return Err(TabulatedFunctionError::InvalidStep(self.differential_step));
        }
        Ok(self)
    }

    pub fn factory_type(&self) -> FactoryType {
        self.factory_type
    }

    pub fn differential_step(&self) -> f64 {
        self.differential_step
    }

    pub fn factory(&self) -> Arc<dyn TabulatedFunctionFactory> {
        self.factory_type.factory()
    }

    pub fn operation_service(&self) -> TabulatedFunctionOperationService {
        TabulatedFunctionOperationService::new(self.factory())
    }

    pub fn differential_operator(&self) -> TabulatedDifferentialOperator {
        TabulatedDifferentialOperator::new(self.factory())
    }

    pub fn stepping_operator(&self, direction: StepDirection) -> TabulatedResult<SteppingDifferentialOperator> {
        SteppingDifferentialOperator::new(self.differential_step, direction)
    }
}
