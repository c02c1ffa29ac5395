//! Method Dispatcher - Maps a method identifier to its engine.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

use super::methods::{
    AhpEngine, ElectreEngine, ElectreThresholds, MooraEngine, PreferenceFunction,
    PrometheeEngine, SawEngine, TopsisEngine, VikorEngine, WpEngine, WpNormalization, DEFAULT_V,
};
use super::{CalculationEngine, CalculationError, CalculationResult, DecisionProblem, Method};

/// Tunable parameters of the methods that have any.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodOptions {
    /// WP normalization strategy.
    #[serde(default)]
    pub wp_normalization: WpNormalization,

    /// Explicit AHP criteria comparison matrix.
    #[serde(default)]
    pub ahp_pairwise: Option<Vec<Vec<f64>>>,

    /// Fixed ELECTRE thresholds; unset values use the mean index.
    #[serde(default)]
    pub electre_thresholds: ElectreThresholds,

    /// PROMETHEE preference function.
    #[serde(default)]
    pub promethee_preference: PreferenceFunction,

    /// VIKOR balancing parameter.
    #[serde(default = "default_vikor_v")]
    pub vikor_v: f64,
}

fn default_vikor_v() -> f64 {
    DEFAULT_V
}

impl Default for MethodOptions {
    fn default() -> Self {
        Self {
            wp_normalization: WpNormalization::default(),
            ahp_pairwise: None,
            electre_thresholds: ElectreThresholds::default(),
            promethee_preference: PreferenceFunction::default(),
            vikor_v: default_vikor_v(),
        }
    }
}

/// Builds the engine for `method`.
///
/// The match is exhaustive, so adding a method without an engine fails to compile.
fn build_engine(
    method: Method,
    options: &MethodOptions,
) -> Result<Arc<dyn CalculationEngine>, CalculationError> {
    let engine: Arc<dyn CalculationEngine> = match method {
        Method::Saw => Arc::new(SawEngine),
        Method::Wp => Arc::new(WpEngine::new(options.wp_normalization)),
        Method::Topsis => Arc::new(TopsisEngine),
        Method::Ahp => match &options.ahp_pairwise {
            Some(matrix) => Arc::new(AhpEngine::with_pairwise(matrix.clone())?),
            None => Arc::new(AhpEngine::new()),
        },
        Method::Electre => Arc::new(ElectreEngine::new(options.electre_thresholds)?),
        Method::Promethee => Arc::new(PrometheeEngine::new(options.promethee_preference)?),
        Method::Moora => Arc::new(MooraEngine),
        Method::Vikor => Arc::new(VikorEngine::new(options.vikor_v)?),
    };
    Ok(engine)
}

/// Lookup table from method to engine.
///
/// Engines are shared behind `Arc` so a lookup can be moved onto a worker thread.
#[derive(Clone)]
pub struct EngineRegistry {
    engines: HashMap<Method, Arc<dyn CalculationEngine>>,
}

impl EngineRegistry {
    /// Creates a registry with every method configured from `options`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if any option is out of range.
    pub fn new(options: &MethodOptions) -> Result<Self, CalculationError> {
        let mut registry = Self::empty();
        for method in Method::ALL {
            registry.register(build_engine(method, options)?);
        }
        Ok(registry)
    }

    /// Creates a registry with no engines.
    pub fn empty() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    /// Registers an engine under its own method, replacing any previous one.
    pub fn register(&mut self, engine: Arc<dyn CalculationEngine>) {
        self.engines.insert(engine.method(), engine);
    }

    /// Returns the engine for `method`.
    ///
    /// # Errors
    /// `UnsupportedMethod` if nothing is registered for it.
    pub fn get_engine(&self, method: Method) -> Result<Arc<dyn CalculationEngine>, CalculationError> {
        self.engines
            .get(&method)
            .cloned()
            .ok_or(CalculationError::UnsupportedMethod(method))
    }

    /// Runs `method` on `problem`.
    pub fn calculate(
        &self,
        method: Method,
        problem: &DecisionProblem,
    ) -> Result<CalculationResult, CalculationError> {
        Ok(self.get_engine(method)?.calculate(problem))
    }

    /// Methods that currently have an engine.
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .iter()
            .copied()
            .filter(|m| self.engines.contains_key(m))
            .collect()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        match Self::new(&MethodOptions::default()) {
            Ok(registry) => registry,
            Err(err) => {
                error!(error = %err, "default method options rejected, registry is empty");
                Self::empty()
            }
        }
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

/// Returns the default-configured engine for `method`.
pub fn get_engine(method: Method) -> Result<Arc<dyn CalculationEngine>, CalculationError> {
    build_engine(method, &MethodOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::CriterionType;

    #[test]
    fn default_registry_serves_every_method() {
        let registry = EngineRegistry::default();
        assert_eq!(registry.methods(), Method::ALL.to_vec());
        for method in Method::ALL {
            assert_eq!(registry.get_engine(method).unwrap().method(), method);
        }
    }

    #[test]
    fn default_options_build_every_engine() {
        let registry = EngineRegistry::new(&MethodOptions::default()).unwrap();
        assert_eq!(registry.methods(), Method::ALL.to_vec());
        assert_eq!(registry.methods(), EngineRegistry::default().methods());
    }

    #[test]
    fn free_lookup_matches_method() {
        for method in Method::ALL {
            assert_eq!(get_engine(method).unwrap().method(), method);
        }
    }

    #[test]
    fn empty_registry_reports_unsupported_method() {
        let registry = EngineRegistry::empty();
        let err = registry.get_engine(Method::Topsis).err().unwrap();
        assert_eq!(err, CalculationError::UnsupportedMethod(Method::Topsis));
    }

    #[test]
    fn register_adds_single_method() {
        let mut registry = EngineRegistry::empty();
        registry.register(Arc::new(SawEngine));
        assert_eq!(registry.methods(), vec![Method::Saw]);
        assert!(registry.get_engine(Method::Wp).is_err());
    }

    #[test]
    fn invalid_options_rejected() {
        let options = MethodOptions {
            vikor_v: 2.0,
            ..MethodOptions::default()
        };
        assert!(matches!(
            EngineRegistry::new(&options),
            Err(CalculationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn calculate_dispatches_to_selected_method() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion("Quality", 1.0, CriterionType::Benefit)
            .row(vec![1.0])
            .row(vec![2.0])
            .build();

        let registry = EngineRegistry::new(&MethodOptions::default()).unwrap();
        let result = registry.calculate(Method::Moora, &problem).unwrap();
        assert_eq!(result.method, Method::Moora);
        assert_eq!(result.ranking[0].alternative, "B");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: MethodOptions = serde_json::from_str(r#"{"vikor_v": 0.3}"#).unwrap();
        assert_eq!(options.vikor_v, 0.3);
        assert_eq!(options.wp_normalization, WpNormalization::ColumnMax);
        assert_eq!(options.promethee_preference, PreferenceFunction::Linear { p: 1.0 });
    }
}
