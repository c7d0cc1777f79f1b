//! Configuration types for the optimization pipeline.

use pyo3::prelude::*;
use std::str::FromStr;

/// How the capacity stage chooses among the greedy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnapsackStrategy {
    /// 0/1 knapsack DP over durations in tenths of an hour.
    Standard,
    /// Exhaustive search keeping the selection closed under dependencies.
    DependencyClosed,
}

impl FromStr for KnapsackStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "dependency_closed" => Ok(Self::DependencyClosed),
            other => Err(other.to_string()),
        }
    }
}

/// Configuration for a scheduling run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Capacity strategy: "standard" or "dependency_closed"
    #[pyo3(get, set)]
    pub knapsack_strategy: String,
    /// Largest candidate set the "dependency_closed" strategy will search
    #[pyo3(get, set)]
    pub max_closed_tasks: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            knapsack_strategy: "standard".to_string(),
            max_closed_tasks: 20,
        }
    }
}

impl SchedulingConfig {
    /// Parse the configured knapsack strategy.
    ///
    /// Returns the unrecognized name on failure.
    pub fn strategy(&self) -> Result<KnapsackStrategy, String> {
        self.knapsack_strategy.parse()
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, knapsack_strategy=None, max_closed_tasks=None))]
    fn new(
        verbosity: Option<u8>,
        knapsack_strategy: Option<String>,
        max_closed_tasks: Option<usize>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            knapsack_strategy: knapsack_strategy.unwrap_or(defaults.knapsack_strategy),
            max_closed_tasks: max_closed_tasks.unwrap_or(defaults.max_closed_tasks),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(verbosity={}, knapsack_strategy={:?}, max_closed_tasks={})",
            self.verbosity, self.knapsack_strategy, self.max_closed_tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulingConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.strategy(), Ok(KnapsackStrategy::Standard));
        assert_eq!(config.max_closed_tasks, 20);
    }

    #[test]
    fn test_strategy_parsing() {
        let mut config = SchedulingConfig {
            knapsack_strategy: "dependency_closed".to_string(),
            ..Default::default()
        };
        assert_eq!(config.strategy(), Ok(KnapsackStrategy::DependencyClosed));

        config.knapsack_strategy = "fractional".to_string();
        assert_eq!(config.strategy(), Err("fractional".to_string()));
    }
}
