//! Profit-maximizing task selection and timetabling.
//!
//! Picks a non-overlapping, dependency-consistent subset of tasks whose total
//! duration fits a work-capacity budget, in four stages:
//! 1. Cycle detection over the dependency graph
//! 2. Earliest-start resolution honoring dependency finish times
//! 3. Greedy activity selection by finish time
//! 4. 0/1 knapsack over the selection to maximize profit within capacity
//!
//! The stages are exposed to Rust directly and to Python through the `rust` module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::Utc;
use pyo3::prelude::*;

pub mod capacity;
mod config;
pub mod cycle;
pub mod logging;
mod models;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod selector;

pub use capacity::{
    optimize, optimize_dependency_closed, to_tenths, weight_tenths, CapacityError,
};
pub use config::{KnapsackStrategy, SchedulingConfig};
pub use cycle::{detect_cycle, Cycle};
pub use models::{
    AnnotatedTask, Priority, ResolvedTask, ScheduleMetrics, SelectionResult, Task, TaskId,
};
pub use pipeline::{run, run_with_config, ScheduleError};
pub use report::{ReportSummary, ScheduleReport};
pub use resolver::resolve;
pub use selector::select;

/// Select and timetable the most profitable feasible subset of tasks.
///
/// # Arguments
/// * `tasks` - Validated tasks
/// * `capacity` - Total hours of work that may be selected
/// * `config` - Optional scheduling configuration (defaults apply when omitted)
///
/// # Returns
/// * SelectionResult with the final selection, annotated tasks, and totals
///
/// # Raises
/// * ValueError if a circular dependency is detected or the configuration is invalid
#[pyfunction]
#[pyo3(signature = (tasks, capacity, config=None))]
fn optimize_schedule(
    tasks: Vec<Task>,
    capacity: f64,
    config: Option<SchedulingConfig>,
) -> PyResult<SelectionResult> {
    let config = config.unwrap_or_default();

    match run_with_config(&tasks, capacity, &config) {
        Ok(result) => Ok(result),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Find a dependency cycle among the tasks.
///
/// # Returns
/// * List of task IDs forming the cycle (first equals last), or None if acyclic
#[pyfunction]
#[pyo3(name = "detect_cycle")]
fn py_detect_cycle(tasks: Vec<Task>) -> Option<Vec<TaskId>> {
    detect_cycle(&tasks).map(|cycle| cycle.0)
}

/// Render a result as the JSON export document, stamped with the current time.
///
/// # Raises
/// * ValueError if serialization fails
#[pyfunction]
fn export_report(result: SelectionResult) -> PyResult<String> {
    ScheduleReport::new(&result, Utc::now())
        .to_json()
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The profit scheduler Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Priority>()?;
    m.add_class::<Task>()?;
    m.add_class::<ResolvedTask>()?;
    m.add_class::<AnnotatedTask>()?;
    m.add_class::<SelectionResult>()?;
    m.add_class::<ScheduleMetrics>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(optimize_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_detect_cycle, m)?)?;
    m.add_function(wrap_pyfunction!(export_report, m)?)?;

    Ok(())
}
