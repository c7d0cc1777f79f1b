//! Schedule orchestration: cycle check, resolution, selection, capacity.
//!
//! A run is a pure function of (tasks, capacity, config). Identical inputs give
//! identical results and concurrent runs share nothing.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::capacity::{optimize, optimize_dependency_closed, to_tenths, CapacityError};
use crate::config::{KnapsackStrategy, SchedulingConfig};
use crate::cycle::{detect_cycle, Cycle};
use crate::models::{AnnotatedTask, ResolvedTask, SelectionResult, Task, TaskId};
use crate::resolver::resolve;
use crate::selector::select;
use crate::{log_changes, log_checks, log_debug};

/// Errors that abort a scheduling run. No partial result accompanies them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Circular dependency detected: {0}")]
    CyclicDependency(Cycle),
    #[error("Unknown knapsack strategy: {0}")]
    UnknownStrategy(String),
    #[error("Too many tasks for dependency-closed optimization: {count} (limit {limit})")]
    TooManyTasks { count: usize, limit: usize },
}

impl From<CapacityError> for ScheduleError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::TooManyTasks { count, limit } => {
                ScheduleError::TooManyTasks { count, limit }
            }
        }
    }
}

/// Run the full pipeline with the default configuration.
///
/// # Arguments
/// * `tasks` - Validated tasks (unique ids, `start_time < finish_time`, profit >= 0)
/// * `capacity` - Total hours of work that may be selected
///
/// # Returns
/// * `Ok(SelectionResult)` with the final selection and metrics
/// * `Err(ScheduleError::CyclicDependency)` if the dependencies form a cycle
pub fn run(tasks: &[Task], capacity: f64) -> Result<SelectionResult, ScheduleError> {
    run_with_config(tasks, capacity, &SchedulingConfig::default())
}

/// Run the full pipeline.
///
/// Stages:
/// 1. Reject cyclic dependency graphs
/// 2. Resolve earliest dependency-consistent start times
/// 3. Greedily select non-overlapping tasks by finish time
/// 4. Maximize profit within `capacity` over that selection
/// 5. Aggregate totals and flag every input task as selected or not
pub fn run_with_config(
    tasks: &[Task],
    capacity: f64,
    config: &SchedulingConfig,
) -> Result<SelectionResult, ScheduleError> {
    let verbosity = config.verbosity;
    let strategy = config
        .strategy()
        .map_err(ScheduleError::UnknownStrategy)?;

    if let Some(cycle) = detect_cycle(tasks) {
        log_changes!(verbosity, "Aborting: circular dependency {}", cycle);
        return Err(ScheduleError::CyclicDependency(cycle));
    }

    let resolved = resolve(tasks);
    log_changes!(verbosity, "Resolved {} tasks", resolved.len());
    for task in &resolved {
        if task.optimal_start > task.task.start_time {
            log_checks!(
                verbosity,
                "  Task {} delayed by dependencies: {} -> {}",
                task.task.id,
                task.task.start_time,
                task.optimal_start
            );
        }
    }

    let candidates = select(&resolved);
    log_changes!(
        verbosity,
        "Activity selection kept {} of {} tasks",
        candidates.len(),
        resolved.len()
    );
    log_dropped(verbosity, "overlap", &resolved, &candidates);

    log_debug!(
        verbosity,
        "Capacity stage: {:?}, {} candidates, {} tenths of capacity",
        strategy,
        candidates.len(),
        to_tenths(capacity)
    );
    let selected = match strategy {
        KnapsackStrategy::Standard => optimize(&candidates, capacity),
        KnapsackStrategy::DependencyClosed => {
            optimize_dependency_closed(&candidates, capacity, config.max_closed_tasks)?
        }
    };
    log_dropped(verbosity, "capacity", &candidates, &selected);

    let result = build_result(tasks, selected, capacity);
    log_changes!(
        verbosity,
        "Selected {} tasks: profit {}, duration {}h of {}h",
        result.selected_tasks.len(),
        result.total_profit,
        result.total_duration,
        capacity
    );

    Ok(result)
}

fn log_dropped(verbosity: u8, reason: &str, before: &[ResolvedTask], after: &[ResolvedTask]) {
    if verbosity < crate::logging::VERBOSITY_CHECKS {
        return;
    }
    let kept: FxHashSet<TaskId> = after.iter().map(|t| t.task.id).collect();
    for task in before.iter().filter(|t| !kept.contains(&t.task.id)) {
        log_checks!(verbosity, "  Dropped task {} ({})", task.task.id, reason);
    }
}

/// Compute totals over the final selection and annotate the input tasks.
fn build_result(tasks: &[Task], selected: Vec<ResolvedTask>, capacity: f64) -> SelectionResult {
    let total_duration: f64 = selected.iter().map(|t| t.task.duration()).sum();
    let total_profit: f64 = selected.iter().map(|t| t.task.profit).sum();
    let efficiency = if total_duration > 0.0 {
        total_profit / total_duration
    } else {
        0.0
    };

    let selected_ids: FxHashSet<TaskId> = selected.iter().map(|t| t.task.id).collect();
    let all_tasks = tasks
        .iter()
        .map(|task| AnnotatedTask {
            task: task.clone(),
            selected: selected_ids.contains(&task.id),
        })
        .collect();

    SelectionResult {
        selected_tasks: selected,
        all_tasks,
        total_duration,
        total_profit,
        efficiency,
        capacity,
    }
}
