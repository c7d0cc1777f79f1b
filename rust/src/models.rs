//! Core data types for the profit scheduler.
//!
//! All times are in hours relative to the start of the planning window (t=0).

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Task identifier supplied by the input layer (positive, unique per run).
pub type TaskId = u32;

/// Display priority of a task. Does not influence the optimization stages.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A task offered for scheduling.
///
/// Tasks arrive already validated: non-empty name, `0 <= start_time < finish_time`
/// and non-negative profit. Dependencies may name ids that are not part of the run;
/// those are ignored by every stage.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[pyo3(get, set)]
    pub id: TaskId,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub start_time: f64,
    #[pyo3(get, set)]
    pub finish_time: f64,
    #[pyo3(get, set)]
    pub profit: f64,
    #[pyo3(get, set)]
    pub priority: Priority,
    #[pyo3(get, set)]
    pub dependencies: Vec<TaskId>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        start_time,
        finish_time,
        profit,
        priority=None,
        dependencies=None
    ))]
    pub fn new(
        id: TaskId,
        name: String,
        start_time: f64,
        finish_time: f64,
        profit: f64,
        priority: Option<Priority>,
        dependencies: Option<Vec<TaskId>>,
    ) -> Self {
        Self {
            id,
            name,
            start_time,
            finish_time,
            profit,
            priority: priority.unwrap_or(Priority::Medium),
            dependencies: dependencies.unwrap_or_default(),
        }
    }

    /// Length of the task in hours.
    #[getter]
    pub fn duration(&self) -> f64 {
        self.finish_time - self.start_time
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={}, name={:?}, start={}, finish={}, profit={}, deps={:?})",
            self.id, self.name, self.start_time, self.finish_time, self.profit, self.dependencies
        )
    }
}

/// A task placed at its earliest dependency-consistent time.
///
/// `optimal_start >= task.start_time` always holds; the original window of
/// the task is left untouched.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTask {
    #[pyo3(get)]
    #[serde(flatten)]
    pub task: Task,
    #[pyo3(get)]
    pub optimal_start: f64,
    #[pyo3(get)]
    pub optimal_finish: f64,
}

impl ResolvedTask {
    pub fn new(task: Task, optimal_start: f64) -> Self {
        let optimal_finish = optimal_start + task.duration();
        Self {
            task,
            optimal_start,
            optimal_finish,
        }
    }
}

#[pymethods]
impl ResolvedTask {
    #[getter]
    pub fn id(&self) -> TaskId {
        self.task.id
    }

    #[getter]
    pub fn duration(&self) -> f64 {
        self.task.duration()
    }

    #[getter]
    pub fn profit(&self) -> f64 {
        self.task.profit
    }

    fn __repr__(&self) -> String {
        format!(
            "ResolvedTask(id={}, optimal_start={}, optimal_finish={})",
            self.task.id, self.optimal_start, self.optimal_finish
        )
    }
}

/// An input task tagged with whether it made the final selection.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTask {
    #[pyo3(get)]
    #[serde(flatten)]
    pub task: Task,
    #[pyo3(get)]
    pub selected: bool,
}

#[pymethods]
impl AnnotatedTask {
    fn __repr__(&self) -> String {
        format!(
            "AnnotatedTask(id={}, selected={})",
            self.task.id, self.selected
        )
    }
}

/// Outcome of one optimization run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    /// Final selection, ordered by start time.
    #[pyo3(get)]
    pub selected_tasks: Vec<ResolvedTask>,
    /// Every input task in input order, flagged with membership in `selected_tasks`.
    #[pyo3(get)]
    pub all_tasks: Vec<AnnotatedTask>,
    #[pyo3(get)]
    pub total_duration: f64,
    #[pyo3(get)]
    pub total_profit: f64,
    /// Profit per hour of selected work; 0 when nothing was selected.
    #[pyo3(get)]
    pub efficiency: f64,
    #[pyo3(get)]
    pub capacity: f64,
}

#[pymethods]
impl SelectionResult {
    /// Summary statistics over the final selection.
    pub fn metrics(&self) -> ScheduleMetrics {
        ScheduleMetrics::calculate(self)
    }

    fn __repr__(&self) -> String {
        format!(
            "SelectionResult(selected={}, total_profit={}, total_duration={}, capacity={})",
            self.selected_tasks.len(),
            self.total_profit,
            self.total_duration,
            self.capacity
        )
    }
}

/// Derived performance indicators of a selection.
///
/// | Metric | Definition |
/// |--------|-----------|
/// | Average profit | total profit / selected count |
/// | Average duration | total duration / selected count |
/// | Capacity utilization | total duration / capacity, in percent |
/// | High-priority count | selected tasks with `Priority::High` |
/// | Schedule span | latest optimal finish among selected tasks |
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    #[pyo3(get)]
    pub selected_count: usize,
    #[pyo3(get)]
    pub average_profit: f64,
    #[pyo3(get)]
    pub average_duration: f64,
    #[pyo3(get)]
    pub capacity_utilization: f64,
    #[pyo3(get)]
    pub high_priority_count: usize,
    #[pyo3(get)]
    pub schedule_span: f64,
}

impl ScheduleMetrics {
    pub fn calculate(result: &SelectionResult) -> Self {
        let selected_count = result.selected_tasks.len();
        let (average_profit, average_duration) = if selected_count == 0 {
            (0.0, 0.0)
        } else {
            (
                result.total_profit / selected_count as f64,
                result.total_duration / selected_count as f64,
            )
        };

        let capacity_utilization = if result.capacity > 0.0 {
            result.total_duration / result.capacity * 100.0
        } else {
            0.0
        };

        let high_priority_count = result
            .selected_tasks
            .iter()
            .filter(|t| t.task.priority == Priority::High)
            .count();

        let schedule_span = result
            .selected_tasks
            .iter()
            .map(|t| t.optimal_finish)
            .fold(0.0, f64::max);

        Self {
            selected_count,
            average_profit,
            average_duration,
            capacity_utilization,
            high_priority_count,
            schedule_span,
        }
    }
}

#[pymethods]
impl ScheduleMetrics {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleMetrics(selected={}, utilization={:.1}%, span={})",
            self.selected_count, self.capacity_utilization, self.schedule_span
        )
    }
}
