//! Dependency resolution: earliest dependency-consistent start times.
//!
//! optimal_start(t) = max(t.start_time, max over d in deps(t) of optimal_start(d) + duration(d))
//!
//! Computed as a single forward pass in topological order (Kahn's algorithm),
//! the same propagation a critical-path forward pass performs.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::models::{ResolvedTask, Task, TaskId};

/// Index of each id's first occurrence in the input.
fn build_index(tasks: &[Task]) -> FxHashMap<TaskId, usize> {
    let mut index: FxHashMap<TaskId, usize> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for (i, task) in tasks.iter().enumerate() {
        index.entry(task.id).or_insert(i);
    }
    index
}

/// Earliest start of a task given the start times already known for its dependencies.
///
/// A dependency without a known start contributes `0 + duration`.
fn earliest_start(task: &Task, deps: &[usize], tasks: &[Task], starts: &[Option<f64>]) -> f64 {
    deps.iter()
        .map(|&d| starts[d].unwrap_or(0.0) + tasks[d].duration())
        .fold(task.start_time, f64::max)
}

/// Compute optimal start/finish times for every task.
///
/// Dependencies on unknown ids are ignored. Tasks left over after the
/// topological pass can only exist if the graph has a cycle; they are resolved
/// in input order, treating dependencies that are still unresolved as starting
/// at 0, so the call always terminates.
///
/// # Returns
/// Every task exactly once, sorted by `optimal_start` ascending (ties keep input order).
pub fn resolve(tasks: &[Task]) -> Vec<ResolvedTask> {
    let n = tasks.len();
    let index = build_index(tasks);

    // Known dependencies per task (deduplicated) and the reverse map
    let mut deps: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, task) in tasks.iter().enumerate() {
        for dep_id in &task.dependencies {
            if let Some(&d) = index.get(dep_id) {
                if !deps[i].contains(&d) {
                    deps[i].push(d);
                    dependents[d].push(i);
                }
            }
        }
    }

    let mut pending: Vec<usize> = deps.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| pending[i] == 0).collect();
    let mut starts: Vec<Option<f64>> = vec![None; n];

    while let Some(i) = queue.pop_front() {
        starts[i] = Some(earliest_start(&tasks[i], &deps[i], tasks, &starts));

        for &dependent in &dependents[i] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    for i in 0..n {
        if starts[i].is_none() {
            starts[i] = Some(earliest_start(&tasks[i], &deps[i], tasks, &starts));
        }
    }

    let mut resolved: Vec<ResolvedTask> = tasks
        .iter()
        .zip(starts)
        .map(|(task, start)| ResolvedTask::new(task.clone(), start.unwrap_or(task.start_time)))
        .collect();

    resolved.sort_by(|a, b| a.optimal_start.total_cmp(&b.optimal_start));
    resolved
}
