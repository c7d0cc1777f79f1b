//! Dependency cycle detection.
//!
//! Depth-first traversal over the task -> dependency graph, tracking the
//! nodes on the active path and the nodes already fully explored. Reaching a
//! node that is still on the active path closes a cycle.
//!
//! The traversal keeps an explicit stack instead of recursing so large task
//! sets cannot exhaust the call stack.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::models::{Task, TaskId};

/// A closed walk through the dependency graph.
///
/// Consecutive ids are dependency edges (`ids[i]` depends on `ids[i + 1]`) and
/// the first id equals the last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle(pub Vec<TaskId>);

impl Cycle {
    pub fn ids(&self) -> &[TaskId] {
        &self.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|id| id.to_string()).collect();
        write!(f, "{}", parts.join(" → "))
    }
}

/// Build the adjacency map task id -> known dependency ids.
///
/// Dependencies naming ids outside the task set are dropped here, so they never
/// become graph edges.
fn build_graph(tasks: &[Task]) -> FxHashMap<TaskId, Vec<TaskId>> {
    let mut graph: FxHashMap<TaskId, Vec<TaskId>> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        graph.entry(task.id).or_default();
    }
    for task in tasks {
        let known: Vec<TaskId> = task
            .dependencies
            .iter()
            .copied()
            .filter(|dep| graph.contains_key(dep))
            .collect();
        if let Some(edges) = graph.get_mut(&task.id) {
            edges.extend(known);
        }
    }
    graph
}

/// Check the dependency relation for cycles.
///
/// Roots are visited in input order and each node's dependencies in listed
/// order, so the reported cycle is deterministic for a given input.
///
/// # Returns
/// * `None` if the graph is acyclic
/// * `Some(cycle)` with the first cycle found, e.g. `[1, 3, 2, 1]`
pub fn detect_cycle(tasks: &[Task]) -> Option<Cycle> {
    let graph = build_graph(tasks);
    let mut in_progress: FxHashSet<TaskId> = FxHashSet::default();
    let mut done: FxHashSet<TaskId> = FxHashSet::default();

    for root in tasks.iter().map(|t| t.id) {
        if done.contains(&root) {
            continue;
        }

        // (node, index of the next dependency to explore)
        let mut stack: Vec<(TaskId, usize)> = vec![(root, 0)];
        let mut path: Vec<TaskId> = vec![root];
        in_progress.insert(root);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let edges = graph.get(&node).map(Vec::as_slice).unwrap_or(&[]);

            match edges.get(next) {
                Some(&dep) => {
                    frame.1 += 1;
                    if in_progress.contains(&dep) {
                        let pos = path.iter().position(|&id| id == dep).unwrap_or(0);
                        let mut cycle = path[pos..].to_vec();
                        cycle.push(dep);
                        return Some(Cycle(cycle));
                    }
                    if !done.contains(&dep) {
                        in_progress.insert(dep);
                        path.push(dep);
                        stack.push((dep, 0));
                    }
                }
                None => {
                    stack.pop();
                    path.pop();
                    in_progress.remove(&node);
                    done.insert(node);
                }
            }
        }
    }

    None
}
