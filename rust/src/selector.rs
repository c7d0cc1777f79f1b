//! Greedy activity selection over resolved tasks.
//!
//! Picks a maximum-cardinality set of mutually non-overlapping
//! `[optimal_start, optimal_finish)` intervals by scanning in finish-time
//! order. Profit plays no role here; the capacity stage re-optimizes value.

use std::cmp::Ordering;

use crate::models::ResolvedTask;

/// Finish time ascending, id breaks ties.
fn by_finish(a: &ResolvedTask, b: &ResolvedTask) -> Ordering {
    a.optimal_finish
        .total_cmp(&b.optimal_finish)
        .then(a.task.id.cmp(&b.task.id))
}

/// Select non-overlapping tasks, earliest finish first.
///
/// A task is taken when it starts no earlier than the finish of the last taken
/// task; touching intervals do not overlap.
///
/// # Returns
/// The selected tasks in finish-time order (empty for empty input).
pub fn select(resolved: &[ResolvedTask]) -> Vec<ResolvedTask> {
    let mut sorted: Vec<&ResolvedTask> = resolved.iter().collect();
    sorted.sort_by(|a, b| by_finish(a, b));

    let mut selected: Vec<ResolvedTask> = Vec::new();
    let mut last_finish: Option<f64> = None;

    for task in sorted {
        if let Some(finish) = last_finish {
            if task.optimal_start < finish {
                continue;
            }
        }
        last_finish = Some(task.optimal_finish);
        selected.push(task.clone());
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskId};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn make_resolved(id: TaskId, start: f64, finish: f64) -> ResolvedTask {
        let task = Task::new(id, format!("t{id}"), start, finish, 1.0, None, None);
        ResolvedTask::new(task, start)
    }

    fn overlaps(a: &ResolvedTask, b: &ResolvedTask) -> bool {
        a.optimal_start < b.optimal_finish && b.optimal_start < a.optimal_finish
    }

    fn brute_force_max(tasks: &[ResolvedTask]) -> usize {
        let n = tasks.len();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let chosen: Vec<&ResolvedTask> =
                (0..n).filter(|&i| mask & (1 << i) != 0).map(|i| &tasks[i]).collect();
            let disjoint = chosen
                .iter()
                .enumerate()
                .all(|(i, a)| chosen[i + 1..].iter().all(|b| !overlaps(a, b)));
            if disjoint {
                best = best.max(chosen.len());
            }
        }
        best
    }

    #[test]
    fn test_empty() {
        assert!(select(&[]).is_empty());
    }

    #[test]
    fn test_single() {
        let selected = select(&[make_resolved(1, 0.0, 3.0)]);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_overlap_dropped() {
        let tasks = vec![
            make_resolved(1, 0.0, 3.0),
            make_resolved(2, 2.0, 5.0),
            make_resolved(3, 5.0, 8.0),
        ];
        let ids: Vec<TaskId> = select(&tasks).iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_touching_intervals_kept() {
        let tasks = vec![make_resolved(2, 3.0, 6.0), make_resolved(1, 0.0, 3.0)];
        let ids: Vec<TaskId> = select(&tasks).iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_finish_tie_broken_by_id() {
        let tasks = vec![make_resolved(5, 1.0, 4.0), make_resolved(2, 0.0, 4.0)];
        let selected = select(&tasks);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].task.id, 2);
    }

    #[test]
    fn test_uses_resolved_times() {
        // Original window 0-2 overlaps task 1, but dependencies moved it to 3-5
        let task = Task::new(2, "b".to_string(), 0.0, 2.0, 1.0, None, Some(vec![1]));
        let tasks = vec![make_resolved(1, 0.0, 3.0), ResolvedTask::new(task, 3.0)];
        assert_eq!(select(&tasks).len(), 2);
    }

    #[test]
    fn test_random_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..300 {
            let n = rng.random_range(0..=8u32);
            let tasks: Vec<ResolvedTask> = (1..=n)
                .map(|id| {
                    let start = rng.random_range(0..12) as f64;
                    let len = rng.random_range(1..5) as f64;
                    make_resolved(id, start, start + len)
                })
                .collect();

            let selected = select(&tasks);
            for (i, a) in selected.iter().enumerate() {
                for b in &selected[i + 1..] {
                    assert!(!overlaps(a, b));
                }
            }
            assert_eq!(selected.len(), brute_force_max(&tasks));
        }
    }
}
