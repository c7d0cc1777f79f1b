//! Capacity-constrained profit maximization (0/1 knapsack).
//!
//! Weight = task duration, value = task profit, budget = work capacity.
//!
//! # Quantization
//! Durations and capacity are measured in whole tenths of an hour. Capacity is
//! floored and task weights are rounded up, so a selection whose weights fit
//! the scaled capacity also fits the real capacity in hours. Precision finer
//! than 0.1h is not supported: a 0.05h task weighs a full tenth and a 2.59h
//! capacity offers 25 tenths. A tiny epsilon absorbs binary representation
//! error before rounding, so `4.1 - 3.8` weighs 3 tenths.
//!
//! The DP table holds `(n + 1) * (scaled width + 1)` cells, where the width is
//! the scaled capacity bounded by the total weight of all tasks.

use thiserror::Error;

use crate::models::{ResolvedTask, TaskId};

/// Tenths of an hour per hour.
pub const SCALE: f64 = 10.0;

/// Absorbs binary representation error before rounding.
const QUANTIZE_EPSILON: f64 = 1e-9;

/// Hard bound for exhaustive search; subsets are enumerated through a `u64` mask.
const MAX_EXHAUSTIVE_TASKS: usize = 63;

/// Errors from the capacity stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Dependency-closed optimization limited to {limit} tasks, got {count}")]
    TooManyTasks { count: usize, limit: usize },
}

/// Convert a capacity in hours to whole tenths, flooring. Non-positive and NaN map to 0.
pub fn to_tenths(hours: f64) -> usize {
    if hours.is_nan() || hours <= 0.0 {
        return 0;
    }
    (hours * SCALE + QUANTIZE_EPSILON).floor() as usize
}

/// Convert a task duration in hours to whole tenths, rounding up.
///
/// Any positive duration weighs at least one tenth. Non-positive and NaN map to 0.
pub fn weight_tenths(hours: f64) -> usize {
    if hours.is_nan() || hours <= 0.0 {
        return 0;
    }
    ((hours * SCALE - QUANTIZE_EPSILON).ceil() as usize).max(1)
}

/// Select the subset of `tasks` with maximum total profit whose total
/// quantized duration fits in `capacity`.
///
/// Standard tabulation over (task prefix, remaining capacity), then a backward
/// walk from the full table corner: a task is taken whenever its row changed
/// the optimum. Zero-profit tasks are never taken.
///
/// Capacity beyond the total weight of `tasks` cannot change the answer, so the
/// table width is clamped there; an unbounded (even infinite) capacity costs no
/// more than one that fits every task.
///
/// # Returns
/// The chosen tasks in input order. Empty when `capacity` quantizes to 0.
pub fn optimize(tasks: &[ResolvedTask], capacity: f64) -> Vec<ResolvedTask> {
    let weights: Vec<usize> = tasks.iter().map(|t| weight_tenths(t.duration())).collect();
    let total_weight = weights.iter().fold(0usize, |acc, &w| acc.saturating_add(w));
    let cap = to_tenths(capacity).min(total_weight);
    if cap == 0 {
        return Vec::new();
    }

    let n = tasks.len();
    let width = cap + 1;

    // dp[i * width + w]: best profit using the first i tasks within w tenths
    let mut dp = vec![0.0_f64; (n + 1) * width];

    for i in 1..=n {
        let weight = weights[i - 1];
        let profit = tasks[i - 1].task.profit;
        for w in 0..width {
            let exclude = dp[(i - 1) * width + w];
            dp[i * width + w] = if weight <= w {
                exclude.max(dp[(i - 1) * width + w - weight] + profit)
            } else {
                exclude
            };
        }
    }

    let mut chosen: Vec<ResolvedTask> = Vec::new();
    let mut w = cap;
    for i in (1..=n).rev() {
        if dp[i * width + w] != dp[(i - 1) * width + w] {
            chosen.push(tasks[i - 1].clone());
            w -= weights[i - 1];
        }
    }

    chosen.reverse();
    chosen
}

/// Select the most profitable subset that fits `capacity` and is closed under
/// dependencies among the candidates.
///
/// Whenever a task is chosen, every candidate it depends on is chosen too.
/// Dependencies naming ids outside `tasks` are ignored. Exhaustive over all
/// `2^n` subsets; the first subset reaching the best profit wins.
///
/// # Errors
/// `CapacityError::TooManyTasks` when `tasks.len()` exceeds `limit` (or 63).
pub fn optimize_dependency_closed(
    tasks: &[ResolvedTask],
    capacity: f64,
    limit: usize,
) -> Result<Vec<ResolvedTask>, CapacityError> {
    let n = tasks.len();
    let limit = limit.min(MAX_EXHAUSTIVE_TASKS);
    if n > limit {
        return Err(CapacityError::TooManyTasks { count: n, limit });
    }

    let cap = to_tenths(capacity);
    let weights: Vec<usize> = tasks.iter().map(|t| weight_tenths(t.duration())).collect();
    let ids: Vec<TaskId> = tasks.iter().map(|t| t.task.id).collect();

    // Bitmask of candidates each task requires
    let required: Vec<u64> = tasks
        .iter()
        .map(|t| {
            ids.iter()
                .enumerate()
                .filter(|&(_, id)| t.task.dependencies.contains(id))
                .fold(0u64, |acc, (j, _)| acc | (1 << j))
        })
        .collect();

    let mut best_mask = 0u64;
    let mut best_profit = 0.0_f64;

    for mask in 0..(1u64 << n) {
        let mut weight = 0usize;
        let mut profit = 0.0_f64;
        let mut closed = true;

        for i in (0..n).filter(|&i| mask & (1 << i) != 0) {
            if required[i] & !mask != 0 {
                closed = false;
                break;
            }
            weight = weight.saturating_add(weights[i]);
            profit += tasks[i].task.profit;
        }

        if closed && weight <= cap && profit > best_profit {
            best_profit = profit;
            best_mask = mask;
        }
    }

    Ok((0..n)
        .filter(|&i| best_mask & (1 << i) != 0)
        .map(|i| tasks[i].clone())
        .collect())
}
