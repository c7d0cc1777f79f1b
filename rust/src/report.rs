//! JSON export of a scheduling result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnnotatedTask, ResolvedTask, SelectionResult};

/// Headline figures of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub selected_tasks: usize,
    pub total_duration: f64,
    pub total_profit: f64,
    pub efficiency: f64,
    pub work_capacity: f64,
}

/// Structural dump of a `SelectionResult`, stamped with its generation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub timestamp: DateTime<Utc>,
    pub summary: ReportSummary,
    pub selected_tasks: Vec<ResolvedTask>,
    pub all_tasks: Vec<AnnotatedTask>,
}

impl ScheduleReport {
    pub fn new(result: &SelectionResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            summary: ReportSummary {
                total_tasks: result.all_tasks.len(),
                selected_tasks: result.selected_tasks.len(),
                total_duration: result.total_duration,
                total_profit: result.total_profit,
                efficiency: result.efficiency,
                work_capacity: result.capacity,
            },
            selected_tasks: result.selected_tasks.clone(),
            all_tasks: result.all_tasks.clone(),
        }
    }

    /// Pretty-printed JSON with camelCase keys.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};
    use crate::pipeline::run;
    use chrono::TimeZone;

    fn sample_result() -> SelectionResult {
        let tasks = vec![
            Task::new(1, "Design".to_string(), 0.0, 3.0, 50.0, Some(Priority::High), None),
            Task::new(2, "Build".to_string(), 2.0, 5.0, 60.0, None, Some(vec![7])),
            Task::new(3, "Ship".to_string(), 5.0, 8.0, 40.0, Some(Priority::Low), None),
        ];
        run(&tasks, 10.0).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_summary() {
        let report = ScheduleReport::new(&sample_result(), fixed_time());

        assert_eq!(report.summary.total_tasks, 3);
        assert_eq!(report.summary.selected_tasks, 2);
        assert!((report.summary.total_profit - 90.0).abs() < 1e-9);
        assert_eq!(report.summary.work_capacity, 10.0);
    }

    #[test]
    fn test_json_layout() {
        let json = ScheduleReport::new(&sample_result(), fixed_time())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timestamp"], "2025-01-20T09:30:00Z");
        assert_eq!(value["summary"]["selectedTasks"], 2);
        assert_eq!(value["summary"]["workCapacity"], 10.0);

        let first = &value["selectedTasks"][0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["name"], "Design");
        assert_eq!(first["priority"], "High");
        assert_eq!(first["optimalStart"], 0.0);
        assert_eq!(first["optimalFinish"], 3.0);

        let build = &value["allTasks"][1];
        assert_eq!(build["selected"], false);
        assert_eq!(build["dependencies"], serde_json::json!([7]));
        assert_eq!(build["startTime"], 2.0);
    }

    #[test]
    fn test_json_is_lossless() {
        let report = ScheduleReport::new(&sample_result(), fixed_time());
        let parsed: ScheduleReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_keeps_exact_floats() {
        let start = 0.1 + 0.2;
        let tasks = vec![
            Task::new(1, "Fine".to_string(), start, start + 1.7, 54.781751339831196, None, None),
            Task::new(
                2,
                "Next".to_string(),
                2.0,
                2.0 + 1.0 / 3.0,
                13.0 / 7.0,
                None,
                Some(vec![1]),
            ),
        ];
        let result = run(&tasks, 5.0).unwrap();
        let report = ScheduleReport::new(&result, fixed_time());

        let parsed: ScheduleReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(parsed.summary.efficiency.to_bits(), report.summary.efficiency.to_bits());
        assert_eq!(parsed.selected_tasks[0].task.start_time.to_bits(), start.to_bits());
        assert_eq!(parsed, report);
    }
}
