//! What-if analysis: how a duration change to one task moves everyone else.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::SchedulingConfig;
use crate::forward_pass::{project_end_date, schedule_forward_with_config, CYCLE_ERROR_MESSAGE};
use crate::log_checks;
use crate::models::{ImpactReport, Task, TaskDependency, TaskImpact};

/// Errors that can occur during impact analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImpactError {
    #[error("This change would create a dependency cycle: {0}")]
    CircularDependency(String),
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// Compare the current schedule with one where `target_task_id` takes
/// `proposed_duration_days`.
///
/// See [`analyze_impact_with_config`].
pub fn analyze_impact(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    project_start: NaiveDate,
    target_task_id: &str,
    proposed_duration_days: i64,
) -> Result<ImpactReport, ImpactError> {
    analyze_impact_with_config(
        tasks,
        dependencies,
        project_start,
        target_task_id,
        proposed_duration_days,
        &SchedulingConfig::default(),
    )
}

/// Compare the current schedule with one where `target_task_id` takes
/// `proposed_duration_days`.
///
/// Both schedules are computed from the same snapshot; nothing is mutated.
/// Every other task whose start date moves is reported with its signed shift
/// in days, in the order of the proposed schedule. The target itself is never
/// listed.
pub fn analyze_impact_with_config(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    project_start: NaiveDate,
    target_task_id: &str,
    proposed_duration_days: i64,
    config: &SchedulingConfig,
) -> Result<ImpactReport, ImpactError> {
    if !tasks.iter().any(|t| t.id == target_task_id) {
        return Err(ImpactError::TaskNotFound(target_task_id.to_string()));
    }

    let proposed_tasks: Vec<Task> = tasks
        .iter()
        .map(|t| {
            let mut task = t.clone();
            if task.id == target_task_id {
                task.duration_days = proposed_duration_days;
            }
            task
        })
        .collect();

    let proposed =
        schedule_forward_with_config(&proposed_tasks, dependencies, project_start, config);
    if proposed.has_cycle {
        let message = proposed
            .cycle_error
            .unwrap_or_else(|| CYCLE_ERROR_MESSAGE.to_string());
        return Err(ImpactError::CircularDependency(message));
    }
    let current = schedule_forward_with_config(tasks, dependencies, project_start, config);

    let current_starts: FxHashMap<&str, NaiveDate> = current
        .scheduled_tasks
        .iter()
        .filter_map(|t| t.start_date.map(|start| (t.id.as_str(), start)))
        .collect();

    let mut impacts = Vec::new();
    for task in &proposed.scheduled_tasks {
        if task.id == target_task_id {
            continue;
        }
        let (Some(&current_start), Some(proposed_start)) =
            (current_starts.get(task.id.as_str()), task.start_date)
        else {
            log_checks!(config.verbosity, "  {}: missing from one schedule", task.id);
            continue;
        };

        let shift_days = (proposed_start - current_start).num_days();
        if shift_days != 0 {
            impacts.push(TaskImpact {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                current_start_date: current_start,
                proposed_start_date: proposed_start,
                shift_days,
            });
        }
    }

    let max_shift = impacts
        .iter()
        .map(|i| i.shift_days.abs())
        .max()
        .unwrap_or(0);

    let project_end_shift_days = match (
        project_end_date(&current.scheduled_tasks),
        project_end_date(&proposed.scheduled_tasks),
    ) {
        (Some(current_end), Some(proposed_end)) => (proposed_end - current_end).num_days(),
        _ => 0,
    };

    Ok(ImpactReport {
        total_affected: impacts.len(),
        impacts,
        max_shift,
        project_end_shift_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(id: &str, duration: i64) -> Task {
        Task {
            id: id.to_string(),
            project_id: "p1".to_string(),
            name: format!("Task {}", id),
            description: None,
            duration_days: duration,
            start_date: None,
            end_date: None,
            status: TaskStatus::NotStarted,
        }
    }

    fn make_deps(edges: &[(&str, &str)]) -> Vec<TaskDependency> {
        edges
            .iter()
            .enumerate()
            .map(|(i, (task, on))| {
                TaskDependency::new(format!("d{}", i), task.to_string(), on.to_string())
            })
            .collect()
    }

    fn diamond() -> (Vec<Task>, Vec<TaskDependency>) {
        let tasks = vec![
            make_task("t1", 2),
            make_task("t2", 3),
            make_task("t3", 1),
            make_task("t4", 2),
        ];
        let deps = make_deps(&[("t2", "t1"), ("t3", "t1"), ("t4", "t2"), ("t4", "t3")]);
        (tasks, deps)
    }

    #[test]
    fn test_diamond_extension_shifts_all_dependents() {
        let (tasks, deps) = diamond();
        let report = analyze_impact(&tasks, &deps, date(2024, 1, 1), "t1", 5).unwrap();

        // The mutated task itself is excluded, so three tasks are affected
        assert_eq!(report.total_affected, 3);
        assert_eq!(report.max_shift, 3);
        assert_eq!(report.project_end_shift_days, 3);

        let ids: Vec<&str> = report.impacts.iter().map(|i| i.task_id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t4"]);
        assert!(report.impacts.iter().all(|i| i.shift_days == 3));

        let t4 = &report.impacts[2];
        assert_eq!(t4.task_name, "Task t4");
        assert_eq!(t4.current_start_date, date(2024, 1, 6));
        assert_eq!(t4.proposed_start_date, date(2024, 1, 9));
    }

    #[test]
    fn test_shortening_reports_negative_shift() {
        let (tasks, deps) = diamond();
        let report = analyze_impact(&tasks, &deps, date(2024, 1, 1), "t2", 1).unwrap();

        // t4 now waits on t3 and t2 ending together at 01-04
        assert_eq!(report.total_affected, 1);
        assert_eq!(report.impacts[0].task_id, "t4");
        assert_eq!(report.impacts[0].shift_days, -2);
        assert_eq!(report.max_shift, 2);
        assert_eq!(report.project_end_shift_days, -2);
    }

    #[test]
    fn test_change_absorbed_by_slack() {
        let (tasks, deps) = diamond();
        // t3 can grow to t2's length without moving t4
        let report = analyze_impact(&tasks, &deps, date(2024, 1, 1), "t3", 3).unwrap();

        assert_eq!(report, ImpactReport::default());
    }

    #[test]
    fn test_unchanged_duration_has_no_impact() {
        let (tasks, deps) = diamond();
        let report = analyze_impact(&tasks, &deps, date(2024, 1, 1), "t1", 2).unwrap();
        assert!(report.impacts.is_empty());
        assert_eq!(report.max_shift, 0);
    }

    #[test]
    fn test_cycle_is_surfaced() {
        let tasks = vec![make_task("a", 1), make_task("b", 1)];
        let deps = make_deps(&[("a", "b"), ("b", "a")]);
        let result = analyze_impact(&tasks, &deps, date(2024, 1, 1), "a", 4);

        assert_eq!(
            result,
            Err(ImpactError::CircularDependency(CYCLE_ERROR_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_unknown_target() {
        let (tasks, deps) = diamond();
        let result = analyze_impact(&tasks, &deps, date(2024, 1, 1), "nope", 4);
        assert_eq!(result, Err(ImpactError::TaskNotFound("nope".to_string())));
    }

    #[test]
    fn test_input_untouched() {
        let (tasks, deps) = diamond();
        let before = tasks.clone();
        analyze_impact(&tasks, &deps, date(2024, 1, 1), "t1", 9).unwrap();
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ImpactError::TaskNotFound("x".to_string()).to_string(),
            "Task not found: x"
        );
        assert!(ImpactError::CircularDependency("loop".to_string())
            .to_string()
            .contains("loop"));
    }
}
