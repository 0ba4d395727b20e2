//! Forward pass: earliest start and end dates under finish-to-start edges.

use chrono::{Days, NaiveDate};

use crate::config::SchedulingConfig;
use crate::cycles::graph_has_cycle;
use crate::graph::DependencyGraph;
use crate::interner::TaskIdx;
use crate::models::{SchedulingResult, Task, TaskDependency};
use crate::topological::topological_order;
use crate::{log_changes, log_checks, log_debug};

/// Message reported when scheduling aborts on a cyclic graph.
pub const CYCLE_ERROR_MESSAGE: &str = "Circular dependency detected in task graph";

/// Add whole calendar days, saturating at the last representable date.
fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Copy of `task` with derived dates overwritten.
fn with_dates(task: &Task, start: NaiveDate, end: NaiveDate) -> Task {
    Task {
        start_date: Some(start),
        end_date: Some(end),
        ..task.clone()
    }
}

/// Schedule every task as early as its prerequisites allow.
///
/// See [`schedule_forward_with_config`].
pub fn schedule_forward(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    project_start: NaiveDate,
) -> SchedulingResult {
    schedule_forward_with_config(
        tasks,
        dependencies,
        project_start,
        &SchedulingConfig::default(),
    )
}

/// Schedule every task as early as its prerequisites allow.
///
/// A task starts at the later of `project_start` and the latest end date of
/// its prerequisites, and ends `duration_days` calendar days later. Cycles
/// abort the run before any date is computed: the input tasks come back
/// unchanged with `has_cycle` set.
///
/// Output tasks are copies of the input in topological order. Tasks the
/// ordering could not place fall back to `project_start` and follow in input
/// order. Repeated task ids are scheduled once, from their first occurrence.
pub fn schedule_forward_with_config(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    project_start: NaiveDate,
    config: &SchedulingConfig,
) -> SchedulingResult {
    let verbosity = config.verbosity;
    let graph = DependencyGraph::build(tasks, dependencies);

    if graph.dangling_edges() > 0 {
        log_checks!(
            verbosity,
            "Ignoring {} dependency edge(s) that reference unknown tasks",
            graph.dangling_edges()
        );
    }

    if graph_has_cycle(&graph, verbosity) {
        log_changes!(verbosity, "{}; no dates computed", CYCLE_ERROR_MESSAGE);
        return SchedulingResult::cyclic(tasks.to_vec(), CYCLE_ERROR_MESSAGE);
    }

    // First occurrence of each id, indexed like the graph
    let mut task_at: Vec<Option<&Task>> = vec![None; graph.len()];
    for task in tasks {
        if let Some(idx) = graph.index_of(&task.id) {
            let slot = &mut task_at[idx as usize];
            if slot.is_none() {
                *slot = Some(task);
            }
        }
    }

    let order = topological_order(&graph);
    log_debug!(
        verbosity,
        "Topological order: {:?}",
        order.iter().map(|&idx| graph.id(idx)).collect::<Vec<_>>()
    );

    let mut dates: Vec<Option<(NaiveDate, NaiveDate)>> = vec![None; graph.len()];
    let mut scheduled_tasks: Vec<Task> = Vec::with_capacity(graph.len());

    for &idx in &order {
        let Some(task) = task_at[idx as usize] else {
            continue;
        };

        let mut earliest_start = project_start;
        for &prereq in graph.prerequisites_of(idx) {
            match dates[prereq as usize] {
                Some((_, prereq_end)) => earliest_start = earliest_start.max(prereq_end),
                None => log_checks!(
                    verbosity,
                    "  {}: prerequisite {} has no end date yet, not constraining",
                    task.id,
                    graph.id(prereq)
                ),
            }
        }

        let end = add_days(earliest_start, config.effective_duration(task.duration_days));
        log_changes!(verbosity, "Scheduled {}: {} -> {}", task.id, earliest_start, end);

        dates[idx as usize] = Some((earliest_start, end));
        scheduled_tasks.push(with_dates(task, earliest_start, end));
    }

    if scheduled_tasks.len() < graph.len() {
        for idx in 0..graph.len() as TaskIdx {
            if dates[idx as usize].is_some() {
                continue;
            }
            let Some(task) = task_at[idx as usize] else {
                continue;
            };
            let end = add_days(project_start, config.effective_duration(task.duration_days));
            log_checks!(
                verbosity,
                "{} missing from topological order, falling back to project start",
                task.id
            );
            scheduled_tasks.push(with_dates(task, project_start, end));
        }
    }

    SchedulingResult::scheduled(scheduled_tasks)
}

/// Latest end date across scheduled tasks, or None if no task has one.
pub fn project_end_date(scheduled_tasks: &[Task]) -> Option<NaiveDate> {
    scheduled_tasks.iter().filter_map(|t| t.end_date).max()
}
