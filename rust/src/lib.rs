//! Rust implementation of the project timeline scheduling engine.
//!
//! Computes earliest start/end dates for tasks linked by finish-to-start
//! dependencies, rejects cyclic dependency graphs, and diffs schedules for
//! what-if duration changes. Every operation is a pure function of the task
//! and dependency snapshot it is given.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

mod config;
pub mod cycles;
pub mod forward_pass;
pub mod graph;
pub mod impact;
mod interner;
pub mod logging;
mod models;
pub mod topological;

pub use config::SchedulingConfig;
pub use cycles::{detect_cycles, detect_cycles_with_config, would_create_cycle};
pub use forward_pass::{
    project_end_date, schedule_forward, schedule_forward_with_config, CYCLE_ERROR_MESSAGE,
};
pub use graph::{build_graph, ready_tasks, DependencyGraph};
pub use impact::{analyze_impact, analyze_impact_with_config, ImpactError};
pub use models::{
    ImpactReport, SchedulingResult, Task, TaskDependency, TaskImpact, TaskStatus,
};
pub use topological::topological_sort;

/// Return True if the dependency edges contain a cycle (self loops included).
#[pyfunction]
#[pyo3(name = "detect_cycles", signature = (tasks, dependencies, config=None))]
fn py_detect_cycles(
    tasks: Vec<Task>,
    dependencies: Vec<TaskDependency>,
    config: Option<SchedulingConfig>,
) -> bool {
    let config = config.unwrap_or_default();
    detect_cycles_with_config(&tasks, &dependencies, &config)
}

/// Return True if adding "task_id depends on depends_on_task_id" would create a cycle.
#[pyfunction]
#[pyo3(name = "would_create_cycle")]
fn py_would_create_cycle(
    tasks: Vec<Task>,
    dependencies: Vec<TaskDependency>,
    task_id: &str,
    depends_on_task_id: &str,
) -> bool {
    would_create_cycle(&tasks, &dependencies, task_id, depends_on_task_id)
}

/// Task ids ordered so every task follows its prerequisites.
#[pyfunction]
#[pyo3(name = "topological_sort")]
fn py_topological_sort(tasks: Vec<Task>, dependencies: Vec<TaskDependency>) -> Vec<String> {
    topological_sort(&tasks, &dependencies)
}

/// Compute earliest start and end dates for every task.
///
/// # Arguments
/// * `tasks` - All tasks of one project
/// * `dependencies` - Finish-to-start edges among them
/// * `project_start` - Date no task may start before
/// * `config` - Optional SchedulingConfig (fallback duration, verbosity)
///
/// # Returns
/// * SchedulingResult; `has_cycle` is set and no dates are computed if the
///   edges form a cycle
#[pyfunction]
#[pyo3(name = "schedule_forward", signature = (tasks, dependencies, project_start, config=None))]
fn py_schedule_forward(
    tasks: Vec<Task>,
    dependencies: Vec<TaskDependency>,
    project_start: NaiveDate,
    config: Option<SchedulingConfig>,
) -> SchedulingResult {
    let config = config.unwrap_or_default();
    schedule_forward_with_config(&tasks, &dependencies, project_start, &config)
}

/// Diff the current schedule against one where a single task's duration changes.
///
/// # Returns
/// * ImpactReport listing every other task whose start date moves
///
/// # Raises
/// * ValueError if the target task is unknown or the graph has a cycle
#[pyfunction]
#[pyo3(
    name = "analyze_impact",
    signature = (tasks, dependencies, project_start, target_task_id, proposed_duration_days, config=None)
)]
fn py_analyze_impact(
    tasks: Vec<Task>,
    dependencies: Vec<TaskDependency>,
    project_start: NaiveDate,
    target_task_id: &str,
    proposed_duration_days: i64,
    config: Option<SchedulingConfig>,
) -> PyResult<ImpactReport> {
    let config = config.unwrap_or_default();
    analyze_impact_with_config(
        &tasks,
        &dependencies,
        project_start,
        target_task_id,
        proposed_duration_days,
        &config,
    )
    .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Latest end date among the given tasks, or None.
#[pyfunction]
#[pyo3(name = "project_end_date")]
fn py_project_end_date(tasks: Vec<Task>) -> Option<NaiveDate> {
    project_end_date(&tasks)
}

/// Ids of not-started tasks whose prerequisites are all completed.
#[pyfunction]
#[pyo3(name = "ready_tasks")]
fn py_ready_tasks(tasks: Vec<Task>, dependencies: Vec<TaskDependency>) -> Vec<String> {
    ready_tasks(&tasks, &dependencies)
}

/// The timeline.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<TaskStatus>()?;
    m.add_class::<Task>()?;
    m.add_class::<TaskDependency>()?;
    m.add_class::<SchedulingResult>()?;
    m.add_class::<TaskImpact>()?;
    m.add_class::<ImpactReport>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_detect_cycles, m)?)?;
    m.add_function(wrap_pyfunction!(py_would_create_cycle, m)?)?;
    m.add_function(wrap_pyfunction!(py_topological_sort, m)?)?;
    m.add_function(wrap_pyfunction!(py_schedule_forward, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyze_impact, m)?)?;
    m.add_function(wrap_pyfunction!(py_project_end_date, m)?)?;
    m.add_function(wrap_pyfunction!(py_ready_tasks, m)?)?;

    Ok(())
}
