//! Core data types for the scheduling engine.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Progress state of a task. Never read by the forward scheduler.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Wire name used by the surrounding system (`not_started`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(TaskStatus::NotStarted),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status: {}", other)),
        }
    }
}

/// A unit of work with a fixed duration in calendar days.
///
/// `start_date` and `end_date` are derived: the scheduler overwrites them on a
/// copy of the task and never touches the caller's value.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub project_id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub description: Option<String>,
    #[pyo3(get, set)]
    pub duration_days: i64,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub end_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub status: TaskStatus,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        project_id,
        name,
        duration_days,
        description=None,
        start_date=None,
        end_date=None,
        status=TaskStatus::NotStarted
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        project_id: String,
        name: String,
        duration_days: i64,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            project_id,
            name,
            description,
            duration_days,
            start_date,
            end_date,
            status,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration_days={}, start={:?}, end={:?}, status={})",
            self.id, self.duration_days, self.start_date, self.end_date, self.status
        )
    }
}

/// Finish-to-start edge: `task_id` cannot start before `depends_on_task_id` ends.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDependency {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub task_id: String,
    #[pyo3(get, set)]
    pub depends_on_task_id: String,
}

#[pymethods]
impl TaskDependency {
    #[new]
    pub fn new(id: String, task_id: String, depends_on_task_id: String) -> Self {
        Self {
            id,
            task_id,
            depends_on_task_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskDependency(id={:?}, task_id={:?}, depends_on_task_id={:?})",
            self.id, self.task_id, self.depends_on_task_id
        )
    }
}

/// Outcome of a forward scheduling run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchedulingResult {
    #[pyo3(get, set)]
    pub scheduled_tasks: Vec<Task>,
    #[pyo3(get, set)]
    pub has_cycle: bool,
    #[pyo3(get, set)]
    pub cycle_error: Option<String>,
}

impl SchedulingResult {
    /// A successful run with dates assigned to every task.
    pub fn scheduled(scheduled_tasks: Vec<Task>) -> Self {
        Self {
            scheduled_tasks,
            has_cycle: false,
            cycle_error: None,
        }
    }

    /// An aborted run: the input tasks are echoed back without dates computed.
    pub fn cyclic(unscheduled_tasks: Vec<Task>, message: &str) -> Self {
        Self {
            scheduled_tasks: unscheduled_tasks,
            has_cycle: true,
            cycle_error: Some(message.to_string()),
        }
    }

    /// Look up a scheduled task by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.scheduled_tasks.iter().find(|t| t.id == task_id)
    }
}

#[pymethods]
impl SchedulingResult {
    fn __repr__(&self) -> String {
        format!(
            "SchedulingResult(scheduled_tasks={}, has_cycle={})",
            self.scheduled_tasks.len(),
            self.has_cycle
        )
    }
}

/// A task whose start date moves under a proposed change.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskImpact {
    #[pyo3(get, set)]
    pub task_id: String,
    #[pyo3(get, set)]
    pub task_name: String,
    #[pyo3(get, set)]
    pub current_start_date: NaiveDate,
    #[pyo3(get, set)]
    pub proposed_start_date: NaiveDate,
    #[pyo3(get, set)]
    pub shift_days: i64,
}

#[pymethods]
impl TaskImpact {
    fn __repr__(&self) -> String {
        format!(
            "TaskImpact(task_id={:?}, current={}, proposed={}, shift_days={})",
            self.task_id, self.current_start_date, self.proposed_start_date, self.shift_days
        )
    }
}

/// Difference between the current schedule and a proposed one.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImpactReport {
    #[pyo3(get, set)]
    pub impacts: Vec<TaskImpact>,
    #[pyo3(get, set)]
    pub total_affected: usize,
    /// Largest absolute shift among `impacts`, 0 when nothing moves.
    #[pyo3(get, set)]
    pub max_shift: i64,
    /// Signed movement of the latest end date across all tasks.
    #[pyo3(get, set)]
    pub project_end_shift_days: i64,
}

#[pymethods]
impl ImpactReport {
    fn __repr__(&self) -> String {
        format!(
            "ImpactReport(total_affected={}, max_shift={}, project_end_shift_days={})",
            self.total_affected, self.max_shift, self.project_end_shift_days
        )
    }
}
