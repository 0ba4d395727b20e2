//! Dependency graph construction.
//!
//! The graph is a throwaway view over one snapshot of tasks and edges: it is
//! rebuilt on every call and never outlives the operation that built it.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::interner::{TaskIdInterner, TaskIdx};
use crate::models::{Task, TaskDependency, TaskStatus};

/// Forward and reverse adjacency over interned task indices.
///
/// Node indices follow the order of the task slice. Prerequisite lists keep
/// the order edges were first seen in; dependent lists are kept in task order
/// so tasks released by the same prerequisite are visited in input order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    index: TaskIdInterner,
    /// task -> tasks it depends on
    prerequisites: Vec<Vec<TaskIdx>>,
    /// task -> tasks that depend on it
    dependents: Vec<Vec<TaskIdx>>,
    edge_count: usize,
    dangling_edges: usize,
}

impl DependencyGraph {
    /// Build the graph from a task snapshot and its dependency edges.
    ///
    /// Every task appears as a node even without edges. Duplicate edges are
    /// collapsed, edges naming an unknown task are dropped, self loops are kept
    /// so cycle detection can see them.
    pub fn build(tasks: &[Task], dependencies: &[TaskDependency]) -> Self {
        let mut index = TaskIdInterner::with_capacity(tasks.len());
        for task in tasks {
            index.intern(&task.id);
        }

        let n = index.len();
        let mut prerequisites: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut dependents: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut seen: FxHashSet<(TaskIdx, TaskIdx)> =
            FxHashSet::with_capacity_and_hasher(dependencies.len(), Default::default());
        let mut edge_count = 0;
        let mut dangling_edges = 0;

        for dep in dependencies {
            let (Some(task), Some(prereq)) =
                (index.get(&dep.task_id), index.get(&dep.depends_on_task_id))
            else {
                dangling_edges += 1;
                continue;
            };
            if !seen.insert((task, prereq)) {
                continue;
            }
            prerequisites[task as usize].push(prereq);
            dependents[prereq as usize].push(task);
            edge_count += 1;
        }

        for list in &mut dependents {
            list.sort_unstable();
        }

        Self {
            index,
            prerequisites,
            dependents,
            edge_count,
            dangling_edges,
        }
    }

    /// Number of distinct tasks.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct edges kept after dropping duplicates and dangling ones.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of input edges dropped because an endpoint is not a known task.
    pub fn dangling_edges(&self) -> usize {
        self.dangling_edges
    }

    #[inline]
    pub fn index_of(&self, task_id: &str) -> Option<TaskIdx> {
        self.index.get(task_id)
    }

    /// Id for an index produced by this graph.
    #[inline]
    pub fn id(&self, idx: TaskIdx) -> &str {
        self.index.resolve(idx).unwrap_or_default()
    }

    /// Task ids in input order (first occurrence wins for repeated ids).
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.index.ids()
    }

    #[inline]
    pub fn prerequisites_of(&self, idx: TaskIdx) -> &[TaskIdx] {
        self.prerequisites
            .get(idx as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn dependents_of(&self, idx: TaskIdx) -> &[TaskIdx] {
        self.dependents
            .get(idx as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids the given task depends on. Empty for unknown ids.
    pub fn prerequisites(&self, task_id: &str) -> Vec<&str> {
        self.index_of(task_id)
            .map(|idx| self.resolve_all(self.prerequisites_of(idx)))
            .unwrap_or_default()
    }

    /// Ids that depend on the given task. Empty for unknown ids.
    pub fn dependents(&self, task_id: &str) -> Vec<&str> {
        self.index_of(task_id)
            .map(|idx| self.resolve_all(self.dependents_of(idx)))
            .unwrap_or_default()
    }

    fn resolve_all(&self, indices: &[TaskIdx]) -> Vec<&str> {
        indices.iter().map(|&idx| self.id(idx)).collect()
    }
}

/// Build the dependency graph for a snapshot.
pub fn build_graph(tasks: &[Task], dependencies: &[TaskDependency]) -> DependencyGraph {
    DependencyGraph::build(tasks, dependencies)
}

/// Tasks that can be picked up now: not started, with every prerequisite completed.
///
/// Returned in input order. Edges to unknown tasks do not block.
pub fn ready_tasks(tasks: &[Task], dependencies: &[TaskDependency]) -> Vec<String> {
    let graph = DependencyGraph::build(tasks, dependencies);

    let mut statuses: FxHashMap<&str, TaskStatus> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        statuses.entry(task.id.as_str()).or_insert(task.status);
    }
    let status_of = |idx: TaskIdx| statuses.get(graph.id(idx)).copied().unwrap_or_default();

    (0..graph.len() as TaskIdx)
        .filter(|&idx| status_of(idx) == TaskStatus::NotStarted)
        .filter(|&idx| {
            graph
                .prerequisites_of(idx)
                .iter()
                .all(|&prereq| status_of(prereq).is_complete())
        })
        .map(|idx| graph.id(idx).to_string())
        .collect()
}
