//! Topological ordering using Kahn's algorithm.

use std::collections::VecDeque;

use crate::graph::DependencyGraph;
use crate::interner::TaskIdx;
use crate::models::{Task, TaskDependency};

/// Order graph nodes so every task comes after all of its prerequisites.
///
/// In-degree counts outstanding prerequisites. The queue is seeded by scanning
/// nodes in input order and drained FIFO, so equally-ready tasks keep their
/// input order. Nodes on or behind a cycle never reach in-degree zero and are
/// left out; callers decide how to treat them.
pub(crate) fn topological_order(graph: &DependencyGraph) -> Vec<TaskIdx> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = (0..n as TaskIdx)
        .map(|idx| graph.prerequisites_of(idx).len())
        .collect();

    let mut queue: VecDeque<TaskIdx> = (0..n as TaskIdx)
        .filter(|&idx| in_degree[idx as usize] == 0)
        .collect();

    let mut result: Vec<TaskIdx> = Vec::with_capacity(n);

    while let Some(idx) = queue.pop_front() {
        result.push(idx);

        for &dependent in graph.dependents_of(idx) {
            let degree = &mut in_degree[dependent as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(dependent);
            }
        }
    }

    result
}

/// Task ids in dependency order (prerequisites first).
pub fn topological_sort(tasks: &[Task], dependencies: &[TaskDependency]) -> Vec<String> {
    let graph = DependencyGraph::build(tasks, dependencies);
    topological_order(&graph)
        .into_iter()
        .map(|idx| graph.id(idx).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn make_tasks(ids: &[&str]) -> Vec<Task> {
        ids.iter()
            .map(|id| Task {
                id: id.to_string(),
                project_id: "p1".to_string(),
                name: id.to_string(),
                description: None,
                duration_days: 1,
                start_date: None,
                end_date: None,
                status: TaskStatus::NotStarted,
            })
            .collect()
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

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|t| t == id).unwrap()
    }

    #[test]
    fn test_independent_tasks_keep_input_order() {
        let tasks = make_tasks(&["c", "a", "b"]);
        assert_eq!(topological_sort(&tasks, &[]), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_chain_given_in_reverse() {
        let tasks = make_tasks(&["c", "b", "a"]);
        let deps = make_deps(&[("c", "b"), ("b", "a")]);
        assert_eq!(topological_sort(&tasks, &deps), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_diamond_tie_break_is_fifo() {
        let tasks = make_tasks(&["t1", "t2", "t3", "t4"]);
        let deps = make_deps(&[("t4", "t2"), ("t4", "t3"), ("t2", "t1"), ("t3", "t1")]);
        assert_eq!(
            topological_sort(&tasks, &deps),
            vec!["t1", "t2", "t3", "t4"]
        );

        // Swapping t2 and t3 in the input swaps them in the output
        let tasks = make_tasks(&["t1", "t3", "t2", "t4"]);
        assert_eq!(
            topological_sort(&tasks, &deps),
            vec!["t1", "t3", "t2", "t4"]
        );
    }

    #[test]
    fn test_ready_roots_before_later_discoveries() {
        // x and y are ready immediately; b only becomes ready once a is dequeued
        let tasks = make_tasks(&["a", "b", "x", "y"]);
        let deps = make_deps(&[("b", "a")]);
        assert_eq!(topological_sort(&tasks, &deps), vec!["a", "x", "y", "b"]);
    }

    #[test]
    fn test_every_edge_respected() {
        let tasks = make_tasks(&["e", "d", "c", "b", "a"]);
        let edges = [("e", "d"), ("e", "a"), ("d", "c"), ("c", "b"), ("b", "a")];
        let order = topological_sort(&tasks, &make_deps(&edges));

        assert_eq!(order.len(), 5);
        for (task, on) in edges {
            assert!(position(&order, on) < position(&order, task));
        }
    }

    #[test]
    fn test_duplicate_edges_counted_once() {
        let tasks = make_tasks(&["a", "b"]);
        let deps = make_deps(&[("b", "a"), ("b", "a")]);
        assert_eq!(topological_sort(&tasks, &deps), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_members_left_out() {
        let tasks = make_tasks(&["a", "b", "c", "free"]);
        let deps = make_deps(&[("a", "b"), ("b", "a"), ("c", "b")]);
        assert_eq!(topological_sort(&tasks, &deps), vec!["free"]);
    }
}
