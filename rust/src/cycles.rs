//! Cycle detection over the finish-to-start dependency graph.

use crate::config::SchedulingConfig;
use crate::graph::DependencyGraph;
use crate::interner::TaskIdx;
use crate::log_checks;
use crate::models::{Task, TaskDependency};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnStack,
    Done,
}

/// Depth-first search from every unvisited node, following task -> prerequisite.
///
/// A cycle exists iff the walk reaches a node that is still on the current
/// path. Uses an explicit stack so long dependency chains cannot overflow the
/// thread stack. O(V + E).
pub(crate) fn graph_has_cycle(graph: &DependencyGraph, verbosity: u8) -> bool {
    let n = graph.len();
    let mut state = vec![Visit::Unvisited; n];
    // (node, position of the next prerequisite to explore)
    let mut stack: Vec<(TaskIdx, usize)> = Vec::new();

    for root in 0..n as TaskIdx {
        if state[root as usize] != Visit::Unvisited {
            continue;
        }
        state[root as usize] = Visit::OnStack;
        stack.push((root, 0));

        while let Some(&(node, pos)) = stack.last() {
            let Some(&next) = graph.prerequisites_of(node).get(pos) else {
                state[node as usize] = Visit::Done;
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            match state[next as usize] {
                Visit::Unvisited => {
                    state[next as usize] = Visit::OnStack;
                    stack.push((next, 0));
                }
                Visit::OnStack => {
                    log_checks!(
                        verbosity,
                        "Cycle: {} depends on {}, which is still on the path",
                        graph.id(node),
                        graph.id(next)
                    );
                    return true;
                }
                Visit::Done => {}
            }
        }
    }

    false
}

/// Return true if the dependency edges contain any cycle, self loops included.
pub fn detect_cycles(tasks: &[Task], dependencies: &[TaskDependency]) -> bool {
    detect_cycles_with_config(tasks, dependencies, &SchedulingConfig::default())
}

pub fn detect_cycles_with_config(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    config: &SchedulingConfig,
) -> bool {
    let graph = DependencyGraph::build(tasks, dependencies);
    graph_has_cycle(&graph, config.verbosity)
}

/// Probe whether adding "`task_id` depends on `depends_on_task_id`" would close a cycle.
///
/// The candidate edge is appended to a copy of the edge list and run through
/// the regular detector; the caller's list is left untouched.
pub fn would_create_cycle(
    tasks: &[Task],
    dependencies: &[TaskDependency],
    task_id: &str,
    depends_on_task_id: &str,
) -> bool {
    let mut candidate = Vec::with_capacity(dependencies.len() + 1);
    candidate.extend_from_slice(dependencies);
    candidate.push(TaskDependency {
        id: "candidate".to_string(),
        task_id: task_id.to_string(),
        depends_on_task_id: depends_on_task_id.to_string(),
    });
    detect_cycles(tasks, &candidate)
}
