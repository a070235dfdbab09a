//! Dependency graph analysis: cycle detection and blocker counts.
//!
//! Edges run from a task to each of its dependencies. Dependency ids that
//! do not name a task in the same batch are dropped when the graph is built,
//! so both passes ignore them.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::task::{Task, TaskId};

/// Traversal depth at which cycle detection stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Finished,
}

/// A closed loop of task ids: the first id is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(Vec<TaskId>);

impl Cycle {
    pub fn ids(&self) -> &[TaskId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.0.contains(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycles: Vec<Cycle>,
    /// Edges skipped because following them would exceed the depth limit.
    pub abandoned_edges: usize,
}

impl CycleReport {
    pub fn is_truncated(&self) -> bool {
        self.abandoned_edges > 0
    }
}

/// How many other tasks depend on each task in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockerCounts(HashMap<TaskId, u32>);

impl BlockerCounts {
    /// Count for `id`; zero for unknown ids.
    pub fn get(&self, id: &TaskId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, u32)> {
        self.0.iter().map(|(id, n)| (id, *n))
    }
}

/// Index-based view of a task batch.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    ids: Vec<TaskId>,
    index: HashMap<TaskId, usize>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Build the graph from a batch.
    ///
    /// A task without an id is keyed by its position. When ids repeat, the
    /// node keeps its first position and the last task's dependencies.
    pub fn build(tasks: &[Task]) -> Self {
        let mut ids: Vec<TaskId> = Vec::new();
        let mut index: HashMap<TaskId, usize> = HashMap::new();
        let mut raw_deps: Vec<&[TaskId]> = Vec::new();

        for (pos, task) in tasks.iter().enumerate() {
            let id = task.id.clone().unwrap_or(TaskId::Int(pos as i64));
            match index.get(&id) {
                Some(&node) => raw_deps[node] = task.dependencies.as_slice(),
                None => {
                    index.insert(id.clone(), ids.len());
                    ids.push(id);
                    raw_deps.push(task.dependencies.as_slice());
                }
            }
        }

        let edges: Vec<Vec<usize>> = raw_deps
            .iter()
            .map(|deps| deps.iter().filter_map(|d| index.get(d).copied()).collect::<Vec<_>>())
            .collect();

        Self { ids, index, edges }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.index.contains_key(id)
    }

    /// Known dependencies of `id`, in declaration order.
    pub fn dependencies_of(&self, id: &TaskId) -> Vec<&TaskId> {
        self.index
            .get(id)
            .map(|&n| self.edges[n].iter().map(|&d| &self.ids[d]).collect())
            .unwrap_or_default()
    }

    /// Depth-first cycle search, roots taken in input order.
    ///
    /// Uses an explicit frame stack. Once the current path is `max_depth`
    /// long, further unvisited children are skipped (left unvisited, so a
    /// later root may still reach them).
    pub fn detect_cycles(&self, max_depth: usize) -> CycleReport {
        let max_depth = max_depth.max(1);
        let mut state = vec![VisitState::Unvisited; self.ids.len()];
        let mut report = CycleReport::default();

        for root in 0..self.ids.len() {
            if state[root] != VisitState::Unvisited {
                continue;
            }

            state[root] = VisitState::InProgress;
            let mut path: Vec<usize> = vec![root];
            // Next edge to follow, one per frame on `path`.
            let mut cursor: Vec<usize> = vec![0];

            while let Some(&node) = path.last() {
                let frame = path.len() - 1;
                let Some(&dep) = self.edges[node].get(cursor[frame]) else {
                    state[node] = VisitState::Finished;
                    path.pop();
                    cursor.pop();
                    continue;
                };
                cursor[frame] += 1;

                match state[dep] {
                    VisitState::Unvisited => {
                        if path.len() >= max_depth {
                            report.abandoned_edges += 1;
                            continue;
                        }
                        state[dep] = VisitState::InProgress;
                        path.push(dep);
                        cursor.push(0);
                    }
                    VisitState::InProgress => {
                        let ids = match path.iter().position(|&p| p == dep) {
                            Some(start) => path[start..]
                                .iter()
                                .chain(std::iter::once(&dep))
                                .map(|&n| self.ids[n].clone())
                                .collect(),
                            None => vec![self.ids[dep].clone(), self.ids[node].clone()],
                        };
                        report.cycles.push(Cycle(ids));
                    }
                    VisitState::Finished => {}
                }
            }
        }

        if report.is_truncated() {
            tracing::warn!(
                abandoned_edges = report.abandoned_edges,
                max_depth,
                "dependency chain exceeds traversal depth; cycle report may be incomplete"
            );
        }

        report
    }

    /// Count, per task, the other tasks that list it as a dependency.
    ///
    /// Every task id gets an entry. Self-dependencies are ignored and a
    /// dependency listed twice by one task counts once.
    pub fn blocker_counts(&self) -> BlockerCounts {
        let mut counts: Vec<u32> = vec![0; self.ids.len()];
        for (node, deps) in self.edges.iter().enumerate() {
            let mut seen: HashSet<usize> = HashSet::new();
            for &dep in deps {
                if dep != node && seen.insert(dep) {
                    counts[dep] += 1;
                }
            }
        }

        BlockerCounts(self.ids.iter().cloned().zip(counts).collect())
    }
}

/// Cycles in a batch, using the default depth limit.
pub fn detect_cycles(tasks: &[Task]) -> Vec<Cycle> {
    detect_cycles_with_limit(tasks, DEFAULT_MAX_DEPTH).cycles
}

pub fn detect_cycles_with_limit(tasks: &[Task], max_depth: usize) -> CycleReport {
    DependencyGraph::build(tasks).detect_cycles(max_depth)
}

pub fn count_blockers(tasks: &[Task]) -> BlockerCounts {
    DependencyGraph::build(tasks).blocker_counts()
}
