//! Prerequisite-respecting learning orders
//!
//! Three flavours of Kahn's algorithm share the same in-degree bookkeeping
//! and differ only in how the zero in-degree frontier is drained:
//!
//! - `sort`: first-in-first-out, seeded in vertex order
//! - `sort_with_priority`: ascending difficulty, ties in arrival order
//! - `personalized_sort`: ascending `(1 - mastery) * difficulty` over
//!   incomplete topics only
//!
//! The first two reject cyclic graphs with `AlgorithmError::CycleDetected`.
//! The personalized variant returns whatever it could order: topics behind
//! a completed one or on a cycle are simply missing.
//!
//! `all_orderings` enumerates every valid order by backtracking. It is
//! exponential in the worst case and meant for small graphs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::algorithm::traits::{
    parse_count_parameter, AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmParameter,
    LearningAlgorithm, ParameterConstraints, ParameterType, TopicId,
};
use crate::config::ScheduleConfig;
use crate::data_structures::graph::{Topic, TopicGraph};
use crate::data_structures::priority_queue::StablePriorityQueue;

/// Kahn-based scheduler over a topic graph
#[derive(Debug, Clone, Default)]
pub struct TopologicalScheduler {
    config: ScheduleConfig,
}

impl TopologicalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Classic Kahn ordering with a FIFO frontier
    pub fn sort(&self, graph: &TopicGraph) -> Result<Vec<TopicId>, AlgorithmError> {
        let mut in_degree = initial_in_degrees(graph);
        let mut queue: VecDeque<&str> = graph
            .vertices()
            .map(TopicId::as_str)
            .filter(|v| in_degree.get(v).copied() == Some(0))
            .collect();
        let mut order = Vec::with_capacity(graph.len());

        while let Some(current) = queue.pop_front() {
            order.push(TopicId::from(current));

            for dependent in graph.neighbors(current) {
                if release(&mut in_degree, dependent.as_str()) {
                    queue.push_back(dependent.as_str());
                }
            }
        }

        ensure_complete(order, graph.len())
    }

    /// Kahn ordering that always takes the easiest available topic
    pub fn sort_with_priority(&self, graph: &TopicGraph) -> Result<Vec<TopicId>, AlgorithmError> {
        let order = drain_by_priority(graph, |topic| topic.difficulty, false);
        ensure_complete(order, graph.len())
    }

    /// Orders the remaining work for this learner, taking the lowest
    /// `(1 - mastery) * difficulty` topic first.
    ///
    /// Completed topics are never scheduled and never count as satisfied
    /// here, so anything downstream of one is left out along with them.
    /// Cycles likewise leave the topics on them out of the result.
    pub fn personalized_sort(&self, graph: &TopicGraph) -> Vec<TopicId> {
        let order = drain_by_priority(graph, personalized_priority, true);
        debug!(
            "Personalized order covers {} of {} topics",
            order.len(),
            graph.len()
        );
        order
    }

    /// Every valid topological order, stopping after `max_orderings` when
    /// configured. A cyclic graph yields no orderings; an empty graph
    /// yields a single empty one.
    pub fn all_orderings(&self, graph: &TopicGraph) -> Vec<Vec<TopicId>> {
        let mut search = OrderingSearch::new(graph, self.config.max_orderings);
        search.backtrack();
        debug!("Enumerated {} orderings", search.orderings.len());
        search.orderings
    }
}

/// Frontier weight used by `personalized_sort`
pub fn personalized_priority(topic: &Topic) -> f64 {
    (1.0 - topic.mastery()) * topic.difficulty
}

fn initial_in_degrees(graph: &TopicGraph) -> HashMap<&str, usize> {
    graph
        .vertices()
        .map(|v| (v.as_str(), graph.in_degree(v.as_str())))
        .collect()
}

/// Removes one incoming edge; true when the vertex just became free
fn release(in_degree: &mut HashMap<&str, usize>, vertex: &str) -> bool {
    match in_degree.get_mut(vertex) {
        Some(degree) if *degree > 0 => {
            *degree -= 1;
            *degree == 0
        }
        _ => false,
    }
}

fn ensure_complete(order: Vec<TopicId>, total: usize) -> Result<Vec<TopicId>, AlgorithmError> {
    if order.len() < total {
        debug!("Topological order stalled at {} of {} topics", order.len(), total);
        return Err(AlgorithmError::CycleDetected {
            ordered: order.len(),
            total,
        });
    }
    Ok(order)
}

/// Kahn's algorithm with a min-priority frontier. With `skip_completed`,
/// a completed topic is dropped when it becomes free. It never enters the
/// frontier and never releases its dependents.
fn drain_by_priority<F>(graph: &TopicGraph, priority: F, skip_completed: bool) -> Vec<TopicId>
where
    F: Fn(&Topic) -> f64,
{
    let mut in_degree = initial_in_degrees(graph);
    let mut frontier: StablePriorityQueue<&str> = StablePriorityQueue::new();
    let mut freed: VecDeque<&str> = graph
        .vertices()
        .map(TopicId::as_str)
        .filter(|v| in_degree.get(v).copied() == Some(0))
        .collect();
    let mut order = Vec::new();

    loop {
        while let Some(vertex) = freed.pop_front() {
            let Some(topic) = graph.topic(vertex) else {
                continue;
            };

            if skip_completed && topic.is_completed() {
                trace!("Dropping completed topic {}", vertex);
            } else {
                frontier.push(vertex, priority(topic));
            }
        }

        let Some((current, weight)) = frontier.pop() else {
            break;
        };
        trace!("Scheduling {} (priority {:.3})", current, weight);
        order.push(TopicId::from(current));

        for dependent in graph.neighbors(current) {
            if release(&mut in_degree, dependent.as_str()) {
                freed.push_back(dependent.as_str());
            }
        }
    }

    order
}

/// Backtracking state for `all_orderings`, indexed by vertex position
struct OrderingSearch<'g> {
    vertices: Vec<&'g TopicId>,
    dependents: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    placed: Vec<bool>,
    current: Vec<usize>,
    orderings: Vec<Vec<TopicId>>,
    limit: Option<usize>,
}

impl<'g> OrderingSearch<'g> {
    fn new(graph: &'g TopicGraph, limit: Option<usize>) -> Self {
        let vertices: Vec<&TopicId> = graph.vertices().collect();
        let index: HashMap<&str, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.as_str(), i))
            .collect();

        let dependents = vertices
            .iter()
            .map(|v| {
                graph
                    .neighbors(v.as_str())
                    .iter()
                    .filter_map(|d| index.get(d.as_str()).copied())
                    .collect()
            })
            .collect();
        let in_degree = vertices.iter().map(|v| graph.in_degree(v.as_str())).collect();
        let n = vertices.len();

        Self {
            vertices,
            dependents,
            in_degree,
            placed: vec![false; n],
            current: Vec::with_capacity(n),
            orderings: Vec::new(),
            limit,
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.map_or(false, |limit| self.orderings.len() >= limit)
    }

    fn backtrack(&mut self) {
        if self.limit_reached() {
            return;
        }

        if self.current.len() == self.vertices.len() {
            let ordering = self.current.iter().map(|&i| self.vertices[i].clone()).collect();
            self.orderings.push(ordering);
            return;
        }

        for v in 0..self.vertices.len() {
            if self.placed[v] || self.in_degree[v] != 0 {
                continue;
            }

            self.placed[v] = true;
            self.current.push(v);
            for &d in &self.dependents[v] {
                self.in_degree[d] -= 1;
            }

            self.backtrack();

            for &d in &self.dependents[v] {
                self.in_degree[d] += 1;
            }
            self.current.pop();
            self.placed[v] = false;

            if self.limit_reached() {
                return;
            }
        }
    }
}

impl LearningAlgorithm for TopologicalScheduler {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("kahn")
    }

    fn name(&self) -> &'static str {
        "Kahn Topological Scheduler"
    }

    fn category(&self) -> &'static str {
        "ordering"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O((V + E) log V)".to_string(),
            space_complexity: "O(V)".to_string(),
            worst_case: "O(V! * V) when enumerating all orderings".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter {
            name: "max_orderings".to_string(),
            value: self
                .config
                .max_orderings
                .map_or_else(|| "none".to_string(), |n| n.to_string()),
            value_type: ParameterType::Optional(Box::new(ParameterType::Integer)),
            constraints: Some(ParameterConstraints {
                min: Some(1.0),
                max: None,
            }),
        }]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "max_orderings" => {
                self.config.max_orderings = match value.trim() {
                    "" | "none" => None,
                    other => Some(parse_count_parameter(name, other)?),
                };
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: "Unknown parameter".to_string(),
            }),
        }
    }
}
