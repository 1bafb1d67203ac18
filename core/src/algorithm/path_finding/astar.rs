//! A* Learning Path Search
//!
//! Finds the lowest-estimated-cost chain of topics from a starting topic to
//! a goal topic along prerequisite edges.
//!
//! # Cost Model
//!
//! Moving onto a topic costs `difficulty + 2 * (1 - mastery)` of that
//! destination topic, independent of where the move comes from. The
//! heuristic estimates the remaining distance from `current` to `goal` as
//! `|difficulty(goal) - difficulty(current)| + 2 * (1 - mastery(current))`.
//! The heuristic is domain-specific and not proven admissible, so the
//! search returns the best path *under this estimate*.
//!
//! # Frontier
//!
//! A stable min-priority queue keyed by f = g + h. Superseded entries stay
//! queued (lazy deletion); re-expanding one produces the same-or-worse
//! relaxations and is harmless.
//!
//! # Complexity
//! - find_path: O((V + E) log V) with lazy deletion
//! - find_alternative_paths: exhaustive simple-path enumeration,
//!   exponential in the worst case; intended for small graphs
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    count_parameter, parse_count_parameter, AlgorithmComplexity, AlgorithmError, AlgorithmId,
    AlgorithmParameter, LearningAlgorithm, TopicId,
};
use crate::config::PathConfig;
use crate::data_structures::graph::{Topic, TopicGraph};
use crate::data_structures::priority_queue::StablePriorityQueue;

/// Weight of the mastery gap in both the step cost and the heuristic
pub const MASTERY_GAP_WEIGHT: f64 = 2.0;

/// Study minutes per unit of difficulty at zero mastery
pub const MINUTES_PER_DIFFICULTY: f64 = 30.0;

/// A path between two topics with its accumulated cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Topics from start to goal, both inclusive
    pub path: Vec<TopicId>,

    /// Sum of destination step costs along the path
    pub cost: f64,

    /// Number of topics in the path
    pub length: usize,
}

impl PathResult {
    fn new(path: Vec<TopicId>, cost: f64) -> Self {
        let length = path.len();
        Self { path, cost, length }
    }
}

/// Remaining (incomplete) topics on the best path with study estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalPath {
    pub path: Vec<TopicId>,

    /// Rounded study time in minutes
    pub estimated_minutes: u64,

    /// Mean difficulty of the remaining topics, 0 when none remain
    pub average_difficulty: f64,
}

/// A* path search over the topic graph
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: PathConfig,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PathConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Estimated cost from `current` to `goal`
    #[inline]
    pub fn heuristic(current: &Topic, goal: &Topic) -> f64 {
        let difficulty_diff = (goal.difficulty - current.difficulty).abs();
        let mastery_gap = 1.0 - current.mastery();
        difficulty_diff + mastery_gap * MASTERY_GAP_WEIGHT
    }

    /// Cost of moving onto `to`
    #[inline]
    pub fn cost(to: &Topic) -> f64 {
        to.difficulty + (1.0 - to.mastery()) * MASTERY_GAP_WEIGHT
    }

    /// Lowest-estimated-cost path from `start` to `goal`; `None` when the goal
    /// is unreachable or either endpoint is unknown
    pub fn find_path(&self, graph: &TopicGraph, start: &str, goal: &str) -> Option<PathResult> {
        let start_topic = graph.topic(start)?;
        let goal_topic = graph.topic(goal)?;

        let mut open_set = StablePriorityQueue::new();
        let mut came_from: HashMap<TopicId, TopicId> = HashMap::new();
        let mut g_score: HashMap<TopicId, f64> = HashMap::new();

        g_score.insert(start_topic.id.clone(), 0.0);
        open_set.push(start_topic.id.clone(), Self::heuristic(start_topic, goal_topic));

        let mut expansions = 0usize;
        while let Some((current, f)) = open_set.pop() {
            expansions += 1;
            trace!("A* expand {} (f = {:.3})", current, f);

            if current.as_str() == goal {
                let cost = g_score.get(&current).copied().unwrap_or(0.0);
                let path = reconstruct_path(&came_from, current);
                debug!(
                    "A* found path {} -> {} ({} topics, cost {:.3}, {} expansions)",
                    start,
                    goal,
                    path.len(),
                    cost,
                    expansions
                );
                return Some(PathResult::new(path, cost));
            }

            let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
            for neighbor in graph.neighbors(current.as_str()) {
                let Some(neighbor_topic) = graph.topic(neighbor.as_str()) else {
                    continue;
                };
                let tentative_g = current_g + Self::cost(neighbor_topic);
                let known_g = g_score.get(neighbor).copied().unwrap_or(f64::INFINITY);

                if tentative_g < known_g {
                    came_from.insert(neighbor.clone(), current.clone());
                    g_score.insert(neighbor.clone(), tentative_g);
                    let f_score = tentative_g + Self::heuristic(neighbor_topic, goal_topic);
                    trace!("A* relax {} (g = {:.3}, f = {:.3})", neighbor, tentative_g, f_score);
                    open_set.push(neighbor.clone(), f_score);
                }
            }
        }

        debug!("A* found no path {} -> {} after {} expansions", start, goal, expansions);
        None
    }

    /// Best path filtered to topics not yet completed, with time and
    /// difficulty estimates
    pub fn find_optimal_path(&self, graph: &TopicGraph, current: &str, goal: &str) -> Option<OptimalPath> {
        let result = self.find_path(graph, current, goal)?;

        let path: Vec<TopicId> = result
            .path
            .into_iter()
            .filter(|id| graph.topic(id.as_str()).map_or(false, |t| !t.is_completed()))
            .collect();

        Some(OptimalPath {
            estimated_minutes: Self::estimate_time(graph, &path),
            average_difficulty: Self::path_difficulty(graph, &path),
            path,
        })
    }

    /// Sum of `30 * difficulty * (1 - mastery)` minutes, rounded
    pub fn estimate_time(graph: &TopicGraph, path: &[TopicId]) -> u64 {
        let total: f64 = path
            .iter()
            .filter_map(|id| graph.topic(id.as_str()))
            .map(|t| MINUTES_PER_DIFFICULTY * t.difficulty * (1.0 - t.mastery()))
            .sum();
        total.round() as u64
    }

    /// Average difficulty of the topics on `path`
    pub fn path_difficulty(graph: &TopicGraph, path: &[TopicId]) -> f64 {
        let difficulties: Vec<f64> = path
            .iter()
            .filter_map(|id| graph.topic(id.as_str()))
            .map(|t| t.difficulty)
            .collect();

        if difficulties.is_empty() {
            0.0
        } else {
            difficulties.iter().sum::<f64>() / difficulties.len() as f64
        }
    }

    /// Alternative paths with the configured default count
    pub fn alternative_paths(&self, graph: &TopicGraph, start: &str, goal: &str) -> Vec<PathResult> {
        self.find_alternative_paths(graph, start, goal, self.config.max_alternative_paths)
    }

    /// Enumerates simple start -> goal paths depth-first, stops descending
    /// once `max_paths` have been collected, and returns them cheapest first.
    ///
    /// Exponential in the worst case: the enumeration is exhaustive until
    /// the bound is hit.
    pub fn find_alternative_paths(
        &self,
        graph: &TopicGraph,
        start: &str,
        goal: &str,
        max_paths: usize,
    ) -> Vec<PathResult> {
        if max_paths == 0 || !graph.contains(start) || !graph.contains(goal) {
            return Vec::new();
        }

        let mut search = AlternativeSearch {
            graph,
            goal,
            max_paths,
            visited: HashSet::new(),
            found: Vec::new(),
        };
        let mut path = vec![TopicId::from(start)];
        search.explore(start, &mut path, 0.0);

        let mut paths = search.found;
        paths.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        paths.truncate(max_paths);

        debug!("Enumerated {} alternative paths {} -> {}", paths.len(), start, goal);
        paths
    }
}

/// Walks predecessor links back from `current` and reverses them
fn reconstruct_path(came_from: &HashMap<TopicId, TopicId>, current: TopicId) -> Vec<TopicId> {
    let mut path = vec![current];
    // Bounded by the number of predecessor links
    for _ in 0..=came_from.len() {
        let Some(previous) = path.last().and_then(|last| came_from.get(last)) else {
            break;
        };
        path.push(previous.clone());
    }
    path.reverse();
    path
}

/// Depth-first state for alternative path enumeration
struct AlternativeSearch<'a> {
    graph: &'a TopicGraph,
    goal: &'a str,
    max_paths: usize,
    visited: HashSet<&'a str>,
    found: Vec<PathResult>,
}

impl<'a> AlternativeSearch<'a> {
    fn explore(&mut self, current: &'a str, path: &mut Vec<TopicId>, cost: f64) {
        if current == self.goal {
            self.found.push(PathResult::new(path.clone(), cost));
            return;
        }

        if self.found.len() >= self.max_paths {
            return;
        }

        self.visited.insert(current);
        let graph = self.graph;
        for neighbor in graph.neighbors(current) {
            let neighbor = neighbor.as_str();
            if self.visited.contains(neighbor) {
                continue;
            }
            let Some(topic) = graph.topic(neighbor) else {
                continue;
            };

            path.push(topic.id.clone());
            self.explore(neighbor, path, cost + PathFinder::cost(topic));
            path.pop();
        }
        self.visited.remove(current);
    }
}

impl LearningAlgorithm for PathFinder {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("astar")
    }

    fn name(&self) -> &'static str {
        "A* Learning Path Search"
    }

    fn category(&self) -> &'static str {
        "path_finding"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O((V + E) log V)".to_string(),
            space_complexity: "O(V + E)".to_string(),
            worst_case: "O(V!) for alternative path enumeration".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![count_parameter("max_alternative_paths", self.config.max_alternative_paths)]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "max_alternative_paths" => {
                self.config.max_alternative_paths = parse_count_parameter(name, value)?;
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: "Unknown parameter".to_string(),
            }),
        }
    }
}
