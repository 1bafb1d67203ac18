//! Greedy next-topic selection
//!
//! Scores ready topics by a weighted blend of mastery gap, importance and
//! ease, and picks the best one without any global lookahead:
//!
//! ```text
//! priority = 0.5 * (1 - mastery) + 0.3 * importance + 0.2 * (5 - difficulty) / 5
//! importance = min(recursive_dependents / 10, 1)
//! ```
//!
//! Difficulties above 5 give a negative ease factor, which is not clamped
//! in scoring. All selection functions are total: an empty or fully
//! completed graph yields empty results, never an error. The graph is only
//! mutated on a private clone when simulating a learning sequence.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    count_parameter, float_parameter, parse_count_parameter, parse_float_parameter,
    AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmParameter, LearningAlgorithm, TopicId,
};
use crate::config::SelectorConfig;
use crate::data_structures::graph::TopicGraph;

/// Share of a study budget assigned to one ready topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAllocation {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub minutes: u64,

    /// Priority rounded to two decimals
    pub priority: f64,
}

/// Named study strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStrategy {
    /// Average mastery is low: consolidate the basics
    Foundational,
    /// Many topics are ready at once
    Parallel,
    /// Most topics are completed
    Advanced,
    /// Steady progress
    Balanced,
}

impl LearningStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foundational => "foundational",
            Self::Parallel => "parallel",
            Self::Advanced => "advanced",
            Self::Balanced => "balanced",
        }
    }
}

/// Strategy recommendation with human-readable guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySuggestion {
    pub strategy: LearningStrategy,
    pub message: String,
    pub recommendation: String,
}

/// Greedy topic selector
#[derive(Debug, Clone, Default)]
pub struct GreedySelector {
    config: SelectorConfig,
}

impl GreedySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Weighted priority of a topic; `None` for unknown ids
    pub fn calculate_priority(&self, graph: &TopicGraph, id: &str) -> Option<f64> {
        let topic = graph.topic(id)?;

        let mastery_gap = 1.0 - topic.mastery();
        let importance = self.importance(graph, id);
        let difficulty_factor = self.difficulty_factor(topic.difficulty);

        Some(
            mastery_gap * self.config.mastery_weight
                + importance * self.config.importance_weight
                + difficulty_factor * self.config.difficulty_weight,
        )
    }

    /// `(max_difficulty - difficulty) / max_difficulty`, unclamped
    #[inline]
    pub fn difficulty_factor(&self, difficulty: f64) -> f64 {
        (self.config.max_difficulty - difficulty) / self.config.max_difficulty
    }

    /// Dependent count normalized into [0, 1]
    pub fn importance(&self, graph: &TopicGraph, id: &str) -> f64 {
        (recursive_dependent_count(graph, id) / self.config.max_dependents).min(1.0)
    }

    /// Highest-priority ready topic; the first one seen wins ties
    pub fn select_next_topic(&self, graph: &TopicGraph) -> Option<TopicId> {
        let mut best: Option<TopicId> = None;
        let mut highest = f64::NEG_INFINITY;

        for id in graph.ready_topics() {
            if let Some(priority) = self.calculate_priority(graph, id.as_str()) {
                if priority > highest {
                    highest = priority;
                    best = Some(id);
                }
            }
        }

        best
    }

    /// Top `count` ready topics by descending priority
    pub fn select_next_topics(&self, graph: &TopicGraph, count: usize) -> Vec<TopicId> {
        let mut scored = self.score_ready_topics(graph);
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(count).map(|(id, _)| id).collect()
    }

    /// Order produced by repeatedly taking the next topic and marking it
    /// fully mastered on a private clone. Topics that never become ready
    /// are left out.
    pub fn greedy_learning_sequence(&self, graph: &TopicGraph) -> Vec<TopicId> {
        let mut simulated = graph.clone();
        let mut sequence = Vec::new();

        while let Some(next) = self.select_next_topic(&simulated) {
            simulated.update_mastery(next.as_str(), 1.0);
            sequence.push(next);
        }

        debug!(
            "Greedy sequence covers {} of {} topics",
            sequence.len(),
            graph.len()
        );
        sequence
    }

    /// Completed topics with room for improvement, ranked by
    /// `(1 - mastery) + importance`
    pub fn select_topics_for_review(&self, graph: &TopicGraph, count: usize) -> Vec<TopicId> {
        let mut candidates: Vec<(TopicId, f64)> = graph
            .topics()
            .filter(|t| t.is_completed() && t.mastery() < self.config.review_mastery_ceiling)
            .map(|t| {
                let priority = (1.0 - t.mastery()) + self.importance(graph, t.id.as_str());
                (t.id.clone(), priority)
            })
            .collect();

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.into_iter().take(count).map(|(id, _)| id).collect()
    }

    /// Reorders `topics` so that no topic precedes its prerequisites,
    /// preferring higher-priority topics first. Stops early (returning a
    /// shorter sequence) when nothing left can be placed.
    pub fn optimize_path(&self, graph: &TopicGraph, topics: &[TopicId]) -> Vec<TopicId> {
        let mut remaining: IndexSet<TopicId> = IndexSet::with_capacity(topics.len());
        for id in topics {
            if graph.contains(id.as_str()) {
                remaining.insert(id.clone());
            } else {
                warn!("Ignoring unknown topic {} while optimizing path", id);
            }
        }

        let mut optimized: Vec<TopicId> = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let mut best: Option<&TopicId> = None;
            let mut best_score = f64::NEG_INFINITY;

            for id in &remaining {
                if !can_learn_next(graph, id.as_str(), &optimized) {
                    continue;
                }
                if let Some(score) = self.calculate_priority(graph, id.as_str()) {
                    if score > best_score {
                        best_score = score;
                        best = Some(id);
                    }
                }
            }

            // Scores that never compare greater (NaN) still get placed
            if best.is_none() {
                best = remaining
                    .iter()
                    .find(|id| can_learn_next(graph, id.as_str(), &optimized));
            }

            let Some(chosen) = best.cloned() else {
                debug!(
                    "Optimized path stopped with {} topics unplaceable",
                    remaining.len()
                );
                break;
            };

            remaining.shift_remove(&chosen);
            optimized.push(chosen);
        }

        optimized
    }

    /// Splits `available_minutes` across ready topics proportionally to
    /// their priority share. A topic with negative priority gets no time;
    /// when no priority is positive the budget is split evenly.
    pub fn study_time_allocation(&self, graph: &TopicGraph, available_minutes: u32) -> Vec<TimeAllocation> {
        let scored = self.score_ready_topics(graph);
        if scored.is_empty() {
            return Vec::new();
        }

        // Negative priorities receive no time
        let total: f64 = scored.iter().map(|(_, p)| p.max(0.0)).sum();
        let even_share = 1.0 / scored.len() as f64;

        let mut allocation: Vec<TimeAllocation> = scored
            .into_iter()
            .map(|(id, priority)| {
                let share = if total > 0.0 {
                    priority.max(0.0) / total
                } else {
                    even_share
                };
                let topic_name = graph
                    .topic(id.as_str())
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| id.0.clone());

                TimeAllocation {
                    minutes: (share * f64::from(available_minutes)).round() as u64,
                    priority: (priority * 100.0).round() / 100.0,
                    topic_name,
                    topic_id: id,
                }
            })
            .collect();

        allocation.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        allocation
    }

    /// Picks a strategy from aggregate stats, checking the rules in order
    pub fn suggest_strategy(&self, graph: &TopicGraph) -> StrategySuggestion {
        let stats = graph.stats();

        let (strategy, message, recommendation) = if stats.average_mastery < 0.5 {
            (
                LearningStrategy::Foundational,
                "Focus on mastering basics before advancing",
                "Spend more time on fundamental topics",
            )
        } else if stats.ready_topics > 5 {
            (
                LearningStrategy::Parallel,
                "Multiple topics available - learn in parallel",
                "Study 2-3 topics simultaneously",
            )
        } else if stats.completion_ratio() > 0.7 {
            (
                LearningStrategy::Advanced,
                "Focus on advanced topics and review",
                "Challenge yourself with difficult topics",
            )
        } else {
            (
                LearningStrategy::Balanced,
                "Maintain steady progress",
                "Continue current learning pace",
            )
        };

        StrategySuggestion {
            strategy,
            message: message.to_string(),
            recommendation: recommendation.to_string(),
        }
    }

    fn score_ready_topics(&self, graph: &TopicGraph) -> Vec<(TopicId, f64)> {
        graph
            .ready_topics()
            .into_iter()
            .filter_map(|id| {
                let priority = self.calculate_priority(graph, id.as_str())?;
                Some((id, priority))
            })
            .collect()
    }
}

/// True iff `id` is known and each prerequisite is completed or already
/// in `already_learned`
pub fn can_learn_next(graph: &TopicGraph, id: &str, already_learned: &[TopicId]) -> bool {
    graph.contains(id)
        && graph.prerequisites(id).iter().all(|prereq| {
            graph.topic(prereq.as_str()).map_or(false, |t| t.is_completed())
                || already_learned.contains(prereq)
        })
}

/// Direct dependents count 1 each; every dependent adds half of its own
/// recursive count. Edges back onto the current path are counted once and
/// not followed, so cyclic input terminates.
pub fn recursive_dependent_count(graph: &TopicGraph, id: &str) -> f64 {
    let Some(topic) = graph.topic(id) else {
        return 0.0;
    };

    let mut memo = HashMap::new();
    let mut on_path = HashSet::new();
    count_dependents(graph, topic.id.as_str(), &mut memo, &mut on_path)
}

fn count_dependents<'g>(
    graph: &'g TopicGraph,
    id: &'g str,
    memo: &mut HashMap<&'g str, f64>,
    on_path: &mut HashSet<&'g str>,
) -> f64 {
    if let Some(&count) = memo.get(id) {
        return count;
    }

    on_path.insert(id);
    let mut count = 0.0;
    for dependent in graph.neighbors(id) {
        count += 1.0;
        if on_path.contains(dependent.as_str()) {
            warn!("Cycle through {} -> {} while counting dependents", id, dependent);
            continue;
        }
        count += count_dependents(graph, dependent.as_str(), memo, on_path) * 0.5;
    }
    on_path.remove(id);

    memo.insert(id, count);
    count
}

impl LearningAlgorithm for GreedySelector {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("greedy")
    }

    fn name(&self) -> &'static str {
        "Greedy Topic Selector"
    }

    fn category(&self) -> &'static str {
        "selection"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * (V + E)) per selection".to_string(),
            space_complexity: "O(V)".to_string(),
            worst_case: "O(V^2 * (V + E)) for a full greedy sequence".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            float_parameter("mastery_weight", self.config.mastery_weight, 0.0, None),
            float_parameter("importance_weight", self.config.importance_weight, 0.0, None),
            float_parameter("difficulty_weight", self.config.difficulty_weight, 0.0, None),
            float_parameter("max_dependents", self.config.max_dependents, f64::MIN_POSITIVE, None),
            float_parameter("max_difficulty", self.config.max_difficulty, f64::MIN_POSITIVE, None),
            float_parameter(
                "review_mastery_ceiling",
                self.config.review_mastery_ceiling,
                f64::MIN_POSITIVE,
                Some(1.0),
            ),
            count_parameter("default_count", self.config.default_count),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "mastery_weight" => self.config.mastery_weight = parse_float_parameter(name, value, 0.0, None)?,
            "importance_weight" => {
                self.config.importance_weight = parse_float_parameter(name, value, 0.0, None)?
            }
            "difficulty_weight" => {
                self.config.difficulty_weight = parse_float_parameter(name, value, 0.0, None)?
            }
            "max_dependents" => {
                self.config.max_dependents = parse_float_parameter(name, value, f64::MIN_POSITIVE, None)?
            }
            "max_difficulty" => {
                self.config.max_difficulty = parse_float_parameter(name, value, f64::MIN_POSITIVE, None)?
            }
            "review_mastery_ceiling" => {
                self.config.review_mastery_ceiling =
                    parse_float_parameter(name, value, f64::MIN_POSITIVE, Some(1.0))?
            }
            "default_count" => self.config.default_count = parse_count_parameter(name, value)?,
            _ => {
                return Err(AlgorithmError::InvalidParameter {
                    name: name.to_string(),
                    reason: "Unknown parameter".to_string(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::TopicAttributes;

    const EPS: f64 = 1e-12;

    fn topic(difficulty: f64, mastery: f64) -> TopicAttributes {
        TopicAttributes::new().with_difficulty(difficulty).with_mastery(mastery)
    }

    fn ids(list: &[TopicId]) -> Vec<&str> {
        list.iter().map(|id| id.as_str()).collect()
    }

    fn chain_graph() -> TopicGraph {
        let mut graph = TopicGraph::new();
        graph.add_vertex("A", topic(1.0, 1.0));
        graph.add_vertex("B", topic(2.0, 0.0));
        graph.add_vertex("C", topic(3.0, 0.0));
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph
    }

    // Two independent roots: "easy" with no dependents, "core" feeding two topics
    fn fork_graph() -> TopicGraph {
        let mut graph = TopicGraph::new();
        graph.add_vertex("easy", topic(1.0, 0.0));
        graph.add_vertex("core", topic(3.0, 0.0));
        graph.add_vertex("left", topic(2.0, 0.0));
        graph.add_vertex("right", topic(2.0, 0.0));
        graph.add_edge("core", "left");
        graph.add_edge("core", "right");
        graph
    }

    #[test]
    fn test_scenario_selects_b() {
        let graph = chain_graph();
        let selector = GreedySelector::new();

        assert_eq!(selector.select_next_topic(&graph), Some(TopicId::from("B")));
    }

    #[test]
    fn test_priority_formula() {
        let graph = chain_graph();
        let selector = GreedySelector::new();

        // B: gap 1, dependents 1 (C) -> importance 0.1, factor (5 - 2) / 5
        let expected = 0.5 * 1.0 + 0.3 * 0.1 + 0.2 * 0.6;
        let priority = selector.calculate_priority(&graph, "B").unwrap();
        assert!((priority - expected).abs() < EPS);

        assert!(selector.calculate_priority(&graph, "missing").is_none());
    }

    #[test]
    fn test_difficulty_above_five_is_not_clamped() {
        let selector = GreedySelector::new();
        assert!((selector.difficulty_factor(7.5) - (-0.5)).abs() < EPS);
        assert!((selector.difficulty_factor(0.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_recursive_dependent_count() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "d");
        graph.add_edge("c", "d");

        // d: 0, b: 1, c: 1, a: (1 + 0.5) + (1 + 0.5)
        assert_eq!(recursive_dependent_count(&graph, "d"), 0.0);
        assert_eq!(recursive_dependent_count(&graph, "b"), 1.0);
        assert_eq!(recursive_dependent_count(&graph, "a"), 3.0);
        assert_eq!(recursive_dependent_count(&graph, "missing"), 0.0);
    }

    #[test]
    fn test_dependent_count_terminates_on_cycle() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");

        // b's edge back to a counts once and is not followed
        assert_eq!(recursive_dependent_count(&graph, "a"), 1.5);
    }

    #[test]
    fn test_importance_saturates() {
        let mut graph = TopicGraph::new();
        for i in 0..15 {
            graph.add_edge("hub", format!("leaf{}", i));
        }
        let selector = GreedySelector::new();
        assert_eq!(selector.importance(&graph, "hub"), 1.0);
        assert_eq!(selector.importance(&graph, "leaf0"), 0.0);
    }

    #[test]
    fn test_ties_go_to_first_ready_topic() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("first", topic(2.0, 0.0));
        graph.add_vertex("second", topic(2.0, 0.0));

        let selector = GreedySelector::new();
        assert_eq!(selector.select_next_topic(&graph), Some(TopicId::from("first")));
        assert_eq!(ids(&selector.select_next_topics(&graph, 2)), vec!["first", "second"]);
    }

    #[test]
    fn test_select_next_topics_ranked() {
        let graph = fork_graph();
        let selector = GreedySelector::new();

        // core: 0.5 + 0.3 * 0.2 + 0.2 * 0.4 = 0.64; easy: 0.5 + 0 + 0.2 * 0.8 = 0.66
        assert_eq!(ids(&selector.select_next_topics(&graph, 5)), vec!["easy", "core"]);
        assert_eq!(ids(&selector.select_next_topics(&graph, 1)), vec!["easy"]);
        assert!(selector.select_next_topics(&graph, 0).is_empty());
    }

    #[test]
    fn test_empty_and_finished_graphs_select_nothing() {
        let selector = GreedySelector::new();
        assert!(selector.select_next_topic(&TopicGraph::new()).is_none());

        let mut done = TopicGraph::new();
        done.add_vertex("x", topic(1.0, 1.0));
        assert!(selector.select_next_topic(&done).is_none());
        assert!(selector.greedy_learning_sequence(&done).is_empty());
    }

    #[test]
    fn test_greedy_sequence_respects_prerequisites() {
        let graph = fork_graph();
        let selector = GreedySelector::new();
        let sequence = selector.greedy_learning_sequence(&graph);

        assert_eq!(sequence.len(), 4);
        let position = |id: &str| sequence.iter().position(|s| s == id).unwrap();
        assert!(position("core") < position("left"));
        assert!(position("core") < position("right"));

        // Original graph untouched
        assert_eq!(graph.topic("core").unwrap().mastery(), 0.0);
    }

    #[test]
    fn test_greedy_sequence_omits_unreachable_topics() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        graph.add_vertex("free", TopicAttributes::default());

        let sequence = GreedySelector::new().greedy_learning_sequence(&graph);
        assert_eq!(ids(&sequence), vec!["free"]);
    }

    #[test]
    fn test_review_candidates() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("solid", topic(1.0, 0.95));
        graph.add_vertex("shaky", topic(1.0, 0.72));
        graph.add_vertex("ok", topic(1.0, 0.8));
        graph.add_vertex("new", topic(1.0, 0.1));

        let selector = GreedySelector::new();
        let review = selector.select_topics_for_review(&graph, 3);
        assert_eq!(ids(&review), vec!["shaky", "ok"]);
        assert_eq!(ids(&selector.select_topics_for_review(&graph, 1)), vec!["shaky"]);
    }

    #[test]
    fn test_review_accounts_for_importance() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("leaf", topic(1.0, 0.75));
        graph.add_vertex("hub", topic(1.0, 0.8));
        for i in 0..10 {
            graph.add_edge("hub", format!("t{}", i));
        }

        let review = GreedySelector::new().select_topics_for_review(&graph, 2);
        assert_eq!(ids(&review), vec!["hub", "leaf"]);
    }

    #[test]
    fn test_optimize_path_orders_prerequisites_first() {
        let graph = fork_graph();
        let selector = GreedySelector::new();
        let input: Vec<TopicId> = ["left", "right", "core", "easy"].iter().map(|&s| s.into()).collect();

        let optimized = selector.optimize_path(&graph, &input);
        assert_eq!(optimized.len(), 4);
        // "easy" outranks "core" and both are placeable at the start
        assert_eq!(optimized[0], "easy");
        assert_eq!(optimized[1], "core");
    }

    #[test]
    fn test_optimize_path_returns_partial_result() {
        let graph = fork_graph();
        let selector = GreedySelector::new();
        // "core" is neither completed nor part of the input
        let input: Vec<TopicId> = ["left", "easy", "ghost"].iter().map(|&s| s.into()).collect();

        let optimized = selector.optimize_path(&graph, &input);
        assert_eq!(ids(&optimized), vec!["easy"]);
    }

    #[test]
    fn test_optimize_path_deduplicates_input() {
        let graph = fork_graph();
        let input: Vec<TopicId> = ["easy", "easy"].iter().map(|&s| s.into()).collect();
        assert_eq!(ids(&GreedySelector::new().optimize_path(&graph, &input)), vec!["easy"]);
    }

    #[test]
    fn test_can_learn_next() {
        let graph = fork_graph();
        assert!(can_learn_next(&graph, "core", &[]));
        assert!(!can_learn_next(&graph, "left", &[]));
        assert!(can_learn_next(&graph, "left", &[TopicId::from("core")]));
        assert!(!can_learn_next(&graph, "ghost", &[]));
    }

    #[test]
    fn test_study_time_allocation() {
        let graph = fork_graph();
        let allocation = GreedySelector::new().study_time_allocation(&graph, 130);

        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation[0].topic_id, "easy");
        assert_eq!(allocation[0].priority, 0.66);
        assert_eq!(allocation[1].priority, 0.64);
        // 130 * 0.66 / 1.30 = 66, 130 * 0.64 / 1.30 = 64
        assert_eq!(allocation[0].minutes, 66);
        assert_eq!(allocation[1].minutes, 64);
        assert_eq!(allocation[0].topic_name, "easy");
    }

    #[test]
    fn test_study_time_allocation_with_hard_topics() {
        // 0.5 * 0.5 + 0.2 * (5 - 15) / 5 = -0.15
        let mut graph = TopicGraph::new();
        graph.add_vertex("heavy", topic(15.0, 0.5));
        graph.add_vertex("easy", topic(1.0, 0.0));
        let selector = GreedySelector::new();

        let allocation = selector.study_time_allocation(&graph, 60);
        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation[0].topic_id, "easy");
        assert_eq!(allocation[0].minutes, 60);
        assert_eq!(allocation[1].topic_id, "heavy");
        assert_eq!(allocation[1].priority, -0.15);
        assert_eq!(allocation[1].minutes, 0);

        // Nothing positive to share, so the budget is split evenly
        let mut graph = TopicGraph::new();
        graph.add_vertex("heavy", topic(15.0, 0.5));
        graph.add_vertex("heavier", topic(15.0, 0.5));
        let allocation = selector.study_time_allocation(&graph, 60);
        assert!(allocation.iter().all(|a| a.minutes == 30));
        assert!(allocation.iter().all(|a| a.priority < 0.0));
    }

    #[test]
    fn test_study_time_allocation_without_ready_topics() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("done", topic(1.0, 1.0));
        assert!(GreedySelector::new().study_time_allocation(&graph, 60).is_empty());
    }

    #[test]
    fn test_strategy_decision_table() {
        let selector = GreedySelector::new();

        // Low average mastery
        let graph = fork_graph();
        assert_eq!(selector.suggest_strategy(&graph).strategy, LearningStrategy::Foundational);

        // Many ready topics
        let mut parallel = TopicGraph::new();
        for i in 0..6 {
            parallel.add_vertex(format!("done{}", i), topic(1.0, 1.0));
            parallel.add_vertex(format!("open{}", i), topic(1.0, 0.6));
        }
        assert_eq!(selector.suggest_strategy(&parallel).strategy, LearningStrategy::Parallel);

        // Mostly completed
        let mut advanced = TopicGraph::new();
        for i in 0..4 {
            advanced.add_vertex(format!("done{}", i), topic(1.0, 0.9));
        }
        advanced.add_vertex("open", topic(1.0, 0.5));
        assert_eq!(selector.suggest_strategy(&advanced).strategy, LearningStrategy::Advanced);

        // Neither
        let mut balanced = TopicGraph::new();
        balanced.add_vertex("done", topic(1.0, 0.8));
        balanced.add_vertex("open", topic(1.0, 0.6));
        let suggestion = selector.suggest_strategy(&balanced);
        assert_eq!(suggestion.strategy, LearningStrategy::Balanced);
        assert_eq!(suggestion.strategy.as_str(), "balanced");
        assert_eq!(suggestion.message, "Maintain steady progress");
    }

    #[test]
    fn test_parameter_setting() {
        let mut selector = GreedySelector::new();
        assert!(selector.set_parameter("importance_weight", "0.6").is_ok());
        assert_eq!(selector.config().importance_weight, 0.6);
        assert_eq!(selector.get_parameter("importance_weight").as_deref(), Some("0.6"));

        assert!(selector.set_parameter("max_dependents", "0").is_err());
        assert!(selector.set_parameter("review_mastery_ceiling", "1.5").is_err());
        assert!(selector.set_parameter("default_count", "2").is_ok());
        assert!(selector.set_parameter("bogus", "1").is_err());
    }
}
