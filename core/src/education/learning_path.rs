//! # Learning Path Manager
//!
//! Owns a learner's topic graph together with the three recommendation
//! algorithms and answers every query the engine supports: paths between
//! topics, what to study next, what to review, how to split a study
//! session, and full learning orders.
//!
//! ## Mutation
//!
//! The manager's graph is the authoritative learner state. It changes only
//! through `add_topic`, `add_prerequisite`, `update_mastery` and
//! `record_quiz`; every simulation (greedy sequencing, personalized
//! ordering) runs on a private clone.
//!
//! ## Computational Characteristics
//!
//! - Path queries: O((V + E) log V)
//! - Next-topic queries: O(V * (V + E))
//! - Learning order: O((V + E) log V), all orderings exponential
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::greedy::{GreedySelector, StrategySuggestion, TimeAllocation};
use crate::algorithm::path_finding::{OptimalPath, PathFinder, PathResult};
use crate::algorithm::topological::TopologicalScheduler;
use crate::algorithm::traits::{AlgorithmError, AlgorithmId, LearningAlgorithm, TopicId};
use crate::config::{ConfigError, EngineConfig};
use crate::data_structures::graph::{GraphStats, TopicAttributes, TopicGraph};
use crate::education::assessment::{grade_quiz, AssessmentError, QuestionBank, QuizOutcome};
use crate::education::curriculum::{Curriculum, CurriculumError};

/// Error types for learning path operations
#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Curriculum(#[from] CurriculumError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No algorithm with the requested id
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Which topological variant `learning_order` runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Plain Kahn order, every topic included
    #[default]
    Kahn,
    /// Easiest available topic first, every topic included
    EasiestFirst,
    /// Incomplete topics only, lowest remaining effort first
    Personalized,
}

/// Facade over one learner's topic graph
#[derive(Debug, Clone, Default)]
pub struct LearningPathManager {
    graph: TopicGraph,
    path_finder: PathFinder,
    selector: GreedySelector,
    scheduler: TopologicalScheduler,
}

impl LearningPathManager {
    /// Empty graph with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_graph(TopicGraph::new(), config)
    }

    pub fn from_graph(graph: TopicGraph, config: EngineConfig) -> Self {
        let EngineConfig {
            selector,
            path,
            schedule,
        } = config;

        Self {
            graph,
            path_finder: PathFinder::with_config(path),
            selector: GreedySelector::with_config(selector),
            scheduler: TopologicalScheduler::with_config(schedule),
        }
    }

    /// Builds the graph from a curriculum document
    pub fn from_curriculum(curriculum: &Curriculum, config: EngineConfig) -> Result<Self, PathError> {
        config.validate()?;
        let graph = curriculum.build_graph()?;
        Ok(Self::from_graph(graph, config))
    }

    pub fn graph(&self) -> &TopicGraph {
        &self.graph
    }

    pub fn into_graph(self) -> TopicGraph {
        self.graph
    }

    pub fn add_topic(&mut self, id: impl Into<TopicId>, attributes: TopicAttributes) -> bool {
        self.graph.add_vertex(id, attributes)
    }

    /// `prerequisite` must be completed before `topic` becomes ready
    pub fn add_prerequisite(&mut self, prerequisite: impl Into<TopicId>, topic: impl Into<TopicId>) {
        self.graph.add_edge(prerequisite, topic);
    }

    pub fn update_mastery(&mut self, id: &str, mastery: f64) -> Result<(), PathError> {
        if self.graph.update_mastery(id, mastery) {
            Ok(())
        } else {
            Err(AlgorithmError::UnknownTopic(TopicId::from(id)).into())
        }
    }

    /// Grades a quiz and stores its score as the topic's mastery
    pub fn record_quiz<B>(&mut self, bank: &B, topic: &str, answers: &[usize]) -> Result<QuizOutcome, PathError>
    where
        B: QuestionBank + ?Sized,
    {
        if !self.graph.contains(topic) {
            return Err(AlgorithmError::UnknownTopic(TopicId::from(topic)).into());
        }

        let outcome = grade_quiz(bank, topic, answers)?;
        self.graph.update_mastery(topic, outcome.score);
        debug!(
            "Quiz on {}: {}/{} correct (passed: {})",
            topic,
            outcome.correct,
            outcome.total,
            outcome.passed()
        );
        Ok(outcome)
    }

    pub fn path_between(&self, start: &str, goal: &str) -> Option<PathResult> {
        self.path_finder.find_path(&self.graph, start, goal)
    }

    /// Remaining (incomplete) topics on the way to `goal`
    pub fn optimal_path(&self, current: &str, goal: &str) -> Option<OptimalPath> {
        self.path_finder.find_optimal_path(&self.graph, current, goal)
    }

    pub fn alternative_paths(&self, start: &str, goal: &str) -> Vec<PathResult> {
        self.path_finder.alternative_paths(&self.graph, start, goal)
    }

    pub fn next_topic(&self) -> Option<TopicId> {
        self.selector.select_next_topic(&self.graph)
    }

    pub fn next_topics(&self, count: usize) -> Vec<TopicId> {
        self.selector.select_next_topics(&self.graph, count)
    }

    /// `next_topics` with the configured default count
    pub fn recommended_topics(&self) -> Vec<TopicId> {
        self.next_topics(self.selector.config().default_count)
    }

    pub fn review_topics(&self, count: usize) -> Vec<TopicId> {
        self.selector.select_topics_for_review(&self.graph, count)
    }

    pub fn allocate_study_time(&self, available_minutes: u32) -> Vec<TimeAllocation> {
        self.selector.study_time_allocation(&self.graph, available_minutes)
    }

    pub fn suggest_strategy(&self) -> StrategySuggestion {
        self.selector.suggest_strategy(&self.graph)
    }

    /// Learning order in the requested mode. Only the personalized mode
    /// tolerates cycles.
    pub fn learning_order(&self, mode: OrderingMode) -> Result<Vec<TopicId>, PathError> {
        let order = match mode {
            OrderingMode::Kahn => self.scheduler.sort(&self.graph)?,
            OrderingMode::EasiestFirst => self.scheduler.sort_with_priority(&self.graph)?,
            OrderingMode::Personalized => self.scheduler.personalized_sort(&self.graph),
        };
        Ok(order)
    }

    pub fn all_orderings(&self) -> Vec<Vec<TopicId>> {
        self.scheduler.all_orderings(&self.graph)
    }

    pub fn greedy_sequence(&self) -> Vec<TopicId> {
        self.selector.greedy_learning_sequence(&self.graph)
    }

    pub fn optimize_path(&self, topics: &[TopicId]) -> Vec<TopicId> {
        self.selector.optimize_path(&self.graph, topics)
    }

    pub fn has_cycle(&self) -> bool {
        self.graph.has_cycle()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    /// The managed algorithms, for introspection of their parameters
    pub fn algorithms(&self) -> [&dyn LearningAlgorithm; 3] {
        [&self.path_finder, &self.selector, &self.scheduler]
    }

    /// Sets a parameter on the algorithm with the given id
    pub fn configure(&mut self, algorithm: &str, name: &str, value: &str) -> Result<(), PathError> {
        let wanted = AlgorithmId::new(algorithm);
        let target: &mut dyn LearningAlgorithm = if self.path_finder.id() == wanted {
            &mut self.path_finder
        } else if self.selector.id() == wanted {
            &mut self.selector
        } else if self.scheduler.id() == wanted {
            &mut self.scheduler
        } else {
            return Err(PathError::UnknownAlgorithm(algorithm.to_string()));
        };

        target.set_parameter(name, value)?;
        debug!("Set {}.{} = {}", algorithm, name, value);
        Ok(())
    }
}
