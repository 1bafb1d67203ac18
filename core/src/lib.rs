//! # Pathwise
//!
//! Learning-path recommendation over a prerequisite graph of topics.
//!
//! A [`TopicGraph`] holds topics (difficulty, mastery, derived completion)
//! and prerequisite edges. Three algorithms query it:
//!
//! - [`PathFinder`]: A* search for the cheapest route to a goal topic
//! - [`GreedySelector`]: scores ready topics and picks what to study next
//! - [`TopologicalScheduler`]: Kahn orderings, plain or biased
//!
//! [`LearningPathManager`] bundles a graph with all three and is the usual
//! entry point.
//!
//! ```
//! use pathwise::{LearningPathManager, TopicAttributes};
//!
//! let mut manager = LearningPathManager::new();
//! manager.add_topic("A", TopicAttributes::new().with_difficulty(1.0).with_mastery(1.0));
//! manager.add_topic("B", TopicAttributes::new().with_difficulty(2.0));
//! manager.add_topic("C", TopicAttributes::new().with_difficulty(3.0));
//! manager.add_prerequisite("A", "B");
//! manager.add_prerequisite("B", "C");
//!
//! assert_eq!(manager.next_topic().unwrap(), "B");
//! ```
//!
//! The library logs through the `log` facade and never installs a logger.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod education;

pub use crate::algorithm::{
    AlgorithmError, GreedySelector, LearningAlgorithm, LearningStrategy, OptimalPath, PathFinder, PathResult,
    StrategySuggestion, TimeAllocation, TopicId, TopologicalScheduler,
};
pub use crate::config::{ConfigError, EngineConfig, PathConfig, ScheduleConfig, SelectorConfig};
pub use crate::data_structures::{GraphStats, Topic, TopicAttributes, TopicGraph, COMPLETION_THRESHOLD};
pub use crate::education::{
    Curriculum, CurriculumError, LearningPathManager, OrderingMode, PathError, QuestionBank, QuizOutcome,
    StaticQuestionBank,
};
