//! Pathwise algorithm framework
//! Recommendation algorithms over the topic graph
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod greedy;
pub mod path_finding;
pub mod topological;
pub mod traits;

pub use self::greedy::{
    can_learn_next, recursive_dependent_count, GreedySelector, LearningStrategy, StrategySuggestion,
    TimeAllocation,
};
pub use self::path_finding::*;
pub use self::topological::{personalized_priority, TopologicalScheduler};
pub use self::traits::*;
