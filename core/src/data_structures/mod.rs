//! Pathwise data structures
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod priority_queue;

pub use self::graph::{GraphStats, Topic, TopicAttributes, TopicGraph, COMPLETION_THRESHOLD, DEFAULT_DIFFICULTY};
pub use self::priority_queue::StablePriorityQueue;
