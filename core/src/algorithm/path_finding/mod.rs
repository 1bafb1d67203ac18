//! Learning path search over the topic graph
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod astar;

pub use self::astar::{OptimalPath, PathFinder, PathResult, MASTERY_GAP_WEIGHT, MINUTES_PER_DIFFICULTY};
