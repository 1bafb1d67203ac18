//! Topic graph: the prerequisite DAG every recommendation algorithm queries
//!
//! Vertices are topics keyed by caller-supplied string identifiers and
//! edges are prerequisite relations directed from prerequisite to
//! dependent. The graph keeps vertices in insertion order, which is the
//! iteration order every tie-breaking rule in the engine relies on.
//!
//! # Invariants
//! - A vertex is registered at most once; re-adding it is a no-op
//! - Edges may name vertices that were never added; those are created
//!   with default data
//! - `completed` is derived from mastery (>= 0.7) and never stored independently
//! - In-degree grows with every added edge, duplicates included
//! - Acyclicity is not enforced on insertion; `has_cycle` is an explicit query
//!
//! # Complexity
//! - add_vertex / add_edge: O(1) amortized
//! - prerequisites: O(V + E) reverse scan
//! - has_cycle: O(V + E), iterative so deep chains cannot exhaust the stack
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::TopicId;

/// Mastery at or above which a topic counts as completed
pub const COMPLETION_THRESHOLD: f64 = 0.7;

/// Difficulty assigned when none (or a non-positive one) is supplied
pub const DEFAULT_DIFFICULTY: f64 = 1.0;

/// Caller-supplied topic fields, merged with defaults on registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicAttributes {
    /// Display name, defaults to the topic id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Positive difficulty, conventionally 1-5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,

    /// Initial mastery in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery: Option<f64>,

    /// Unrecognized fields, preserved opaquely
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl TopicAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_mastery(mut self, mastery: f64) -> Self {
        self.mastery = Some(mastery);
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

/// A learnable unit with difficulty, mastery and derived completion state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    /// Topic identifier
    pub id: TopicId,

    /// Display name
    pub name: String,

    /// Difficulty (positive, unbounded)
    pub difficulty: f64,

    mastery: f64,

    completed: bool,

    /// Caller extension fields
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl Topic {
    fn from_attributes(id: TopicId, attributes: TopicAttributes) -> Self {
        let TopicAttributes {
            name,
            difficulty,
            mastery,
            extensions,
        } = attributes;

        let difficulty = match difficulty {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                warn!("Topic {}: difficulty {} is not positive, using {}", id, d, DEFAULT_DIFFICULTY);
                DEFAULT_DIFFICULTY
            }
            None => DEFAULT_DIFFICULTY,
        };
        let mastery = sanitize_mastery(&id, mastery.unwrap_or(0.0));

        Self {
            name: name.unwrap_or_else(|| id.0.clone()),
            id,
            difficulty,
            mastery,
            completed: mastery >= COMPLETION_THRESHOLD,
            extensions,
        }
    }

    #[inline]
    pub fn mastery(&self) -> f64 {
        self.mastery
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Sets mastery and recomputes completion
    fn set_mastery(&mut self, mastery: f64) {
        self.mastery = sanitize_mastery(&self.id, mastery);
        self.completed = self.mastery >= COMPLETION_THRESHOLD;
    }
}

fn sanitize_mastery(id: &TopicId, mastery: f64) -> f64 {
    if !mastery.is_finite() {
        warn!("Topic {}: mastery {} is not finite, using 0", id, mastery);
        return 0.0;
    }
    let clamped = mastery.clamp(0.0, 1.0);
    if clamped != mastery {
        warn!("Topic {}: mastery {} clamped to {}", id, mastery, clamped);
    }
    clamped
}

/// Vertex storage: topic data plus outgoing adjacency and in-degree
#[derive(Debug, Clone)]
struct TopicNode {
    topic: Topic,

    /// Dependents of this topic, duplicates preserved
    dependents: Vec<TopicId>,

    in_degree: usize,
}

/// Aggregate read-only summary of a graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub average_mastery: f64,
    pub ready_topics: usize,
}

impl GraphStats {
    /// Completed / total, zero for an empty graph
    pub fn completion_ratio(&self) -> f64 {
        if self.total_topics == 0 {
            0.0
        } else {
            self.completed_topics as f64 / self.total_topics as f64
        }
    }
}

/// Prerequisite graph over topics
///
/// `Clone` is a deep copy: mutating a clone never affects the original.
#[derive(Debug, Clone, Default)]
pub struct TopicGraph {
    nodes: IndexMap<TopicId, TopicNode>,
    edge_count: usize,
}

/// DFS colouring for cycle detection
#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

impl TopicGraph {
    /// Create a new empty topic graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a topic. Returns false (and leaves the existing data
    /// untouched) when the id is already present.
    pub fn add_vertex(&mut self, id: impl Into<TopicId>, attributes: TopicAttributes) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            trace!("Topic {} already registered", id);
            return false;
        }

        let topic = Topic::from_attributes(id.clone(), attributes);
        self.nodes.insert(
            id,
            TopicNode {
                topic,
                dependents: Vec::new(),
                in_degree: 0,
            },
        );
        true
    }

    /// Adds a prerequisite edge `from -> to`, creating missing endpoints.
    /// Duplicate edges are kept and each one counts toward in-degree.
    pub fn add_edge(&mut self, from: impl Into<TopicId>, to: impl Into<TopicId>) {
        let from = from.into();
        let to = to.into();

        if !self.nodes.contains_key(&from) {
            self.add_vertex(from.clone(), TopicAttributes::default());
        }
        if !self.nodes.contains_key(&to) {
            self.add_vertex(to.clone(), TopicAttributes::default());
        }

        if let Some(node) = self.nodes.get_mut(&from) {
            node.dependents.push(to.clone());
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.in_degree += 1;
        }
        self.edge_count += 1;
    }

    /// All topic ids in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &TopicId> + '_ {
        self.nodes.keys()
    }

    /// All topics in insertion order
    pub fn topics(&self) -> impl Iterator<Item = &Topic> + '_ {
        self.nodes.values().map(|node| &node.topic)
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.nodes.get(id).map(|node| &node.topic)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges added, duplicates included
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Topics that list `id` as a prerequisite (outgoing edges)
    pub fn neighbors(&self, id: &str) -> &[TopicId] {
        self.nodes
            .get(id)
            .map(|node| node.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Topics with an edge into `id`, each listed once, in vertex order
    pub fn prerequisites(&self, id: &str) -> Vec<TopicId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.dependents.iter().any(|d| d.as_str() == id))
            .map(|(source, _)| source.clone())
            .collect()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.nodes.get(id).map_or(0, |node| node.in_degree)
    }

    /// True iff every prerequisite of `id` is completed. An unknown id has
    /// no prerequisites and is therefore ready.
    pub fn is_ready(&self, id: &str) -> bool {
        self.nodes
            .iter()
            .filter(|(_, node)| node.dependents.iter().any(|d| d.as_str() == id))
            .all(|(_, node)| node.topic.completed)
    }

    /// Incomplete topics whose prerequisites are all completed, in vertex order
    pub fn ready_topics(&self) -> Vec<TopicId> {
        self.nodes
            .iter()
            .filter(|(id, node)| !node.topic.completed && self.is_ready(id.as_str()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Sets mastery and recomputes completion. Returns false if `id` is absent.
    pub fn update_mastery(&mut self, id: &str, mastery: f64) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.topic.set_mastery(mastery);
                trace!(
                    "Topic {} mastery -> {:.3} (completed: {})",
                    id,
                    node.topic.mastery,
                    node.topic.completed
                );
                true
            }
            None => false,
        }
    }

    /// Depth-first search for a back edge into a vertex still on the stack
    pub fn has_cycle(&self) -> bool {
        let mut state: HashMap<&str, Visit> = HashMap::with_capacity(self.nodes.len());

        for root in self.nodes.keys() {
            if state.contains_key(root.as_str()) {
                continue;
            }

            // (vertex, index of the next dependent to explore)
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            state.insert(root.as_str(), Visit::OnStack);

            while let Some(frame) = stack.last_mut() {
                let vertex = frame.0;
                let dependents = self.neighbors(vertex);
                if frame.1 < dependents.len() {
                    let neighbor = dependents[frame.1].as_str();
                    frame.1 += 1;
                    match state.get(neighbor) {
                        Some(Visit::OnStack) => return true,
                        Some(Visit::Done) => {}
                        None => {
                            state.insert(neighbor, Visit::OnStack);
                            stack.push((neighbor, 0));
                        }
                    }
                } else {
                    state.insert(vertex, Visit::Done);
                    stack.pop();
                }
            }
        }

        false
    }

    /// Aggregate counts; no side effects
    pub fn stats(&self) -> GraphStats {
        let total_topics = self.nodes.len();
        let completed_topics = self.topics().filter(|t| t.completed).count();
        let total_mastery: f64 = self.topics().map(|t| t.mastery).sum();

        GraphStats {
            total_topics,
            completed_topics,
            average_mastery: if total_topics > 0 {
                total_mastery / total_topics as f64
            } else {
                0.0
            },
            ready_topics: self.ready_topics().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> TopicGraph {
        let mut graph = TopicGraph::new();
        graph.add_vertex("A", TopicAttributes::new().with_difficulty(1.0).with_mastery(1.0));
        graph.add_vertex("B", TopicAttributes::new().with_difficulty(2.0));
        graph.add_vertex("C", TopicAttributes::new().with_difficulty(3.0));
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph
    }

    #[test]
    fn test_add_vertex_merges_defaults() {
        let mut graph = TopicGraph::new();
        assert!(graph.add_vertex("intro", TopicAttributes::default()));

        let topic = graph.topic("intro").unwrap();
        assert_eq!(topic.name, "intro");
        assert_eq!(topic.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(topic.mastery(), 0.0);
        assert!(!topic.is_completed());
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("x", TopicAttributes::new().with_name("First").with_difficulty(2.0));
        assert!(!graph.add_vertex("x", TopicAttributes::new().with_name("Second").with_difficulty(4.0)));

        let topic = graph.topic("x").unwrap();
        assert_eq!(topic.name, "First");
        assert_eq!(topic.difficulty, 2.0);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_non_positive_difficulty_falls_back_to_default() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("zero", TopicAttributes::new().with_difficulty(0.0));
        graph.add_vertex("neg", TopicAttributes::new().with_difficulty(-3.0));

        assert_eq!(graph.topic("zero").unwrap().difficulty, 1.0);
        assert_eq!(graph.topic("neg").unwrap().difficulty, 1.0);
    }

    #[test]
    fn test_initial_mastery_derives_completion() {
        let mut graph = TopicGraph::new();
        graph.add_vertex("done", TopicAttributes::new().with_mastery(0.8));
        assert!(graph.topic("done").unwrap().is_completed());
    }

    #[test]
    fn test_add_edge_creates_missing_endpoints() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");

        assert!(graph.contains("a"));
        assert!(graph.contains("b"));
        assert_eq!(graph.neighbors("a"), &[TopicId::from("b")]);
        assert_eq!(graph.in_degree("b"), 1);
        assert_eq!(graph.in_degree("a"), 0);
    }

    #[test]
    fn test_duplicate_edges_inflate_in_degree() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");

        assert_eq!(graph.in_degree("b"), 2);
        assert_eq!(graph.neighbors("a").len(), 2);
        assert_eq!(graph.edge_count(), 2);
        // Reverse lookup still lists the prerequisite once
        assert_eq!(graph.prerequisites("b"), vec![TopicId::from("a")]);
    }

    #[test]
    fn test_missing_vertex_queries_are_total() {
        let graph = chain_graph();

        assert!(graph.neighbors("missing").is_empty());
        assert!(graph.prerequisites("missing").is_empty());
        assert_eq!(graph.in_degree("missing"), 0);
        assert!(graph.topic("missing").is_none());
    }

    #[test]
    fn test_unknown_topic_is_vacuously_ready() {
        let graph = chain_graph();

        assert!(graph.is_ready("missing"));
        assert!(!graph.ready_topics().contains(&TopicId::from("missing")));
        assert!(!graph.contains("missing"));
    }

    #[test]
    fn test_ready_topics_scenario() {
        let graph = chain_graph();

        assert!(graph.is_ready("A"));
        assert!(graph.is_ready("B"));
        assert!(!graph.is_ready("C"));
        assert_eq!(graph.ready_topics(), vec![TopicId::from("B")]);
    }

    #[test]
    fn test_update_mastery_threshold() {
        let mut graph = chain_graph();

        assert!(graph.update_mastery("B", 0.75));
        assert!(graph.topic("B").unwrap().is_completed());

        graph.update_mastery("B", 0.69);
        assert!(!graph.topic("B").unwrap().is_completed());

        graph.update_mastery("B", 0.7);
        assert!(graph.topic("B").unwrap().is_completed());

        assert!(!graph.update_mastery("missing", 1.0));
    }

    #[test]
    fn test_update_mastery_clamps_out_of_range() {
        let mut graph = chain_graph();

        graph.update_mastery("C", 1.5);
        assert_eq!(graph.topic("C").unwrap().mastery(), 1.0);

        graph.update_mastery("C", f64::NAN);
        assert_eq!(graph.topic("C").unwrap().mastery(), 0.0);
        assert!(!graph.topic("C").unwrap().is_completed());
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = chain_graph();
        assert!(!graph.has_cycle());

        graph.add_edge("C", "A");
        assert!(graph.has_cycle());

        let mut self_loop = TopicGraph::new();
        self_loop.add_edge("x", "x");
        assert!(self_loop.has_cycle());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut graph = TopicGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "d");
        graph.add_edge("c", "d");

        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_deep_chain_cycle_check_does_not_overflow() {
        let mut graph = TopicGraph::new();
        for i in 0..50_000 {
            graph.add_edge(format!("t{}", i), format!("t{}", i + 1));
        }
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = chain_graph();
        let mut copy = original.clone();

        copy.update_mastery("B", 1.0);
        copy.add_edge("C", "D");

        assert_eq!(original.topic("B").unwrap().mastery(), 0.0);
        assert_eq!(copy.topic("B").unwrap().mastery(), 1.0);
        assert!(!original.contains("D"));
    }

    #[test]
    fn test_stats() {
        let graph = chain_graph();
        let stats = graph.stats();

        assert_eq!(stats.total_topics, 3);
        assert_eq!(stats.completed_topics, 1);
        assert!((stats.average_mastery - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.ready_topics, 1);
        assert!((stats.completion_ratio() - 1.0 / 3.0).abs() < 1e-12);

        let empty = TopicGraph::new().stats();
        assert_eq!(empty.average_mastery, 0.0);
        assert_eq!(empty.completion_ratio(), 0.0);
    }

    #[test]
    fn test_attributes_preserve_extensions() {
        let json = r#"{"name": "Sorting", "difficulty": 2.5, "module": "week-3"}"#;
        let attributes: TopicAttributes = serde_json::from_str(json).unwrap();

        assert_eq!(attributes.name.as_deref(), Some("Sorting"));
        assert_eq!(attributes.difficulty, Some(2.5));
        assert_eq!(attributes.mastery, None);
        assert_eq!(attributes.extensions.get("module"), Some(&serde_json::json!("week-3")));

        let mut graph = TopicGraph::new();
        graph.add_vertex("sorting", attributes);
        assert_eq!(
            graph.topic("sorting").unwrap().extensions.get("module"),
            Some(&serde_json::json!("week-3"))
        );
    }
}
