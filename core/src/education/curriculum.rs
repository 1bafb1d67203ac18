//! Curriculum documents
//!
//! A curriculum is the serialized form of a subject: its topics with their
//! prerequisites and, optionally, the quiz bank used to assess them.
//! `build_graph` turns one into a validated [`TopicGraph`].
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::graph::{TopicAttributes, TopicGraph};
use crate::education::assessment::{AssessmentError, StaticQuestionBank};

/// Curriculum loading errors
#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("Failed to parse curriculum: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Topic {0} is declared more than once")]
    DuplicateTopic(String),

    #[error("Prerequisites of curriculum {0} form a cycle")]
    CycleDetected(String),

    #[error("Invalid quiz bank: {0}")]
    QuizBank(#[from] AssessmentError),
}

/// One topic entry; fields other than `id` and `prerequisites` are topic
/// attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDefinition {
    pub id: String,

    /// Ids of topics that must be completed first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,

    #[serde(flatten)]
    pub attributes: TopicAttributes,
}

impl TopicDefinition {
    pub fn new(id: impl Into<String>, attributes: TopicAttributes) -> Self {
        Self {
            id: id.into(),
            prerequisites: Vec::new(),
            attributes,
        }
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }
}

/// A subject's topics and quiz bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub topics: Vec<TopicDefinition>,

    #[serde(default, alias = "quizBank", skip_serializing_if = "StaticQuestionBank::is_empty")]
    pub quiz_bank: StaticQuestionBank,
}

impl Curriculum {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topics: Vec::new(),
            quiz_bank: StaticQuestionBank::new(),
        }
    }

    /// Parses a curriculum document. The embedded quiz bank is validated;
    /// the prerequisite structure is checked by `build_graph`.
    pub fn from_json(json: &str) -> Result<Self, CurriculumError> {
        let curriculum: Curriculum = serde_json::from_str(json)?;
        curriculum.quiz_bank.validate()?;
        Ok(curriculum)
    }

    pub fn with_topic(mut self, topic: TopicDefinition) -> Self {
        self.topics.push(topic);
        self
    }

    /// Registers every topic in declaration order, then every prerequisite
    /// edge. Rejects duplicate ids and cyclic prerequisites.
    pub fn build_graph(&self) -> Result<TopicGraph, CurriculumError> {
        let mut seen = HashSet::with_capacity(self.topics.len());
        for topic in &self.topics {
            if !seen.insert(topic.id.as_str()) {
                return Err(CurriculumError::DuplicateTopic(topic.id.clone()));
            }
        }

        let mut graph = TopicGraph::new();
        for topic in &self.topics {
            graph.add_vertex(topic.id.as_str(), topic.attributes.clone());
        }

        for topic in &self.topics {
            for prerequisite in &topic.prerequisites {
                if !seen.contains(prerequisite.as_str()) {
                    warn!(
                        "Topic {} requires undeclared topic {}; adding it with defaults",
                        topic.id, prerequisite
                    );
                }
                graph.add_edge(prerequisite.as_str(), topic.id.as_str());
            }
        }

        if graph.has_cycle() {
            return Err(CurriculumError::CycleDetected(self.id.clone()));
        }

        debug!(
            "Built curriculum {}: {} topics, {} prerequisite edges",
            self.id,
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
