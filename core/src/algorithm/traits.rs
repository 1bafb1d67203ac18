//! Core algorithm trait definitions for the Pathwise recommendation engine
//!
//! This module establishes the shared vocabulary of the engine: the topic
//! identifier, the algorithm error taxonomy, and the parameter interface
//! every recommendation algorithm exposes to its caller.
//!
//! # Key Design Principles
//! - Topics are keyed by caller-supplied string identifiers
//! - Structural failures (cycles) surface as typed errors
//! - Read queries are total and never fail on unknown identifiers
//! - Tunable weights are exposed through a uniform parameter interface
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic identifier wrapping the caller-supplied string key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for TopicId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopicId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TopicId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for TopicId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TopicId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub constraints: Option<ParameterConstraints>,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterType {
    Integer,
    Float,
    Optional(Box<ParameterType>),
}

/// Parameter constraints for validating algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Error types for algorithm operations
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Graph contains a cycle: ordered {ordered} of {total} topics")]
    CycleDetected { ordered: usize, total: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown topic: {0}")]
    UnknownTopic(TopicId),
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub worst_case: String,
}

/// Common interface of the recommendation algorithms
///
/// The algorithms themselves are stateless with respect to the graph: the
/// only state an implementor carries is its tuning parameters.
pub trait LearningAlgorithm: fmt::Debug {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., path_finding, selection)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

/// Parses a float parameter and checks it against inclusive bounds.
pub(crate) fn parse_float_parameter(
    name: &str,
    value: &str,
    min: f64,
    max: Option<f64>,
) -> Result<f64, AlgorithmError> {
    let parsed: f64 = value.trim().parse().map_err(|_| AlgorithmError::InvalidParameter {
        name: name.to_owned(),
        reason: format!("'{}' is not a number", value),
    })?;

    if !parsed.is_finite() || parsed < min || max.map_or(false, |m| parsed > m) {
        return Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: match max {
                Some(m) => format!("must be within [{}, {}]", min, m),
                None => format!("must be finite and at least {}", min),
            },
        });
    }

    Ok(parsed)
}

/// Parses a positive integer parameter.
pub(crate) fn parse_count_parameter(name: &str, value: &str) -> Result<usize, AlgorithmError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("'{}' is not a positive integer", value),
        }),
    }
}

pub(crate) fn float_parameter(name: &str, value: f64, min: f64, max: Option<f64>) -> AlgorithmParameter {
    AlgorithmParameter {
        name: name.to_owned(),
        value: value.to_string(),
        value_type: ParameterType::Float,
        constraints: Some(ParameterConstraints { min: Some(min), max }),
    }
}

pub(crate) fn count_parameter(name: &str, value: usize) -> AlgorithmParameter {
    AlgorithmParameter {
        name: name.to_owned(),
        value: value.to_string(),
        value_type: ParameterType::Integer,
        constraints: Some(ParameterConstraints { min: Some(1.0), max: None }),
    }
}
