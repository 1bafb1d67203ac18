//! # Quiz Assessment
//!
//! Grades multiple-choice quizzes against an injected question bank and
//! turns the result into a mastery observation for the topic graph.
//!
//! ## Model
//!
//! A question bank is read-only configuration owned by the caller. The
//! engine only sees it through the [`QuestionBank`] lookup, so banks can be
//! loaded from JSON ([`StaticQuestionBank`]), built in code, or served from
//! any other store.
//!
//! A quiz score is `correct / total` and is used directly as the new
//! mastery value, so passing a quiz means scoring at least the completion
//! threshold.
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::TopicId;
use crate::data_structures::graph::COMPLETION_THRESHOLD;

/// Assessment error types
#[derive(Error, Debug)]
pub enum AssessmentError {
    /// The bank holds no questions for the topic
    #[error("No questions available for topic {0}")]
    NoQuestions(TopicId),

    /// One answer is expected per question
    #[error("Expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    /// A question whose correct option does not exist
    #[error("Question {index} of topic {topic} marks option {correct} correct but has {options} options")]
    InvalidQuestion {
        topic: String,
        index: usize,
        correct: usize,
        options: usize,
    },

    /// Bank document could not be parsed
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,

    /// Index into `options`
    pub correct: usize,
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<String>, correct: usize) -> Self {
        Self {
            question: question.into(),
            options,
            correct,
        }
    }

    #[inline]
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }
}

/// Read-only lookup of quiz questions per topic
pub trait QuestionBank {
    /// Questions for `topic`; empty when the topic has none
    fn questions(&self, topic: &str) -> &[Question];
}

impl QuestionBank for HashMap<String, Vec<Question>> {
    fn questions(&self, topic: &str) -> &[Question] {
        self.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Question bank keyed by topic id, loadable from a JSON object of
/// `topic -> [question]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticQuestionBank {
    banks: BTreeMap<String, Vec<Question>>,
}

impl StaticQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a bank and checks every question's answer index
    pub fn from_json(json: &str) -> AssessmentResult<Self> {
        let bank: StaticQuestionBank = serde_json::from_str(json)?;
        bank.validate()?;
        debug!(
            "Loaded question bank: {} topics, {} questions",
            bank.banks.len(),
            bank.len()
        );
        Ok(bank)
    }

    pub fn validate(&self) -> AssessmentResult<()> {
        for (topic, questions) in &self.banks {
            for (index, q) in questions.iter().enumerate() {
                if q.correct >= q.options.len() {
                    return Err(AssessmentError::InvalidQuestion {
                        topic: topic.clone(),
                        index,
                        correct: q.correct,
                        options: q.options.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Appends questions to a topic's bank
    pub fn insert(&mut self, topic: impl Into<String>, questions: impl IntoIterator<Item = Question>) {
        self.banks.entry(topic.into()).or_default().extend(questions);
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> + '_ {
        self.banks.keys().map(String::as_str)
    }

    /// Total number of questions across topics
    pub fn len(&self) -> usize {
        self.banks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuestionBank for StaticQuestionBank {
    fn questions(&self, topic: &str) -> &[Question] {
        self.banks.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Graded quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub topic: TopicId,
    pub correct: usize,
    pub total: usize,

    /// `correct / total`, in [0, 1]
    pub score: f64,
}

impl QuizOutcome {
    /// Whether the score alone completes the topic
    pub fn passed(&self) -> bool {
        self.score >= COMPLETION_THRESHOLD
    }
}

/// Grades one answer per question, in bank order
pub fn grade_quiz<B>(bank: &B, topic: &str, answers: &[usize]) -> AssessmentResult<QuizOutcome>
where
    B: QuestionBank + ?Sized,
{
    let questions = bank.questions(topic);
    if questions.is_empty() {
        return Err(AssessmentError::NoQuestions(TopicId::from(topic)));
    }
    if answers.len() != questions.len() {
        return Err(AssessmentError::AnswerCountMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(q, answer)| q.is_correct(**answer))
        .count();
    let total = questions.len();

    Ok(QuizOutcome {
        topic: TopicId::from(topic),
        correct,
        total,
        score: correct as f64 / total as f64,
    })
}
