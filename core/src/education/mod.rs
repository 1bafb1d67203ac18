//! Learner-facing layer: curricula, quizzes and the learning path manager
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod assessment;
pub mod curriculum;
pub mod learning_path;

pub use self::assessment::{
    grade_quiz, AssessmentError, AssessmentResult, Question, QuestionBank, QuizOutcome, StaticQuestionBank,
};
pub use self::curriculum::{Curriculum, CurriculumError, TopicDefinition};
pub use self::learning_path::{LearningPathManager, OrderingMode, PathError};
