use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    /// Minutes allowed for one attempt.
    pub time_limit: Option<i32>,
    pub passing_score: Option<i32>,
}

impl Quiz {
    /// A score passes iff a passing score is configured and the score
    /// reaches it. Without a configured passing score nothing passes.
    pub fn is_passing(&self, score: i32) -> bool {
        match self.passing_score {
            Some(threshold) => score >= threshold,
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub time_limit: Option<i32>,
    pub passing_score: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TrueFalse => "TRUE_FALSE",
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE_CHOICE" => Ok(QuestionType::SingleChoice),
            "MULTIPLE_CHOICE" => Ok(QuestionType::MultipleChoice),
            "TRUE_FALSE" => Ok(QuestionType::TrueFalse),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub points: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub question_type: QuestionType,
    pub points: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct NewAnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// One graded attempt at a quiz. `attempt_number` is recomputed from the
/// count of existing rows at submit time, so deleting history shifts later
/// numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub student_id: Uuid,
    pub score: i32,
    pub passed: bool,
    pub attempt_number: i32,
    pub taken_at: DateTime<Utc>,
}
