use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// A single quiz question as served by the content API.
///
/// The API flattens the type-specific payload into the question object and
/// discriminates on the `type` field, so the kind is flattened here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub question: String,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl QuizQuestion {
    /// Whether this question participates in scoring.
    #[must_use]
    pub fn is_scorable(&self) -> bool {
        self.kind.is_scorable()
    }
}

/// Type-specific payload of a quiz question.
///
/// Wire tags are the API's snake_case strings (`"multiple_choice"`, ...).
/// Listening and pronunciation questions exist in the catalog but carry no
/// machine-checkable answer, so they never score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        /// Zero-based index into `options`.
        correct_answer: u32,
    },
    FillBlank {
        correct_answer: String,
    },
    TrueFalse {
        correct_answer: bool,
    },
    ListeningComprehension,
    Pronunciation,
}

impl QuestionKind {
    #[must_use]
    pub fn is_scorable(&self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleChoice { .. }
                | QuestionKind::FillBlank { .. }
                | QuestionKind::TrueFalse { .. }
        )
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// A learner's answer to one question.
///
/// The API accepts a bare JSON scalar whose shape depends on the question
/// type: an option index, a boolean, or free text. Untagged serde picks the
/// matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(u32),
    Flag(bool),
    Text(String),
}

impl AnswerValue {
    /// Reads the answer as an option index, parsing numeric text.
    #[must_use]
    pub fn to_choice(&self) -> Option<u32> {
        match self {
            AnswerValue::Choice(index) => Some(*index),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            AnswerValue::Flag(_) => None,
        }
    }

    /// Reads the answer as a boolean. Only a real flag qualifies.
    #[must_use]
    pub fn to_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Reads the answer as text, stringifying indices and flags.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Choice(index) => index.to_string(),
            AnswerValue::Flag(value) => value.to_string(),
        }
    }
}

impl From<u32> for AnswerValue {
    fn from(index: u32) -> Self {
        AnswerValue::Choice(index)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Flag(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_owned())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        AnswerValue::Text(text)
    }
}

/// One row of a quiz submission.
///
/// An unanswered question is submitted with an explicit null answer and can
/// never be correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    #[serde(rename = "userAnswer")]
    pub answer: Option<AnswerValue>,
    pub is_correct: bool,
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Graded outcome of a quiz submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub passed: bool,
    pub message: String,
    /// Per-question detail, when the grader echoes it back.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerRecord>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_choice_decodes_from_api_json() {
        let json = r#"{
            "id": 1,
            "storyId": 4,
            "type": "multiple_choice",
            "question": "What is the main theme of this story?",
            "options": ["Adventure", "Romance", "Mystery", "Comedy"],
            "correctAnswer": 0,
            "points": 10
        }"#;

        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, QuestionId::new(1));
        assert_eq!(question.points, 10);
        assert!(question.is_scorable());
        match &question.kind {
            QuestionKind::MultipleChoice {
                options,
                correct_answer,
            } => {
                assert_eq!(options.len(), 4);
                assert_eq!(*correct_answer, 0);
            }
            other => panic!("wrong kind decoded: {other:?}"),
        }
    }

    #[test]
    fn fill_blank_and_true_false_decode() {
        let fill: QuizQuestion = serde_json::from_str(
            r#"{
                "id": 2,
                "type": "fill_blank",
                "question": "The character _____ the challenge.",
                "correctAnswer": "completed",
                "points": 15
            }"#,
        )
        .unwrap();
        assert_eq!(
            fill.kind,
            QuestionKind::FillBlank {
                correct_answer: "completed".to_owned()
            }
        );

        let tf: QuizQuestion = serde_json::from_str(
            r#"{
                "id": 3,
                "type": "true_false",
                "question": "The story takes place in a city.",
                "correctAnswer": true,
                "points": 5
            }"#,
        )
        .unwrap();
        assert_eq!(
            tf.kind,
            QuestionKind::TrueFalse {
                correct_answer: true
            }
        );
    }

    #[test]
    fn pronunciation_questions_are_not_scorable() {
        let question: QuizQuestion = serde_json::from_str(
            r#"{
                "id": 9,
                "type": "pronunciation",
                "question": "Read the first paragraph aloud.",
                "points": 0
            }"#,
        )
        .unwrap();
        assert!(!question.is_scorable());
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let result = serde_json::from_str::<QuizQuestion>(
            r#"{
                "id": 4,
                "type": "essay",
                "question": "Summarize the story.",
                "points": 20
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn answer_value_decodes_by_shape() {
        assert_eq!(
            serde_json::from_str::<AnswerValue>("2").unwrap(),
            AnswerValue::Choice(2)
        );
        assert_eq!(
            serde_json::from_str::<AnswerValue>("true").unwrap(),
            AnswerValue::Flag(true)
        );
        assert_eq!(
            serde_json::from_str::<AnswerValue>(r#""Paris""#).unwrap(),
            AnswerValue::Text("Paris".to_owned())
        );
    }

    #[test]
    fn answer_value_coercions() {
        assert_eq!(AnswerValue::Text(" 2 ".to_owned()).to_choice(), Some(2));
        assert_eq!(AnswerValue::Flag(true).to_choice(), None);
        assert_eq!(AnswerValue::Text("yes".to_owned()).to_flag(), None);
        assert_eq!(AnswerValue::Choice(3).to_text(), "3");
        assert_eq!(AnswerValue::Flag(false).to_text(), "false");
    }

    #[test]
    fn unanswered_record_serializes_null_answer() {
        let record = AnswerRecord {
            question_id: QuestionId::new(2),
            answer: None,
            is_correct: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["questionId"], 2);
        assert!(json["userAnswer"].is_null());
        assert_eq!(json["isCorrect"], false);
    }

    #[test]
    fn quiz_result_decodes_without_answer_detail() {
        let json = r#"{
            "score": 20,
            "maxScore": 30,
            "percentage": 66.66666666666666,
            "passed": false,
            "message": "Keep studying!"
        }"#;

        let result: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 20);
        assert_eq!(result.max_score, 30);
        assert!(!result.passed);
        assert!(result.answers.is_empty());
    }
}
