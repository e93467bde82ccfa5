use story_core::model::{AnswerValue, QuestionKind, QuizQuestion};

/// Grades one answer against its question.
///
/// Multiple choice compares option indices, accepting numeric text. Fill-in
/// answers match case-insensitively after trimming. True/false requires a
/// real boolean. An absent answer is always wrong, and listening or
/// pronunciation questions never score.
#[must_use]
pub fn check_answer(question: &QuizQuestion, answer: Option<&AnswerValue>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match &question.kind {
        QuestionKind::MultipleChoice { correct_answer, .. } => {
            answer.to_choice() == Some(*correct_answer)
        }
        QuestionKind::FillBlank { correct_answer } => answer
            .to_text()
            .trim()
            .eq_ignore_ascii_case(correct_answer.trim()),
        QuestionKind::TrueFalse { correct_answer } => answer.to_flag() == Some(*correct_answer),
        QuestionKind::ListeningComprehension | QuestionKind::Pronunciation => false,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
