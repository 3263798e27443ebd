//! Quiz
//!
//! Multiple-choice questions from the AI service and the running score.
//! Answers arrive in loose shapes (`q` or `question`, `text` or `answer`,
//! a bare list or `{questions: [...]}`); everything is normalized here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_QUESTIONS: u32 = 10;
pub const DEFAULT_ANSWERS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub q: String,
    pub answers: Vec<QuizAnswer>,
    pub explanation: String,
}

/// First non-empty string among `keys`
fn text_of(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

impl QuizQuestion {
    fn from_value(value: &Value) -> Self {
        let answers = value
            .get("answers")
            .and_then(Value::as_array)
            .map(|answers| {
                answers
                    .iter()
                    .map(|a| QuizAnswer {
                        text: text_of(a, &["text", "answer"]),
                        correct: truthy(a.get("correct")),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            q: text_of(value, &["q", "question"]),
            answers,
            explanation: text_of(value, &["explanation"]),
        }
    }

    /// Normalize a service response. Questions without text or answers
    /// are dropped.
    pub fn from_response(response: &Value) -> Vec<Self> {
        let raw = response
            .as_array()
            .or_else(|| response.get("questions").and_then(Value::as_array));
        raw.map(|items| {
            items
                .iter()
                .map(Self::from_value)
                .filter(|q| !q.q.trim().is_empty() && !q.answers.is_empty())
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn is_correct(&self, index: usize) -> bool {
        self.answers.get(index).is_some_and(|a| a.correct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub number_of_questions: u32,
    pub number_of_possible_answers: u32,
    /// Everything asked so far, so the service avoids repeats
    pub old_qs: Vec<QuizQuestion>,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            number_of_questions: DEFAULT_QUESTIONS,
            number_of_possible_answers: DEFAULT_ANSWERS,
            old_qs: Vec::new(),
        }
    }
}

/// Current batch, position and running score. The score accumulates
/// across batches until `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    asked: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    submitted: bool,
    correct: u32,
    answered: u32,
}

impl Quiz {
    /// Request for the next batch
    pub fn next_request(&self) -> QuizRequest {
        QuizRequest {
            old_qs: self.asked.clone(),
            ..Default::default()
        }
    }

    /// Start a fresh batch; the score is kept
    pub fn load(&mut self, batch: Vec<QuizQuestion>) {
        self.asked.extend(batch.iter().cloned());
        self.questions = batch;
        self.current = 0;
        self.selected = None;
        self.submitted = false;
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// 1-based position in the batch
    pub fn position(&self) -> usize {
        self.current + 1
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn select(&mut self, index: usize) {
        let in_range = self.question().is_some_and(|q| index < q.answers.len());
        if !self.submitted && in_range {
            self.selected = Some(index);
        }
    }

    /// Lock in the selected answer. Returns whether it was right, or
    /// `None` when nothing is selected or it was already submitted.
    pub fn submit(&mut self) -> Option<bool> {
        if self.submitted {
            return None;
        }
        let index = self.selected?;
        let right = self.question()?.is_correct(index);
        self.submitted = true;
        self.answered += 1;
        if right {
            self.correct += 1;
        }
        Some(right)
    }

    /// Move on. Returns `true` when the batch is used up and a new one
    /// should be fetched.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.submitted = false;
            false
        } else {
            true
        }
    }

    /// Clear the score and the asked history
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// (correct, answered, rounded percentage)
    pub fn score(&self) -> (u32, u32, u32) {
        let percent = if self.answered == 0 {
            0
        } else {
            (self.correct as f64 * 100.0 / self.answered as f64).round() as u32
        };
        (self.correct, self.answered, percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch() -> Vec<QuizQuestion> {
        QuizQuestion::from_response(&json!([
            {"q": "useState returns?", "answers": [
                {"text": "a pair", "correct": true},
                {"text": "a promise"}
            ], "explanation": "value and setter"},
            {"question": "useEffect runs?", "answers": [
                {"answer": "before render"},
                {"answer": "after render", "correct": 1}
            ]}
        ]))
    }

    #[test]
    fn test_response_shapes_are_normalized() {
        let questions = batch();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].q, "useEffect runs?");
        assert_eq!(questions[1].answers[1].text, "after render");
        assert!(questions[1].is_correct(1));
        assert!(!questions[1].is_correct(0));
        assert_eq!(questions[1].explanation, "");

        let wrapped = QuizQuestion::from_response(&json!({"questions": [
            {"q": "", "question": "fallback?", "answers": [{"text": "x", "correct": "yes"}]}
        ]}));
        assert_eq!(wrapped[0].q, "fallback?");
        assert!(wrapped[0].answers[0].correct);
    }

    #[test]
    fn test_unusable_entries_are_dropped() {
        let questions = QuizQuestion::from_response(&json!([
            {"q": "no answers"},
            {"q": "bad answers", "answers": "A"},
            {"answers": [{"text": "orphan"}]}
        ]));
        assert!(questions.is_empty());
        assert!(QuizQuestion::from_response(&json!({"error": "quota"})).is_empty());
    }

    #[test]
    fn test_score_accumulates_across_batches() {
        let mut quiz = Quiz::default();
        quiz.load(batch());

        assert_eq!(quiz.submit(), None);
        quiz.select(0);
        assert_eq!(quiz.submit(), Some(true));
        quiz.select(1);
        assert_eq!(quiz.selected(), Some(0), "answer is locked after submit");
        assert!(!quiz.advance());

        quiz.select(0);
        assert_eq!(quiz.submit(), Some(false));
        assert!(quiz.advance(), "batch used up");
        assert_eq!(quiz.score(), (1, 2, 50));

        let request = quiz.next_request();
        assert_eq!(request.old_qs.len(), 2);
        quiz.load(batch());
        assert_eq!(quiz.position(), 1);
        assert_eq!(quiz.score(), (1, 2, 50));

        quiz.reset();
        assert_eq!(quiz.score(), (0, 0, 0));
        assert!(quiz.next_request().old_qs.is_empty());
    }

    #[test]
    fn test_request_wire_shape() {
        let body = serde_json::to_value(QuizRequest::default()).unwrap();
        assert_eq!(
            body,
            json!({"numberOfQuestions": 10, "numberOfPossibleAnswers": 4, "oldQs": []})
        );
    }
}
