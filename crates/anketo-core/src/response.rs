use crate::question::Question;
use crate::responsetype;
use crate::webform::WebformPayload;
use anketo_model::response::answer::Answer;
use std::collections::HashMap;
use uuid::Uuid;

/// One survey attempt while it is being processed: the response id plus the
/// answers collected from the payload, grouped by question id.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub id: Uuid,
    pub answers: HashMap<Uuid, Vec<Answer>>,
}

impl Response {
    /// Build the canonical response from a web form by running every
    /// question's handler over the payload. Unanswered questions simply do
    /// not appear in the map.
    pub fn from_webform(payload: &WebformPayload, questions: &[Question]) -> Self {
        let mut answers: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for question in questions {
            let handler = responsetype::for_question(question.clone());
            let question_answers = handler.answers_from_webform(payload);
            if !question_answers.is_empty() {
                answers.insert(question.id, question_answers);
            }
        }
        Self {
            id: payload.response_id,
            answers,
        }
    }
}
