use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A submitted web form: the response id plus one raw value per answered
/// question, keyed by question id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebformPayload {
    pub response_id: Uuid,
    pub fields: HashMap<Uuid, String>,
}

impl WebformPayload {
    pub fn new(response_id: Uuid) -> Self {
        Self {
            response_id,
            fields: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, question_id: Uuid, value: impl Into<String>) -> Self {
        self.fields.insert(question_id, value.into());
        self
    }

    pub fn field(&self, question_id: Uuid) -> Option<&str> {
        self.fields.get(&question_id).map(String::as_str)
    }
}

/// The mobile app sends each field as a list of strings; a date field may
/// carry a full timestamp with time and offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPayload {
    pub response_id: Uuid,
    pub fields: HashMap<Uuid, Vec<String>>,
}

impl AppPayload {
    pub fn new(response_id: Uuid) -> Self {
        Self {
            response_id,
            fields: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, question_id: Uuid, values: Vec<String>) -> Self {
        self.fields.insert(question_id, values);
        self
    }

    pub fn first_field(&self, question_id: Uuid) -> Option<&str> {
        self.fields
            .get(&question_id)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
