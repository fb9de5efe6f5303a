use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One question's value within a response. Built once at submission time
/// from raw field data, read back unchanged for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct Answer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub response_id: Uuid,
    pub question_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<Uuid>,
    pub value: String,
}

impl Answer {
    pub fn create_from_data(response_id: Uuid, question_id: Uuid, value: String) -> Self {
        Self {
            id: None,
            response_id,
            question_id,
            choice_id: None,
            value,
        }
    }

    pub fn from_db_row(id: Uuid, response_id: Uuid, question_id: Uuid, value: String) -> Self {
        Self {
            id: Some(id),
            response_id,
            question_id,
            choice_id: None,
            value,
        }
    }
}
