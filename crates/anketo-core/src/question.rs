use anketo_entity::question::{Model as QuestionModel, QuestionType};
use chrono::NaiveDate;
use uuid::Uuid;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Handler-side view of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub name: String,
    pub content: String,
    pub r#type: QuestionType,
    pub date_format: Option<String>,
}

impl Question {
    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    /// A date answer must parse as exactly the configured pattern before it
    /// is persisted.
    pub fn check_date_format(&self, value: &str) -> bool {
        NaiveDate::parse_from_str(value, self.date_format()).is_ok()
    }
}

impl From<QuestionModel> for Question {
    fn from(model: QuestionModel) -> Self {
        Self {
            id: model.id,
            questionnaire_id: model.questionnaire_id,
            name: model.name,
            content: model.content,
            r#type: model.r#type,
            date_format: model.date_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_question(format: Option<&str>) -> Question {
        Question {
            id: Uuid::new_v4(),
            questionnaire_id: Uuid::new_v4(),
            name: "when".to_owned(),
            content: "When did it happen?".to_owned(),
            r#type: QuestionType::Date,
            date_format: format.map(str::to_owned),
        }
    }

    #[test]
    fn test_check_date_format_default_iso() {
        let question = date_question(None);
        assert!(question.check_date_format("2021-06-28"));
        assert!(!question.check_date_format("28/06/2021"));
        assert!(!question.check_date_format("2021-06-28T09:03:46.613+02:00"));
        assert!(!question.check_date_format(""));
        assert!(!question.check_date_format("2021-02-30"));
    }

    #[test]
    fn test_check_date_format_configured_pattern() {
        let question = date_question(Some("%d/%m/%Y"));
        assert!(question.check_date_format("28/06/2021"));
        assert!(!question.check_date_format("2021-06-28"));
    }
}
