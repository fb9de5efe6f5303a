use crate::error::ResponseError;
use crate::question::Question;
use crate::responsetype::text::TextResponse;
use crate::responsetype::{ResponseIdFilter, ResponseSource, ResponseType, ResultRecord};
use crate::settings::ReportSettings;
use crate::webform::{AppPayload, WebformPayload};
use anketo_db::bulk::BulkSqlConfig;
use anketo_model::response::answer::Answer;
use anketo_model::results::{ExportRow, ResultsPage};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

/// Handler for numeric answers stored as text. Extends the generic text
/// handler: same table and reporting, stricter input acceptance.
pub struct NumericalTextResponse {
    inner: TextResponse,
}

impl NumericalTextResponse {
    pub fn new(question: Question) -> Self {
        Self {
            inner: TextResponse::new(question),
        }
    }
}

/// Normalize a raw numeric submission: commas count as decimal points, then
/// only the first optional-sign + digits + optional-decimal run survives.
/// Returns `None` when no digit is left, which rejects the field.
fn clean_numeric(raw: &str) -> Option<String> {
    let normalized = raw.replace(',', ".");
    let extracted = extract_numeric(&normalized);
    extracted.chars().any(|c| c.is_ascii_digit()).then_some(extracted)
}

fn extract_numeric(value: &str) -> String {
    let rest = value.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
    let mut out = String::new();
    let mut chars = rest.chars().peekable();

    if chars.peek() == Some(&'-') {
        out.push('-');
        chars.next();
    }
    while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
        out.push(*c);
        chars.next();
    }
    if chars.peek() == Some(&'.') {
        out.push('.');
        chars.next();
        while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
            out.push(*c);
            chars.next();
        }
    }
    out
}

#[async_trait]
impl ResponseType for NumericalTextResponse {
    fn question(&self) -> &Question {
        self.inner.question()
    }

    fn response_table(&self) -> &'static str {
        self.inner.response_table()
    }

    fn bulk_sql_config(&self) -> BulkSqlConfig {
        self.inner.bulk_sql_config()
    }

    fn results_template(&self, pdf: bool) -> &'static str {
        self.inner.results_template(pdf)
    }

    fn answers_from_webform(&self, data: &WebformPayload) -> Vec<Answer> {
        let mut answers = Vec::new();
        if let Some(raw) = data.field(self.question().id)
            && let Some(value) = clean_numeric(raw)
        {
            answers.push(Answer::create_from_data(data.response_id, self.question().id, value));
        }
        answers
    }

    fn answers_from_appdata(&self, data: &AppPayload) -> Vec<Answer> {
        let mut webform = WebformPayload::new(data.response_id);
        if let Some(value) = data.first_field(self.question().id) {
            webform.fields.insert(self.question().id, value.to_owned());
        }
        self.answers_from_webform(&webform)
    }

    async fn insert_response(
        &self,
        conn: &DatabaseConnection,
        source: ResponseSource<'_>,
    ) -> Result<Option<Uuid>, ResponseError> {
        self.inner.insert_response(conn, source).await
    }

    async fn get_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: Option<&ResponseIdFilter>,
        anonymous: bool,
    ) -> Result<Vec<ResultRecord>, ResponseError> {
        self.inner.get_results(conn, response_ids, anonymous).await
    }

    /// Tallies by the cleaned textual value: `"1.0"` and `"1"` stay
    /// distinct buckets.
    async fn display_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: &ResponseIdFilter,
        sort: &str,
        anonymous: bool,
        settings: &ReportSettings,
    ) -> Result<ResultsPage, ResponseError> {
        self.inner
            .display_results(conn, response_ids, sort, anonymous, settings)
            .await
    }

    async fn response_select(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
        settings: &ReportSettings,
    ) -> Result<HashMap<Uuid, ExportRow>, ResponseError> {
        self.inner.response_select(conn, response_id, settings).await
    }

    async fn response_answers_by_question(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<Answer>>, ResponseError> {
        self.inner.response_answers_by_question(conn, response_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketo_entity::question::QuestionType;

    fn numeric_question() -> Question {
        Question {
            id: Uuid::new_v4(),
            questionnaire_id: Uuid::new_v4(),
            name: "amount".to_owned(),
            content: "How many?".to_owned(),
            r#type: QuestionType::Numeric,
            date_format: None,
        }
    }

    fn single_answer(handler: &NumericalTextResponse, raw: &str) -> Option<String> {
        let payload = WebformPayload::new(Uuid::new_v4()).with_field(handler.question().id, raw);
        let mut answers = handler.answers_from_webform(&payload);
        match answers.len() {
            0 => None,
            1 => Some(answers.remove(0).value),
            n => panic!("expected at most one answer, got {n}"),
        }
    }

    #[test]
    fn test_clean_numeric_cases() {
        assert_eq!(clean_numeric("12,5abc").as_deref(), Some("12.5"));
        assert_eq!(clean_numeric("-3.2").as_deref(), Some("-3.2"));
        assert_eq!(clean_numeric("42").as_deref(), Some("42"));
        assert_eq!(clean_numeric(".5").as_deref(), Some(".5"));
        assert_eq!(clean_numeric("x 7 y").as_deref(), Some("7"));
        assert_eq!(clean_numeric("abc"), None);
        assert_eq!(clean_numeric(""), None);
        assert_eq!(clean_numeric("-"), None);
        assert_eq!(clean_numeric("."), None);
    }

    #[test]
    fn test_clean_numeric_keeps_first_run_only() {
        // the second decimal point and everything after it is garbage
        assert_eq!(clean_numeric("1,234.5 units").as_deref(), Some("1.234"));
        assert_eq!(clean_numeric("1.2.3").as_deref(), Some("1.2"));
    }

    #[test]
    fn test_webform_accepts_numeric_only() {
        let handler = NumericalTextResponse::new(numeric_question());

        assert_eq!(single_answer(&handler, "12,5abc").as_deref(), Some("12.5"));
        assert_eq!(single_answer(&handler, "-3.2").as_deref(), Some("-3.2"));
        assert_eq!(single_answer(&handler, "abc"), None);
        assert_eq!(single_answer(&handler, ""), None);
    }

    #[test]
    fn test_appdata_takes_first_list_element() {
        let handler = NumericalTextResponse::new(numeric_question());
        let question_id = handler.question().id;

        let app = AppPayload::new(Uuid::new_v4()).with_field(question_id, vec!["12,5".to_owned()]);
        let answers = handler.answers_from_appdata(&app);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].value, "12.5");
    }

    #[test]
    fn test_shares_text_table_and_templates() {
        let handler = NumericalTextResponse::new(numeric_question());
        assert_eq!(handler.response_table(), "response_text");
        assert_eq!(handler.results_template(false), "anketo/results_text");

        let config = handler.bulk_sql_config();
        assert_eq!(config.alias, "qrt");
        assert_eq!(config.latest_alias, "rst");
        assert!(config.latest_joins_question);
    }
}
