use crate::error::ResponseError;
use crate::question::Question;
use crate::response::Response;
use crate::responsetype::{
    self, ResponseIdFilter, ResponseSource, ResponseType, ResultRecord,
};
use crate::settings::ReportSettings;
use crate::webform::{AppPayload, WebformPayload};
use anketo_db::bulk::BulkSqlConfig;
use anketo_model::response::answer::Answer;
use anketo_model::results::{ExportRow, ResultsPage, ResultsTotal};
use anketo_utils::date::{format_timestamp, make_timestamp};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Handler for date-typed answers. Values are stored as ISO `YYYY-MM-DD`
/// text and only converted to the display format when rendering.
pub struct DateResponse {
    question: Question,
}

impl DateResponse {
    pub fn new(question: Question) -> Self {
        Self { question }
    }

    /// Aggregate tallied timestamps into a results page. Rows come out in
    /// chronological order whatever `sort` says, since the keys are unix
    /// timestamps.
    pub fn results_tags(
        &self,
        weights: &BTreeMap<i64, u32>,
        participants: usize,
        respondents: usize,
        show_totals: bool,
        _sort: &str,
        settings: &ReportSettings,
    ) -> Result<ResultsPage, ResponseError> {
        if respondents == 0 || weights.is_empty() {
            return Ok(ResultsPage::default());
        }

        let mut entries = Vec::with_capacity(weights.len());
        for (&timestamp, &num) in weights {
            entries.push((format_timestamp(timestamp, &settings.date_format)?, num));
        }
        let (rows, sum) = responsetype::tally_rows(entries);

        let total = show_totals.then(|| ResultsTotal {
            total: format!("{sum}/{participants}"),
        });
        Ok(ResultsPage { responses: rows, total })
    }
}

/// Unix timestamp for a stored `YYYY-MM-DD` value. Anything that does not
/// split into a valid calendar date is skipped by the caller.
fn timestamp_from_stored(value: &str) -> Option<i64> {
    let mut parts = value.split('-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    make_timestamp(year, month, day).ok()
}

fn matches_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Export cells for one joined row: every cell that looks like a stored
/// date also gets a display-formatted copy appended right after it.
fn export_cells(raw: Vec<String>, settings: &ReportSettings) -> Vec<String> {
    let mut cells = Vec::with_capacity(raw.len() * 2);
    for value in raw {
        let formatted = matches_iso_date(&value)
            .then(|| timestamp_from_stored(&value))
            .flatten()
            .and_then(|ts| format_timestamp(ts, &settings.date_format).ok());
        cells.push(value);
        if let Some(formatted) = formatted {
            cells.push(formatted);
        }
    }
    cells
}

#[async_trait]
impl ResponseType for DateResponse {
    fn question(&self) -> &Question {
        &self.question
    }

    fn response_table(&self) -> &'static str {
        "response_date"
    }

    fn bulk_sql_config(&self) -> BulkSqlConfig {
        BulkSqlConfig::new("response_date", "qrd", "rsd", false)
    }

    fn results_template(&self, pdf: bool) -> &'static str {
        if pdf {
            "anketo/resultspdf_date"
        } else {
            "anketo/results_date"
        }
    }

    fn answers_from_webform(&self, data: &WebformPayload) -> Vec<Answer> {
        let mut answers = Vec::new();
        if let Some(value) = data.field(self.question.id)
            && !value.is_empty()
        {
            answers.push(Answer::create_from_data(
                data.response_id,
                self.question.id,
                value.to_owned(),
            ));
        }
        answers
    }

    fn answers_from_appdata(&self, data: &AppPayload) -> Vec<Answer> {
        let mut webform = WebformPayload::new(data.response_id);
        if let Some(value) = data.first_field(self.question.id) {
            // The app can send the date including time (e.g.
            // 2021-06-28T09:03:46.613+02:00); keep only the date part.
            webform
                .fields
                .insert(self.question.id, value.chars().take(10).collect());
        }
        self.answers_from_webform(&webform)
    }

    async fn insert_response(
        &self,
        conn: &DatabaseConnection,
        source: ResponseSource<'_>,
    ) -> Result<Option<Uuid>, ResponseError> {
        let built;
        let response = match source {
            ResponseSource::Webform(payload) => {
                built = Response::from_webform(payload, std::slice::from_ref(&self.question));
                &built
            }
            ResponseSource::Response(response) => response,
        };

        let Some(answer) = response.answers.get(&self.question.id).and_then(|a| a.first()) else {
            return Ok(None);
        };
        if !self.question.check_date_format(&answer.value) {
            tracing::debug!(question_id = %self.question.id, "date answer failed the format check");
            return Ok(None);
        }

        let record =
            anketo_db::response_date::Mutation::insert(conn, response.id, self.question.id, answer.value.clone())
                .await?;
        Ok(Some(record.id))
    }

    async fn get_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: Option<&ResponseIdFilter>,
        _anonymous: bool,
    ) -> Result<Vec<ResultRecord>, ResponseError> {
        let rows = anketo_db::response_date::Query::results_for_question(
            conn,
            self.question.id,
            response_ids.map(ResponseIdFilter::ids),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| ResultRecord {
                id: row.id,
                response: row.response,
            })
            .collect())
    }

    async fn display_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: &ResponseIdFilter,
        sort: &str,
        anonymous: bool,
        settings: &ReportSettings,
    ) -> Result<ResultsPage, ResponseError> {
        let rows = self.get_results(conn, Some(response_ids), anonymous).await?;
        if rows.is_empty() {
            return Ok(ResultsPage::default());
        }

        let respondents = rows.len();
        let mut counts: BTreeMap<i64, u32> = BTreeMap::new();
        for row in rows {
            if row.response.is_empty() {
                continue;
            }
            // Tally by timestamp, not by the raw string: dates that
            // serialize identically collapse into one bucket.
            if let Some(timestamp) = timestamp_from_stored(&row.response) {
                *counts.entry(timestamp).or_default() += 1;
            }
        }

        self.results_tags(&counts, response_ids.count(), respondents, true, sort, settings)
    }

    async fn response_select(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
        settings: &ReportSettings,
    ) -> Result<HashMap<Uuid, ExportRow>, ResponseError> {
        let records = anketo_db::response_date::Query::select_with_questions(conn, response_id).await?;

        let mut values = HashMap::new();
        for (row, question) in records {
            let Some(question) = question else { continue };
            let mut cells = export_cells(vec![question.content, row.response], settings);
            if let Some(last) = cells.pop() {
                values.insert(question.id, ExportRow::new(cells, last));
            }
        }
        Ok(values)
    }

    async fn response_answers_by_question(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<Answer>>, ResponseError> {
        let rows = anketo_db::response_date::Query::answers_for_response(conn, response_id).await?;

        let mut answers: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for row in rows {
            // Leave values in storage format here.
            answers
                .entry(row.question_id)
                .or_default()
                .push(Answer::from_db_row(row.id, row.response_id, row.question_id, row.response));
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketo_entity::question::QuestionType;

    fn date_question() -> Question {
        Question {
            id: Uuid::new_v4(),
            questionnaire_id: Uuid::new_v4(),
            name: "when".to_owned(),
            content: "When did it happen?".to_owned(),
            r#type: QuestionType::Date,
            date_format: None,
        }
    }

    #[test]
    fn test_webform_answer_passes_value_through() {
        let question = date_question();
        let question_id = question.id;
        let handler = DateResponse::new(question);
        let payload = WebformPayload::new(Uuid::new_v4()).with_field(question_id, "2021-06-28");

        let answers = handler.answers_from_webform(&payload);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].value, "2021-06-28");
        assert_eq!(answers[0].question_id, question_id);
    }

    #[test]
    fn test_webform_missing_or_empty_field_is_unanswered() {
        let question = date_question();
        let question_id = question.id;
        let handler = DateResponse::new(question);

        let absent = WebformPayload::new(Uuid::new_v4());
        assert!(handler.answers_from_webform(&absent).is_empty());

        let empty = WebformPayload::new(Uuid::new_v4()).with_field(question_id, "");
        assert!(handler.answers_from_webform(&empty).is_empty());
    }

    #[test]
    fn test_appdata_truncates_timestamp_to_date() {
        let question = date_question();
        let question_id = question.id;
        let handler = DateResponse::new(question);
        let response_id = Uuid::new_v4();

        let app = AppPayload::new(response_id)
            .with_field(question_id, vec!["2021-06-28T09:03:46.613+02:00".to_owned()]);
        let web = WebformPayload::new(response_id).with_field(question_id, "2021-06-28");

        assert_eq!(handler.answers_from_appdata(&app), handler.answers_from_webform(&web));
    }

    #[test]
    fn test_appdata_short_value_truncates_silently() {
        let question = date_question();
        let question_id = question.id;
        let handler = DateResponse::new(question);

        let app = AppPayload::new(Uuid::new_v4()).with_field(question_id, vec!["2021".to_owned()]);
        let answers = handler.answers_from_appdata(&app);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].value, "2021");
    }

    #[test]
    fn test_results_tags_orders_and_alternates() {
        let handler = DateResponse::new(date_question());
        let settings = ReportSettings::default();

        let t1 = make_timestamp(2021, 6, 28).unwrap();
        let t2 = make_timestamp(2021, 7, 1).unwrap();
        // inserted out of order on purpose
        let weights = BTreeMap::from([(t2, 3), (t1, 2)]);

        let page = handler.results_tags(&weights, 10, 5, true, "", &settings).unwrap();
        assert_eq!(page.responses.len(), 2);
        assert_eq!(page.responses[0].text, "28/06/2021");
        assert_eq!(page.responses[0].total, 2);
        assert!(!page.responses[0].even_color);
        assert_eq!(page.responses[1].text, "01/07/2021");
        assert_eq!(page.responses[1].total, 3);
        assert!(page.responses[1].even_color);
        assert_eq!(page.total.unwrap().total, "5/10");
    }

    #[test]
    fn test_results_tags_no_respondents_is_empty() {
        let handler = DateResponse::new(date_question());
        let settings = ReportSettings::default();
        let weights = BTreeMap::from([(0_i64, 7)]);

        let page = handler.results_tags(&weights, 10, 0, true, "", &settings).unwrap();
        assert_eq!(page, ResultsPage::default());
    }

    #[test]
    fn test_results_tags_without_totals() {
        let handler = DateResponse::new(date_question());
        let settings = ReportSettings::default();
        let weights = BTreeMap::from([(make_timestamp(2020, 1, 1).unwrap(), 1)]);

        let page = handler.results_tags(&weights, 4, 1, false, "", &settings).unwrap();
        assert_eq!(page.responses.len(), 1);
        assert!(page.total.is_none());
    }

    #[test]
    fn test_matches_iso_date() {
        assert!(matches_iso_date("2021-06-28"));
        assert!(!matches_iso_date("2021-6-28"));
        assert!(!matches_iso_date("2021-06-28T09"));
        assert!(!matches_iso_date("abcd-ef-gh"));
        assert!(!matches_iso_date(""));
    }

    #[test]
    fn test_export_cells_appends_formatted_dates() {
        let settings = ReportSettings::default();
        let cells = export_cells(
            vec!["When did it happen?".to_owned(), "2021-06-28".to_owned()],
            &settings,
        );
        assert_eq!(cells, vec!["When did it happen?", "2021-06-28", "28/06/2021"]);
    }

    #[test]
    fn test_export_cells_leaves_non_dates_alone() {
        let settings = ReportSettings::default();
        let cells = export_cells(vec!["Question".to_owned(), "not a date".to_owned()], &settings);
        assert_eq!(cells, vec!["Question", "not a date"]);
    }

    #[test]
    fn test_timestamp_from_stored() {
        assert_eq!(timestamp_from_stored("1970-01-02"), Some(86400));
        assert_eq!(timestamp_from_stored("1970-01"), None);
        assert_eq!(timestamp_from_stored("1970-01-02-03"), None);
        assert_eq!(timestamp_from_stored("9999-99-99"), None);
        assert_eq!(timestamp_from_stored("junk"), None);
    }

    #[test]
    fn test_results_template_selection() {
        let handler = DateResponse::new(date_question());
        assert_eq!(handler.results_template(true), "anketo/resultspdf_date");
        assert_eq!(handler.results_template(false), "anketo/results_date");
    }
}
