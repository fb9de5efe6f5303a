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
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Generic handler for text answers; the numerical handler builds on it.
pub struct TextResponse {
    question: Question,
}

impl TextResponse {
    pub fn new(question: Question) -> Self {
        Self { question }
    }

    /// Aggregate tallied values into a results page. The default order is
    /// by value; `"ascending"` / `"descending"` reorder by count.
    pub fn results_tags(
        &self,
        weights: &BTreeMap<String, u32>,
        participants: usize,
        respondents: usize,
        show_totals: bool,
        sort: &str,
    ) -> ResultsPage {
        if respondents == 0 || weights.is_empty() {
            return ResultsPage::default();
        }

        let mut entries: Vec<(String, u32)> = weights.iter().map(|(text, &num)| (text.clone(), num)).collect();
        match sort {
            "ascending" => entries.sort_by_key(|(_, num)| *num),
            "descending" => entries.sort_by_key(|(_, num)| std::cmp::Reverse(*num)),
            _ => {}
        }
        let (rows, sum) = responsetype::tally_rows(entries);

        let total = show_totals.then(|| ResultsTotal {
            total: format!("{sum}/{participants}"),
        });
        ResultsPage { responses: rows, total }
    }
}

#[async_trait]
impl ResponseType for TextResponse {
    fn question(&self) -> &Question {
        &self.question
    }

    fn response_table(&self) -> &'static str {
        "response_text"
    }

    fn bulk_sql_config(&self) -> BulkSqlConfig {
        BulkSqlConfig::new("response_text", "qrt", "rst", true)
    }

    fn results_template(&self, pdf: bool) -> &'static str {
        if pdf {
            "anketo/resultspdf_text"
        } else {
            "anketo/results_text"
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
            webform.fields.insert(self.question.id, value.to_owned());
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

        let record =
            anketo_db::response_text::Mutation::insert(conn, response.id, self.question.id, answer.value.clone())
                .await?;
        Ok(Some(record.id))
    }

    async fn get_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: Option<&ResponseIdFilter>,
        _anonymous: bool,
    ) -> Result<Vec<ResultRecord>, ResponseError> {
        let rows = anketo_db::response_text::Query::results_for_question(
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
        _settings: &ReportSettings,
    ) -> Result<ResultsPage, ResponseError> {
        let rows = self.get_results(conn, Some(response_ids), anonymous).await?;
        if rows.is_empty() {
            return Ok(ResultsPage::default());
        }

        let responses = rows.len();
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for row in rows {
            if row.response.is_empty() {
                continue;
            }
            *counts.entry(row.response).or_default() += 1;
        }

        Ok(self.results_tags(
            &counts,
            response_ids.count(),
            responses,
            response_ids.show_totals(),
            sort,
        ))
    }

    async fn response_select(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
        _settings: &ReportSettings,
    ) -> Result<HashMap<Uuid, ExportRow>, ResponseError> {
        let records = anketo_db::response_text::Query::select_with_questions(conn, response_id).await?;

        let mut values = HashMap::new();
        for (row, question) in records {
            let Some(question) = question else { continue };
            values.insert(question.id, ExportRow::new(vec![question.content], row.response));
        }
        Ok(values)
    }

    async fn response_answers_by_question(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<Answer>>, ResponseError> {
        let rows = anketo_db::response_text::Query::answers_for_response(conn, response_id).await?;

        let mut answers: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for row in rows {
            answers
                .entry(row.question_id)
                .or_default()
                .push(Answer::from_db_row(row.id, row.response_id, row.question_id, row.response));
        }
        Ok(answers)
    }
}
