use crate::error::ResponseError;
use crate::question::Question;
use crate::response::Response;
use crate::settings::ReportSettings;
use crate::webform::{AppPayload, WebformPayload};
use anketo_db::bulk::{self, BulkSql, BulkSqlConfig, BulkSqlParams, QuestionnaireFilter};
use anketo_entity::question::QuestionType;
use anketo_model::response::answer::Answer;
use anketo_model::results::{ExportRow, ResultRow, ResultsPage};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend};
use std::collections::HashMap;
use uuid::Uuid;

pub mod date;
pub mod numerical;
pub mod text;

/// Response scope of a report: a whole set of responses or a single one.
/// A single response never displays totals.
#[derive(Debug, Clone)]
pub enum ResponseIdFilter {
    One(Uuid),
    Many(Vec<Uuid>),
}

impl ResponseIdFilter {
    pub fn ids(&self) -> &[Uuid] {
        match self {
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        }
    }

    pub fn count(&self) -> usize {
        self.ids().len()
    }

    pub fn show_totals(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

/// Insertion input: either the raw submitted payload or a response that was
/// already built from it.
#[derive(Debug, Clone, Copy)]
pub enum ResponseSource<'a> {
    Webform(&'a WebformPayload),
    Response(&'a Response),
}

/// A stored result record: row id and the stored value, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: Uuid,
    pub response: String,
}

/// The capability set every response type implements. The date and text
/// subtables get one implementation each; the numerical handler extends the
/// generic text one.
#[async_trait]
pub trait ResponseType: Send + Sync {
    fn question(&self) -> &Question;

    /// Name of the subtable this type persists into.
    fn response_table(&self) -> &'static str;

    fn bulk_sql_config(&self) -> BulkSqlConfig;

    /// Template identifier for the results screen.
    fn results_template(&self, pdf: bool) -> &'static str;

    /// Answers for this question from a web form. An absent or empty field
    /// yields an empty list: unanswered is not an error.
    fn answers_from_webform(&self, data: &WebformPayload) -> Vec<Answer>;

    /// Answers for this question from mobile app data.
    fn answers_from_appdata(&self, data: &AppPayload) -> Vec<Answer>;

    /// Persist this question's answer out of the given source. `Ok(None)`
    /// means validation failed or the question was unanswered; nothing was
    /// written. The new row id is returned otherwise.
    async fn insert_response(
        &self,
        conn: &DatabaseConnection,
        source: ResponseSource<'_>,
    ) -> Result<Option<Uuid>, ResponseError>;

    /// Stored rows for this question, optionally narrowed by response ids.
    /// `anonymous` is accepted but currently has no effect on the query.
    async fn get_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: Option<&ResponseIdFilter>,
        anonymous: bool,
    ) -> Result<Vec<ResultRecord>, ResponseError>;

    /// Aggregate the stored rows of this question into a results page.
    async fn display_results(
        &self,
        conn: &DatabaseConnection,
        response_ids: &ResponseIdFilter,
        sort: &str,
        anonymous: bool,
        settings: &ReportSettings,
    ) -> Result<ResultsPage, ResponseError>;

    /// Fixed-width export rows for one response, keyed by question id.
    async fn response_select(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
        settings: &ReportSettings,
    ) -> Result<HashMap<Uuid, ExportRow>, ResponseError>;

    /// All answers of one response grouped by question id, in storage
    /// format.
    async fn response_answers_by_question(
        &self,
        conn: &DatabaseConnection,
        response_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<Answer>>, ResponseError>;

    /// Bulk report query for this response type. The unique-user-response
    /// setting is read from the explicit settings, never from a global.
    fn bulk_sql(
        &self,
        backend: DbBackend,
        questionnaires: &QuestionnaireFilter,
        params: &BulkSqlParams,
        settings: &ReportSettings,
    ) -> BulkSql {
        let params = BulkSqlParams {
            unique_user_response: settings.unique_user_response,
            ..params.clone()
        };
        bulk::build(backend, &self.bulk_sql_config(), questionnaires, &params)
    }
}

/// One handler per question type tag.
pub fn for_question(question: Question) -> Box<dyn ResponseType> {
    match question.r#type {
        QuestionType::Date => Box::new(date::DateResponse::new(question)),
        QuestionType::Numeric => Box::new(numerical::NumericalTextResponse::new(question)),
        QuestionType::Text => Box::new(text::TextResponse::new(question)),
    }
}

/// Turn tallied (text, count) pairs into display rows. `even_color`
/// alternates starting at false; the summed count comes back for the totals
/// line.
pub(crate) fn tally_rows<I>(entries: I) -> (Vec<ResultRow>, u32)
where
    I: IntoIterator<Item = (String, u32)>,
{
    let mut rows = Vec::new();
    let mut sum = 0;
    let mut even_color = false;
    for (text, total) in entries {
        rows.push(ResultRow { text, total, even_color });
        even_color = !even_color;
        sum += total;
    }
    (rows, sum)
}
