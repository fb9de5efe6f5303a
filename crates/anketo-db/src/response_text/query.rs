use anketo_entity::question::Model as QuestionModel;
use anketo_entity::response_text::{self, Entity as ResponseText, Model as ResponseTextModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    /// Stored rows for one question, optionally narrowed to a set of
    /// response ids. A singleton slice behaves as plain equality.
    pub async fn results_for_question<C: ConnectionTrait>(
        conn: &C,
        question_id: Uuid,
        response_ids: Option<&[Uuid]>,
    ) -> Result<Vec<ResponseTextModel>, DbErr> {
        let mut query = ResponseText::find().filter(response_text::Column::QuestionId.eq(question_id));
        if let Some(response_ids) = response_ids {
            query = query.filter(response_text::Column::ResponseId.is_in(response_ids.iter().copied()));
        }
        query.all(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %question_id, "failed to load text results");
        })
    }

    pub async fn answers_for_response<C: ConnectionTrait>(
        conn: &C,
        response_id: Uuid,
    ) -> Result<Vec<ResponseTextModel>, DbErr> {
        ResponseText::find()
            .filter(response_text::Column::ResponseId.eq(response_id))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %response_id, "failed to load text answers");
            })
    }

    /// Rows of a response joined with their question, for export rows.
    pub async fn select_with_questions<C: ConnectionTrait>(
        conn: &C,
        response_id: Uuid,
    ) -> Result<Vec<(ResponseTextModel, Option<QuestionModel>)>, DbErr> {
        ResponseText::find()
            .filter(response_text::Column::ResponseId.eq(response_id))
            .find_also_related(anketo_entity::question::Entity)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %response_id, "failed to load text answers with questions");
            })
    }
}
