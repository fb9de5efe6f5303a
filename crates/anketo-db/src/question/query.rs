use anketo_entity::question::{self, Entity as Question, Model as QuestionModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, question_id: Uuid) -> Result<Option<QuestionModel>, DbErr> {
        Question::find()
            .filter(question::Column::Id.eq(question_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %question_id, "failed to load question");
            })
    }

    pub async fn find_by_questionnaire<C: ConnectionTrait>(
        conn: &C,
        questionnaire_id: Uuid,
    ) -> Result<Vec<QuestionModel>, DbErr> {
        Question::find()
            .filter(question::Column::QuestionnaireId.eq(questionnaire_id))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %questionnaire_id, "failed to load questions");
            })
    }
}
