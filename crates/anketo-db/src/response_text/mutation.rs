use anketo_entity::response_text::{self, Model as ResponseTextModel};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        response_id: Uuid,
        question_id: Uuid,
        value: String,
    ) -> Result<ResponseTextModel, DbErr> {
        let model = response_text::ActiveModel {
            id: Set(Uuid::new_v4()),
            response_id: Set(response_id),
            question_id: Set(question_id),
            response: Set(value),
        };
        model.insert(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %response_id, %question_id, "failed to insert text answer");
        })
    }
}
