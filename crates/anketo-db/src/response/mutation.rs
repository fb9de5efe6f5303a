use anketo_entity::response::{self, Complete, Model as ResponseModel};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create<C: ConnectionTrait>(
        conn: &C,
        questionnaire_id: Uuid,
        user_id: Uuid,
        complete: Complete,
    ) -> Result<ResponseModel, DbErr> {
        let model = response::ActiveModel {
            id: Set(Uuid::new_v4()),
            questionnaire_id: Set(questionnaire_id),
            user_id: Set(user_id),
            complete: Set(complete),
            submitted: Set(chrono::Utc::now().naive_utc()),
        };
        model.insert(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %questionnaire_id, %user_id, "failed to create response");
        })
    }
}
