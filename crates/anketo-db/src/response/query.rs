use anketo_entity::response::{self, Entity as Response, Model as ResponseModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, response_id: Uuid) -> Result<Option<ResponseModel>, DbErr> {
        Response::find()
            .filter(response::Column::Id.eq(response_id))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %response_id, "failed to load response");
            })
    }
}
