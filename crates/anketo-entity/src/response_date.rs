use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "response_date")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub response_id: Uuid,
    pub question_id: Uuid,
    // ISO YYYY-MM-DD text, storage format
    pub response: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::response::Entity",
        from = "Column::ResponseId",
        to = "crate::response::Column::Id"
    )]
    Response,
    #[sea_orm(
        belongs_to = "crate::question::Entity",
        from = "Column::QuestionId",
        to = "crate::question::Column::Id"
    )]
    Question,
}

impl Related<crate::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Response.def()
    }
}

impl Related<crate::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
