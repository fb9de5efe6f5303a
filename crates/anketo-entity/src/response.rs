use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Complete {
    #[sea_orm(string_value = "y")]
    Yes,
    #[sea_orm(string_value = "n")]
    No,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "response")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub user_id: Uuid,
    pub complete: Complete,
    pub submitted: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::Entity",
        from = "Column::UserId",
        to = "crate::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "crate::response_date::Entity")]
    ResponseDate,
    #[sea_orm(has_many = "crate::response_text::Entity")]
    ResponseText,
    #[sea_orm(has_many = "crate::response_other::Entity")]
    ResponseOther,
}

impl Related<crate::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::response_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponseDate.def()
    }
}

impl Related<crate::response_text::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponseText.def()
    }
}

impl Related<crate::response_other::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponseOther.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
