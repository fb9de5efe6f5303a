use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum QuestionType {
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "numeric")]
    Numeric,
    #[sea_orm(string_value = "text")]
    Text,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub name: String,
    pub content: String,
    pub r#type: QuestionType,
    // strftime pattern a date answer must parse with; None means ISO %Y-%m-%d
    pub date_format: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::response_date::Entity")]
    ResponseDate,
    #[sea_orm(has_many = "crate::response_text::Entity")]
    ResponseText,
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

impl ActiveModelBehavior for ActiveModel {}
