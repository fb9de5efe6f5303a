use anketo_db::{question, response_date};
use anketo_entity::question::QuestionType;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_results_for_question_returns_rows() -> Result<(), DbErr> {
    let question_id = Uuid::new_v4();
    let models = [
        anketo_entity::response_date::Model {
            id: Uuid::new_v4(),
            response_id: Uuid::new_v4(),
            question_id,
            response: "2021-06-28".to_owned(),
        },
        anketo_entity::response_date::Model {
            id: Uuid::new_v4(),
            response_id: Uuid::new_v4(),
            question_id,
            response: "2021-07-01".to_owned(),
        },
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([models.clone()])
        .into_connection();

    assert_eq!(
        response_date::Query::results_for_question(&db, question_id, None).await?,
        Vec::from(models)
    );

    Ok(())
}

#[test(tokio::test)]
async fn test_find_question_by_id() -> Result<(), DbErr> {
    let model = anketo_entity::question::Model {
        id: Uuid::new_v4(),
        questionnaire_id: Uuid::new_v4(),
        name: "when".to_owned(),
        content: "When?".to_owned(),
        r#type: QuestionType::Date,
        date_format: None,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[model.clone()]])
        .into_connection();

    assert_eq!(question::Query::find_by_id(&db, model.id).await?, Some(model));

    Ok(())
}
