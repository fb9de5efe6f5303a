use anketo_db::bulk::{self, BulkSqlConfig, BulkSqlParams, QuestionnaireFilter};
use anketo_db::{response, response_date};
use anketo_entity::group_member;
use anketo_entity::question::QuestionType;
use anketo_entity::response::Complete;
use anketo_test_helpers::fixtures::{create_test_question, create_test_response, create_test_user};
use anketo_test_helpers::setup_schema;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, IntoActiveModel};
use test_log::test;
use uuid::Uuid;

const DATE: BulkSqlConfig = BulkSqlConfig::new("response_date", "qrd", "rsd", false);

struct Seeded {
    db: DatabaseConnection,
    questionnaire_id: Uuid,
    user_a: Uuid,
    first_response_a: Uuid,
}

/// User A submits twice (the second attempt is the latest), user B once.
/// Every response is complete and carries one date answer.
async fn seed() -> Seeded {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();

    let questionnaire_id = Uuid::new_v4();
    let question = create_test_question(&db, questionnaire_id, QuestionType::Date).await;
    let user_a = create_test_user(&db).await;
    let user_b = create_test_user(&db).await;

    let mut first_response_a = None;
    for (user_id, day) in [(user_a.id, 1), (user_a.id, 2), (user_b.id, 3)] {
        let submitted = NaiveDate::from_ymd_opt(2021, 6, day).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let response = create_test_response(&db, questionnaire_id, user_id, Complete::Yes, submitted).await;
        response_date::Mutation::insert(&db, response.id, question.id, format!("2021-06-{day:02}"))
            .await
            .unwrap();
        if day == 1 {
            first_response_a = Some(response.id);
        }
    }

    Seeded {
        db,
        questionnaire_id,
        user_a: user_a.id,
        first_response_a: first_response_a.unwrap(),
    }
}

async fn run(seeded: &Seeded, params: &BulkSqlParams) -> usize {
    let bulk = bulk::build(
        seeded.db.get_database_backend(),
        &DATE,
        &QuestionnaireFilter::One(seeded.questionnaire_id),
        params,
    );
    seeded.db.query_all(bulk.statement()).await.unwrap().len()
}

#[test(tokio::test)]
async fn test_bulk_sql_runs_and_returns_all_rows() {
    let seeded = seed().await;
    assert_eq!(run(&seeded, &BulkSqlParams::default()).await, 3);
}

#[test(tokio::test)]
async fn test_bulk_sql_complete_filter() {
    let seeded = seed().await;

    // an extra incomplete response stays invisible by default
    let user = create_test_user(&seeded.db).await;
    let submitted = NaiveDate::from_ymd_opt(2021, 6, 9).unwrap().and_hms_opt(9, 0, 0).unwrap();
    let response =
        create_test_response(&seeded.db, seeded.questionnaire_id, user.id, Complete::No, submitted).await;
    let question = anketo_db::question::Query::find_by_questionnaire(&seeded.db, seeded.questionnaire_id)
        .await
        .unwrap()
        .remove(0);
    response_date::Mutation::insert(&seeded.db, response.id, question.id, "2021-06-09".to_owned())
        .await
        .unwrap();

    assert_eq!(run(&seeded, &BulkSqlParams::default()).await, 3);
    assert_eq!(
        run(
            &seeded,
            &BulkSqlParams {
                show_incompletes: true,
                ..BulkSqlParams::default()
            }
        )
        .await,
        4
    );
}

#[test(tokio::test)]
async fn test_bulk_sql_unique_user_response_keeps_latest() {
    let seeded = seed().await;

    let rows = run(
        &seeded,
        &BulkSqlParams {
            unique_user_response: true,
            ..BulkSqlParams::default()
        },
    )
    .await;

    // user A's first submission is superseded by the second
    assert_eq!(rows, 2);
}

#[test(tokio::test)]
async fn test_bulk_sql_group_filter() {
    let seeded = seed().await;
    let group_id = Uuid::new_v4();
    let member = group_member::Model {
        group_id,
        user_id: seeded.user_a,
    };
    group_member::Entity::insert(member.into_active_model())
        .exec(&seeded.db)
        .await
        .unwrap();

    let rows = run(
        &seeded,
        &BulkSqlParams {
            group_id: Some(group_id),
            ..BulkSqlParams::default()
        },
    )
    .await;
    assert_eq!(rows, 2);
}

#[test(tokio::test)]
async fn test_bulk_sql_response_and_user_filters() {
    let seeded = seed().await;

    let by_response = run(
        &seeded,
        &BulkSqlParams {
            response_id: Some(seeded.first_response_a),
            ..BulkSqlParams::default()
        },
    )
    .await;
    assert_eq!(by_response, 1);

    let by_user = run(
        &seeded,
        &BulkSqlParams {
            user_id: Some(seeded.user_a),
            ..BulkSqlParams::default()
        },
    )
    .await;
    assert_eq!(by_user, 2);

    let missing = run(
        &seeded,
        &BulkSqlParams {
            response_id: Some(Uuid::new_v4()),
            ..BulkSqlParams::default()
        },
    )
    .await;
    assert_eq!(missing, 0);
}

#[test(tokio::test)]
async fn test_response_create_and_find() {
    let seeded = seed().await;
    let user = create_test_user(&seeded.db).await;

    let created = response::Mutation::create(&seeded.db, seeded.questionnaire_id, user.id, Complete::No)
        .await
        .unwrap();
    let found = response::Query::find_by_id(&seeded.db, created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.complete, Complete::No);
}
