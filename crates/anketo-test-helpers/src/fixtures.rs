use anketo_entity::question::{Entity as Question, Model as QuestionModel, QuestionType};
use anketo_entity::response::{Complete, Entity as Response, Model as ResponseModel};
use anketo_entity::user::{Entity as User, Model as UserModel};
use chrono::NaiveDateTime;
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use uuid::Uuid;

pub async fn create_test_user(db: &DatabaseConnection) -> UserModel {
    let user = UserModel {
        id: Uuid::new_v4(),
        username: "tester".to_owned(),
        first_name: Some("Test".to_owned()),
        last_name: None,
    };
    User::insert(user.clone().into_active_model()).exec(db).await.unwrap();
    user
}

pub async fn create_test_question(
    db: &DatabaseConnection,
    questionnaire_id: Uuid,
    r#type: QuestionType,
) -> QuestionModel {
    let question = QuestionModel {
        id: Uuid::new_v4(),
        questionnaire_id,
        name: "q1".to_owned(),
        content: "Test question".to_owned(),
        r#type,
        date_format: None,
    };
    Question::insert(question.clone().into_active_model()).exec(db).await.unwrap();
    question
}

pub async fn create_test_response(
    db: &DatabaseConnection,
    questionnaire_id: Uuid,
    user_id: Uuid,
    complete: Complete,
    submitted: NaiveDateTime,
) -> ResponseModel {
    let response = ResponseModel {
        id: Uuid::new_v4(),
        questionnaire_id,
        user_id,
        complete,
        submitted,
    };
    Response::insert(response.clone().into_active_model()).exec(db).await.unwrap();
    response
}
