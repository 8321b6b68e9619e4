use lectern_db::user;
use lectern_entity::user::{Model, Role};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

pub async fn create_test_user<C: ConnectionTrait>(conn: &C) -> Model {
    user::Mutation::create_user(conn, format!("{}@example.com", Uuid::new_v4()), Role::Developer)
        .await
        .unwrap()
}
