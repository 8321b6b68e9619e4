use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Graded attempt of one user. The composite key allows one attempt per quiz instance.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quiz_submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub quiz_instance_id: Uuid,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub is_completed: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::Entity",
        from = "Column::UserId",
        to = "crate::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::instance::Entity",
        from = "Column::QuizInstanceId",
        to = "super::instance::Column::Id"
    )]
    QuizInstance,
}

impl Related<crate::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizInstance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
