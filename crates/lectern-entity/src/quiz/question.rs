use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quiz")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub quiz_instance_id: Uuid,
    pub question: String,
    pub options: Json,
    #[serde(skip)]
    pub correct_answer: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instance::Entity",
        from = "Column::QuizInstanceId",
        to = "super::instance::Column::Id"
    )]
    QuizInstance,
}

impl Related<super::instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizInstance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
