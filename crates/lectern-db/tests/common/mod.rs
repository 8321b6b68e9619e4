#![allow(dead_code)]

pub mod user;

use lectern_db::{content, course, module, program};
use lectern_entity::user::Role;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

pub use lectern_db::schema::setup_schema;

/// Program with one course holding one module with `contents` content items.
pub struct Tree {
    pub program_id: Uuid,
    pub course_id: Uuid,
    pub module_id: Uuid,
    pub contents: Vec<Uuid>,
}

pub async fn create_tree<C: ConnectionTrait>(conn: &C, contents: usize) -> Tree {
    let program = program::Mutation::create(conn, "program".to_owned(), Role::Developer, 10.0)
        .await
        .unwrap();
    let course = course::Mutation::create(conn, program.id, "course".to_owned())
        .await
        .unwrap();
    let module = module::Mutation::create(conn, course.id, "module".to_owned())
        .await
        .unwrap();
    let mut ids = Vec::with_capacity(contents);
    for i in 0..contents {
        let content = content::Mutation::create(conn, module.id, format!("content {i}"))
            .await
            .unwrap();
        ids.push(content.id);
    }
    Tree {
        program_id: program.id,
        course_id: course.id,
        module_id: module.id,
        contents: ids,
    }
}
