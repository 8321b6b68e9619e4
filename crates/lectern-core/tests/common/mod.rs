#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use lectern_db::schema::setup_schema;
use lectern_db::{content, course, enrollment, module, program, quiz, user};
use lectern_entity::tier::Tier;
use lectern_entity::user::{Model as User, Role};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

static CLOCK: AtomicI64 = AtomicI64::new(0);

/// Strictly increasing creation timestamps, so fixtures never depend on the id tie-break.
pub fn tick() -> NaiveDateTime {
    let offset = CLOCK.fetch_add(1, Ordering::SeqCst);
    DateTime::from_timestamp(1_700_000_000 + offset, 0).unwrap().naive_utc()
}

pub async fn connect() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

pub struct Course {
    pub program_id: Uuid,
    pub course_id: Uuid,
    pub modules: Vec<Uuid>,
    pub contents: Vec<Vec<Uuid>>,
}

impl Course {
    /// All contents in course order.
    pub fn sequence(&self) -> Vec<Uuid> {
        self.contents.iter().flatten().copied().collect()
    }
}

pub async fn create_program<C: ConnectionTrait>(conn: &C, published_for: Role) -> Uuid {
    program::Mutation::create(conn, "program".to_owned(), published_for, 49.0)
        .await
        .unwrap()
        .id
}

/// Creates a course with one module per entry of `layout`, holding that many contents.
pub async fn create_course<C: ConnectionTrait>(conn: &C, program_id: Uuid, layout: &[usize]) -> Course {
    let course = course::Mutation::create_at(conn, program_id, "course".to_owned(), tick())
        .await
        .unwrap();
    let mut modules = Vec::with_capacity(layout.len());
    let mut contents = Vec::with_capacity(layout.len());
    for (m, len) in layout.iter().enumerate() {
        let module = module::Mutation::create_at(conn, course.id, format!("module {m}"), tick())
            .await
            .unwrap();
        let mut ids = Vec::with_capacity(*len);
        for c in 0..*len {
            let content = content::Mutation::create_at(conn, module.id, format!("content {m}.{c}"), tick())
                .await
                .unwrap();
            ids.push(content.id);
        }
        modules.push(module.id);
        contents.push(ids);
    }
    Course {
        program_id,
        course_id: course.id,
        modules,
        contents,
    }
}

pub async fn create_user<C: ConnectionTrait>(conn: &C, role: Role) -> User {
    user::Mutation::create_user(conn, format!("{}@example.com", Uuid::new_v4()), role)
        .await
        .unwrap()
}

/// A developer enrolled in `program_id` with `status`.
pub async fn create_learner<C: ConnectionTrait>(conn: &C, program_id: Uuid, status: Tier) -> User {
    let user = create_user(conn, Role::Developer).await;
    enrollment::Mutation::create(conn, user.id, program_id, status)
        .await
        .unwrap();
    user
}

/// Attaches a quiz to `content_id`. Returns the quiz instance id and the question ids with their
/// correct answers.
pub async fn create_quiz<C: ConnectionTrait>(
    conn: &C,
    content_id: Uuid,
    answers: &[&str],
) -> (Uuid, Vec<(Uuid, String)>) {
    let total_mark = i32::try_from(answers.len()).unwrap();
    let instance = quiz::instance::Mutation::create(conn, content_id, total_mark)
        .await
        .unwrap();
    let mut questions = Vec::with_capacity(answers.len());
    for (i, answer) in answers.iter().enumerate() {
        let question = quiz::question::Mutation::create(
            conn,
            instance.id,
            format!("question {i}"),
            json!(["a", "b", "c"]),
            (*answer).to_owned(),
        )
        .await
        .unwrap();
        questions.push((question.id, question.correct_answer));
    }
    (instance.id, questions)
}
