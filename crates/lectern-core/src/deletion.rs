//! Deletes parts of the content tree together with everything that references them.
//!
//! Progress pointing at a removed content is moved back to the nearest surviving content of the
//! course, or dropped if there is none. Quizzes, submissions, certificates, reviews and enrollments
//! are removed before the rows they belong to.

pub mod error;
pub mod plan;

use crate::sequence::ContentSequence;
use error::DeletionError;
use lectern_db::util::{FlattenTransactionResultExt, RequireRecord};
use lectern_db::{certificate, content, course, enrollment, module, program, progress, quiz, review};
use plan::{Node, Step, cascade_steps, load_tree, repair_steps};
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Content(Uuid),
    Module(Uuid),
    Course(Uuid),
    Program(Uuid),
}

impl Target {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Content(_) => "Content",
            Self::Module(_) => "Module",
            Self::Course(_) => "Course",
            Self::Program(_) => "Program",
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Content(id) | Self::Module(id) | Self::Course(id) | Self::Program(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub steps: usize,
    pub repointed: u64,
    pub dropped: u64,
    pub contents: u64,
}

/// Deletes `target` in its own transaction.
///
/// The whole cascade has to finish within `timeout`. Otherwise the transaction is dropped, which
/// rolls it back, and [`DeletionError::TimedOut`] is returned.
pub async fn delete<C: TransactionTrait>(
    conn: &C,
    target: Target,
    timeout: Duration,
) -> Result<DeletionReport, DeletionError> {
    let run = conn.transaction(|txn| Box::pin(async move { delete_in(txn, target).await }));
    let res = match tokio::time::timeout(timeout, run).await {
        Ok(res) => res.flatten_res(),
        Err(_) => Err(DeletionError::TimedOut { after: timeout }),
    };
    match &res {
        Ok(report) => tracing::info!(?target, ?report, "deleted"),
        Err(DeletionError::NotFound { .. }) => {}
        Err(error) => tracing::error!(error = error as &dyn Error, ?target, "deletion failed"),
    }
    res
}

/// Deletes `target` inside a transaction the caller owns.
///
/// Any error leaves the caller's transaction in a state it must roll back.
pub async fn delete_in<C: ConnectionTrait>(conn: &C, target: Target) -> Result<DeletionReport, DeletionError> {
    let tree = load_tree(conn, target).await?.ok_or(DeletionError::NotFound {
        kind: target.kind(),
        id: target.id(),
    })?;

    let mut steps = match target {
        Target::Content(content_id) => repair(conn, &tree, course_of_content(conn, content_id).await?).await?,
        Target::Module(module_id) => repair(conn, &tree, course_of_module(conn, module_id).await?).await?,
        Target::Course(_) | Target::Program(_) => Vec::new(),
    };
    steps.extend(cascade_steps(&tree));
    tracing::debug!(?target, steps = steps.len(), "planned deletion");

    let mut report = DeletionReport {
        steps: steps.len(),
        ..Default::default()
    };
    for step in steps {
        let affected = apply(conn, step).await?;
        match step {
            Step::RepointProgress { .. } => report.repointed += affected,
            Step::DropProgress { .. } | Step::DropCourseProgress { .. } => report.dropped += affected,
            Step::DeleteContent { .. } => report.contents += affected,
            _ => {}
        }
    }
    Ok(report)
}

async fn repair<C: ConnectionTrait>(conn: &C, tree: &Node, course_id: Uuid) -> Result<Vec<Step>, DbErr> {
    let removed_ids = tree.content_ids();
    let sequence = ContentSequence::load(conn, course_id).await?;
    let rows = progress::Query::find_pointing_at(conn, course_id, &removed_ids).await?;
    let removed: HashSet<Uuid> = removed_ids.into_iter().collect();
    Ok(repair_steps(&sequence, &removed, &rows))
}

async fn course_of_module<C: ConnectionTrait>(conn: &C, module_id: Uuid) -> Result<Uuid, DbErr> {
    Ok(module::Query::find_by_id(conn, module_id).await.require("module")?.course_id)
}

async fn course_of_content<C: ConnectionTrait>(conn: &C, content_id: Uuid) -> Result<Uuid, DbErr> {
    let content = content::Query::find_by_id(conn, content_id).await.require("content")?;
    course_of_module(conn, content.module_id).await
}

/// Runs a single step. Returns the number of rows it touched.
async fn apply<C: ConnectionTrait>(conn: &C, step: Step) -> Result<u64, DbErr> {
    tracing::trace!(?step, "applying deletion step");
    match step {
        Step::RepointProgress {
            user_id,
            course_id,
            content_id,
            percentage,
        } => progress::Mutation::repoint(conn, user_id, course_id, content_id, percentage)
            .await
            .map(|()| 1),
        Step::DropProgress { user_id, course_id } => progress::Mutation::delete(conn, user_id, course_id).await.map(|()| 1),
        Step::DropCourseProgress { course_id } => progress::Mutation::delete_for_course(conn, course_id).await,
        Step::DeleteSubmissions { quiz_instance_id } => {
            quiz::submission::Mutation::delete_for_instance(conn, quiz_instance_id).await
        }
        Step::DeleteQuestions { quiz_instance_id } => {
            quiz::question::Mutation::delete_for_instance(conn, quiz_instance_id).await
        }
        Step::DeleteQuizInstance { quiz_instance_id } => {
            quiz::instance::Mutation::delete(conn, quiz_instance_id).await.map(|()| 1)
        }
        Step::DeleteContent { content_id } => content::Mutation::delete(conn, content_id).await.map(|()| 1),
        Step::DeleteModule { module_id } => module::Mutation::delete(conn, module_id).await.map(|()| 1),
        Step::DeleteCertificates { course_id } => certificate::Mutation::delete_for_course(conn, course_id).await,
        Step::DeleteReviews { course_id } => review::Mutation::delete_for_course(conn, course_id).await,
        Step::DeleteCourse { course_id } => course::Mutation::delete(conn, course_id).await.map(|()| 1),
        Step::DeleteEnrollments { program_id } => enrollment::Mutation::delete_for_program(conn, program_id).await,
        Step::DeleteProgram { program_id } => program::Mutation::delete(conn, program_id).await.map(|()| 1),
    }
}
