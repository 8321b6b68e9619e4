pub mod error;

use crate::progress;
use error::PromotionError;
use lectern_db::util::FlattenTransactionResultExt;
use lectern_db::{course, enrollment, user};
use lectern_entity::tier::Tier;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde::Serialize;
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    pub course_id: Uuid,
    pub title: String,
    pub percentage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromotionOutcome {
    /// Not every course of the program is complete yet. An empty program never completes.
    Incomplete { completed: usize, total: usize },
    /// Every course is complete. The flags tell which records actually had to be raised.
    Certified { enrollment_changed: bool, level_changed: bool },
}

/// Self-healed percentage of every course of a program, in course order.
pub async fn course_progress_overview<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    program_id: Uuid,
) -> Result<Vec<CourseProgress>, DbErr> {
    let courses = course::Query::find_by_program(conn, program_id).await?;
    let mut overview = Vec::with_capacity(courses.len());
    for course in courses {
        let snapshot = progress::heal(conn, user_id, course.id).await?;
        overview.push(CourseProgress {
            course_id: course.id,
            title: course.title,
            percentage: snapshot.percentage,
        });
    }
    Ok(overview)
}

/// Certifies the enrollment and the user level once every course of the program is complete.
///
/// Both records are only ever raised. Repeated calls with unchanged progress issue no writes.
pub async fn check_and_promote<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    user_id: Uuid,
    program_id: Uuid,
) -> Result<PromotionOutcome, PromotionError> {
    let enrollment = enrollment::Query::get(conn, user_id, program_id)
        .await?
        .ok_or(PromotionError::EnrollmentNotFound { user_id, program_id })?;
    let user = user::Query::find_user_by_id(conn, user_id)
        .await?
        .ok_or(PromotionError::UserNotFound(user_id))?;

    let overview = course_progress_overview(conn, user_id, program_id).await?;
    let total = overview.len();
    let completed = overview.iter().filter(|course| course.percentage == 100).count();
    if total == 0 || completed < total {
        tracing::debug!(%user_id, %program_id, completed, total, "program not complete");
        return Ok(PromotionOutcome::Incomplete { completed, total });
    }

    if enrollment.status == Tier::Certified && user.level == Tier::Certified {
        return Ok(PromotionOutcome::Certified {
            enrollment_changed: false,
            level_changed: false,
        });
    }

    let (enrollment_changed, level_changed) = conn
        .transaction(|txn| {
            Box::pin(async move {
                let enrollment_changed =
                    enrollment::Mutation::raise_status(txn, user_id, program_id, Tier::Certified).await?;
                let level_changed = user::Mutation::raise_level(txn, user_id, Tier::Certified).await?;
                Ok::<_, DbErr>((enrollment_changed, level_changed))
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error: &DbErr| {
            tracing::error!(error = error as &dyn Error, %user_id, %program_id, "failed to certify user");
        })?;

    tracing::info!(%user_id, %program_id, enrollment_changed, level_changed, "user completed program");
    Ok(PromotionOutcome::Certified {
        enrollment_changed,
        level_changed,
    })
}
