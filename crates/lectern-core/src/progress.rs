pub mod decision;
pub mod error;

use crate::enrollment;
use crate::promotion::error::PromotionError;
use crate::promotion::{self, PromotionOutcome};
use crate::sequence::ContentSequence;
use decision::{Decision, decide};
use error::ProgressError;
use lectern_db::progress;
use lectern_db::util::{FlattenTransactionResultExt, LockConflictExt};
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde::Serialize;
use std::error::Error;
use uuid::Uuid;

/// What a user has unlocked in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub course_id: Uuid,
    /// Furthest unlocked content, `None` if the user has not started the course.
    pub content_id: Option<Uuid>,
    pub watched_contents: Vec<Uuid>,
    pub percentage: i32,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn not_started(course_id: Uuid) -> Self {
        Self {
            course_id,
            content_id: None,
            watched_contents: Vec::new(),
            percentage: 0,
        }
    }

    fn at(sequence: &ContentSequence, index: usize) -> Self {
        Self {
            course_id: sequence.course_id(),
            content_id: sequence.get(index),
            watched_contents: sequence.watched(index),
            percentage: sequence.percentage_at(index),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceKind {
    Advanced,
    /// The content was already unlocked, nothing changed.
    Replayed,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvanceOutcome {
    pub kind: AdvanceKind,
    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,
    /// Set whenever the course is complete after this request.
    pub promotion: Option<PromotionOutcome>,
}

/// Marks `content_id` as watched by `user_id`.
///
/// Runs in a single transaction. The pointer is moved with a conditional write, so a concurrent
/// request that moved it first makes this one fail with [`ProgressError::WriteConflict`]. A
/// statement or commit rejected by the store because of a concurrent writer's lock is reported
/// the same way.
pub async fn advance<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: Uuid,
    content_id: Uuid,
) -> Result<AdvanceOutcome, ProgressError> {
    conn.transaction(|txn| Box::pin(async move { advance_in(txn, user_id, course_id, content_id).await }))
        .await
        .flatten_res()
        .map_err(|err| match err {
            ProgressError::Database(error) if error.is_lock_conflict() => ProgressError::WriteConflict,
            ProgressError::Promotion(PromotionError::Database(error)) if error.is_lock_conflict() => {
                ProgressError::WriteConflict
            }
            err => err,
        })
        .inspect_err(|err| match err {
            ProgressError::WriteConflict => {
                tracing::warn!(%user_id, %course_id, %content_id, "concurrent progress update");
            }
            ProgressError::Database(error) => {
                tracing::error!(error = error as &dyn Error, %user_id, %course_id, "failed to advance progress");
            }
            _ => {}
        })
}

async fn advance_in<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: Uuid,
    content_id: Uuid,
) -> Result<AdvanceOutcome, ProgressError> {
    let authorization = enrollment::authorize(conn, user_id, course_id).await?;
    let sequence = ContentSequence::load(conn, course_id).await?;
    let stored = progress::Query::get(conn, user_id, course_id).await?;

    let previous = match &stored {
        Some(row) => {
            let position = sequence.position(row.content_id);
            if position.is_none() {
                tracing::warn!(%user_id, %course_id, content_id = %row.content_id, "stored progress is outside of the course");
            }
            position
        }
        None => None,
    };

    let decision = decide(previous, sequence.position(content_id));
    tracing::debug!(%user_id, %course_id, %content_id, ?decision, "unlock decision");

    let (kind, snapshot) = match decision {
        Decision::NotInCourse => {
            return Err(ProgressError::ContentNotInCourse { course_id, content_id });
        }
        Decision::Locked { required } => {
            let required_content_id = sequence
                .get(required)
                .ok_or_else(|| DbErr::Custom(format!("no content at position {required}")))?;
            tracing::warn!(%user_id, %course_id, %content_id, %required_content_id, "content is locked");
            return Err(ProgressError::ContentLocked { required_content_id });
        }
        Decision::Replay { stored } => (AdvanceKind::Replayed, ProgressSnapshot::at(&sequence, stored)),
        Decision::Advance { to, .. } => {
            let snapshot = ProgressSnapshot::at(&sequence, to);
            let written = match &stored {
                None => progress::Mutation::insert_first(conn, user_id, course_id, content_id, snapshot.percentage).await?,
                Some(row) => {
                    progress::Mutation::advance_from(
                        conn,
                        user_id,
                        course_id,
                        row.content_id,
                        content_id,
                        snapshot.percentage,
                    )
                    .await?
                }
            };
            if !written {
                return Err(ProgressError::WriteConflict);
            }
            tracing::debug!(%user_id, %course_id, %content_id, percentage = snapshot.percentage, "advanced progress");
            (AdvanceKind::Advanced, snapshot)
        }
    };

    let promotion = if snapshot.is_complete() {
        Some(promotion::check_and_promote(conn, user_id, authorization.program.id).await?)
    } else {
        None
    };

    Ok(AdvanceOutcome {
        kind,
        snapshot,
        promotion,
    })
}

/// Self-healing read of a user's progress in a course.
pub async fn read<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<ProgressSnapshot, ProgressError> {
    enrollment::authorize(conn, user_id, course_id).await?;
    Ok(heal(conn, user_id, course_id).await?)
}

/// Recomputes the percentage of the stored pointer against the current sequence and persists it if
/// it changed. Does not check access.
pub async fn heal<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<ProgressSnapshot, DbErr> {
    let Some(row) = progress::Query::get(conn, user_id, course_id).await? else {
        return Ok(ProgressSnapshot::not_started(course_id));
    };
    let sequence = ContentSequence::load(conn, course_id).await?;
    let Some(index) = sequence.position(row.content_id) else {
        tracing::warn!(%user_id, %course_id, content_id = %row.content_id, "stored progress is outside of the course");
        return Ok(ProgressSnapshot::not_started(course_id));
    };

    let snapshot = ProgressSnapshot::at(&sequence, index);
    if snapshot.percentage != row.percentage {
        tracing::debug!(
            %user_id,
            %course_id,
            stored = row.percentage,
            percentage = snapshot.percentage,
            "healing progress percentage"
        );
        progress::Mutation::set_percentage(conn, user_id, course_id, row.content_id, snapshot.percentage).await?;
    }
    Ok(snapshot)
}
