pub mod error;

use crate::LearningConfig;
use crate::enrollment;
use crate::sequence::ContentSequence;
use error::GradingError;
use lectern_db::util::FlattenTransactionResultExt;
use lectern_db::{certificate, quiz};
use lectern_entity::certificate::Model as Certificate;
use sea_orm::prelude::Json;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A quiz as handed to a learner. Never carries the correct answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSheet {
    pub quiz_instance_id: Uuid,
    pub total_mark: i32,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Json,
}

/// Loads the questions of the quiz attached to `content_id` for `user_id`.
///
/// The user must pass the same access checks as for [`submit_quiz`]. A quiz without questions is
/// treated as missing.
pub async fn start_quiz<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    content_id: Uuid,
) -> Result<QuizSheet, GradingError> {
    let course_id = enrollment::course_of_content(conn, content_id).await?;
    enrollment::authorize(conn, user_id, course_id).await?;

    let instance = quiz::instance::Query::find_by_content(conn, content_id)
        .await?
        .ok_or(GradingError::QuizNotFound(content_id))?;
    let questions: Vec<QuizQuestion> = quiz::question::Query::find_by_instance(conn, instance.id)
        .await?
        .into_iter()
        .map(|question| QuizQuestion {
            id: question.id,
            question: question.question,
            options: question.options,
        })
        .collect();
    if questions.is_empty() {
        return Err(GradingError::QuizNotFound(content_id));
    }
    tracing::debug!(%user_id, quiz_instance_id = %instance.id, questions = questions.len(), "started quiz");

    Ok(QuizSheet {
        quiz_instance_id: instance.id,
        total_mark: instance.total_mark,
        questions,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub quiz_instance_id: Uuid,
    pub score: i32,
    pub total: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
}

/// Grades the answers of `user_id` to the quiz of `content_id`.
///
/// `answers` maps question ids to the chosen answer. Unanswered questions count as incorrect. Every
/// user gets exactly one attempt per quiz.
pub async fn submit_quiz<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    content_id: Uuid,
    answers: &HashMap<Uuid, String>,
) -> Result<QuizResult, GradingError> {
    let course_id = enrollment::course_of_content(conn, content_id).await?;
    enrollment::authorize(conn, user_id, course_id).await?;

    let instance = quiz::instance::Query::find_by_content(conn, content_id)
        .await?
        .ok_or(GradingError::QuizNotFound(content_id))?;
    let quiz_instance_id = instance.id;
    if quiz::submission::Query::get(conn, user_id, quiz_instance_id).await?.is_some() {
        return Err(GradingError::AlreadySubmitted { quiz_instance_id });
    }

    let questions = quiz::question::Query::find_by_instance(conn, quiz_instance_id).await?;
    let correct = questions
        .iter()
        .filter(|question| answers.get(&question.id) == Some(&question.correct_answer))
        .count();
    let total = i32::try_from(questions.len()).map_err(|err| DbErr::Custom(err.to_string()))?;
    let correct_answers = i32::try_from(correct).map_err(|err| DbErr::Custom(err.to_string()))?;
    let incorrect_answers = total - correct_answers;

    let submission =
        quiz::submission::Mutation::create(conn, user_id, quiz_instance_id, correct_answers, incorrect_answers)
            .await?
            .ok_or(GradingError::AlreadySubmitted { quiz_instance_id })?;
    tracing::debug!(%user_id, %quiz_instance_id, correct_answers, total, "graded quiz");

    Ok(QuizResult {
        quiz_instance_id,
        score: submission.correct_answers,
        total,
        correct_answers: submission.correct_answers,
        incorrect_answers: submission.incorrect_answers,
    })
}

/// Mean quiz percentage of a user over all quizzes of a course, rounded to two decimals.
///
/// Quizzes without a submission are ignored. Without any submission the average is 0.
pub async fn course_average<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<f64, DbErr> {
    let sequence = ContentSequence::load(conn, course_id).await?;
    let instances = quiz::instance::Query::find_by_contents(conn, sequence.ids()).await?;
    let total_marks: HashMap<Uuid, i32> = instances
        .iter()
        .map(|instance| (instance.id, instance.total_mark))
        .collect();
    let instance_ids: Vec<Uuid> = total_marks.keys().copied().collect();
    let submissions = quiz::submission::Query::find_completed(conn, user_id, &instance_ids).await?;
    if submissions.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = submissions
        .iter()
        .map(|submission| {
            let total_mark = total_marks.get(&submission.quiz_instance_id).copied().unwrap_or(0);
            if total_mark == 0 {
                0.0
            } else {
                100.0 * f64::from(submission.correct_answers) / f64::from(total_mark)
            }
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let average = sum / submissions.len() as f64;
    Ok((average * 100.0).round() / 100.0)
}

/// Issues the course certificate once the quiz average reaches the configured threshold.
///
/// A user holds at most one certificate per course. Asking again returns the existing one.
pub async fn issue_certificate<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: Uuid,
    config: &LearningConfig,
) -> Result<Certificate, GradingError> {
    let threshold = config.certificate_threshold;
    conn.transaction(|txn| {
        Box::pin(async move {
            enrollment::authorize(txn, user_id, course_id).await?;
            let average = course_average(txn, user_id, course_id).await?;
            if average < threshold {
                tracing::debug!(%user_id, %course_id, average, threshold, "average below certificate threshold");
                return Err(GradingError::BelowThreshold { average, threshold });
            }
            if let Some(existing) = certificate::Query::get(txn, user_id, course_id).await? {
                return Ok(existing);
            }
            let issued = certificate::Mutation::create(txn, user_id, course_id, average).await?;
            tracing::info!(%user_id, %course_id, average, "issued certificate");
            Ok(issued)
        })
    })
    .await
    .flatten_res()
}

pub async fn certificate<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Option<Certificate>, DbErr> {
    certificate::Query::get(conn, user_id, course_id).await
}
