mod common;

use crate::common::{connect, create_course, create_learner, create_program};
use lectern_core::progress;
use lectern_core::promotion::error::PromotionError;
use lectern_core::promotion::{self, PromotionOutcome};
use lectern_db::{enrollment, user};
use lectern_entity::tier::Tier;
use lectern_entity::user::Role;
use sea_orm::{ConnectionTrait, TransactionTrait};
use test_log::test;
use uuid::Uuid;

async fn finish<C: ConnectionTrait + TransactionTrait>(conn: &C, user_id: Uuid, course: &common::Course) {
    for content_id in course.sequence() {
        progress::advance(conn, user_id, course.course_id, content_id).await.unwrap();
    }
}

#[test(tokio::test)]
async fn test_needs_every_course() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let first = create_course(db, program_id, &[2]).await;
    let second = create_course(db, program_id, &[1, 1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;

    finish(db, learner.id, &first).await;
    let outcome = promotion::check_and_promote(db, learner.id, program_id).await.unwrap();
    assert_eq!(outcome, PromotionOutcome::Incomplete { completed: 1, total: 2 });
    let stored = enrollment::Query::get(db, learner.id, program_id).await.unwrap().unwrap();
    assert_eq!(stored.status, Tier::Standard);

    finish(db, learner.id, &second).await;
    let stored = enrollment::Query::get(db, learner.id, program_id).await.unwrap().unwrap();
    assert_eq!(stored.status, Tier::Certified);
    let stored = user::Query::find_user_by_id(db, learner.id).await.unwrap().unwrap();
    assert_eq!(stored.level, Tier::Certified);
}

#[test(tokio::test)]
async fn test_promotion_is_idempotent() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    finish(db, learner.id, &course).await;

    let again = promotion::check_and_promote(db, learner.id, program_id).await.unwrap();
    assert_eq!(
        again,
        PromotionOutcome::Certified {
            enrollment_changed: false,
            level_changed: false,
        }
    );
    let enrollment_before = enrollment::Query::get(db, learner.id, program_id).await.unwrap();
    let user_before = user::Query::find_user_by_id(db, learner.id).await.unwrap();

    promotion::check_and_promote(db, learner.id, program_id).await.unwrap();
    assert_eq!(enrollment::Query::get(db, learner.id, program_id).await.unwrap(), enrollment_before);
    assert_eq!(user::Query::find_user_by_id(db, learner.id).await.unwrap(), user_before);
}

#[test(tokio::test)]
async fn test_level_is_kept_from_other_program() {
    let db = &connect().await;
    let certified_program = create_program(db, Role::Developer).await;
    let certified_course = create_course(db, certified_program, &[1]).await;
    let next_program = create_program(db, Role::Developer).await;
    let next_course = create_course(db, next_program, &[2]).await;
    let learner = create_learner(db, certified_program, Tier::Standard).await;
    enrollment::Mutation::create(db, learner.id, next_program, Tier::Standard)
        .await
        .unwrap();

    finish(db, learner.id, &certified_course).await;
    progress::advance(db, learner.id, next_course.course_id, next_course.sequence()[0])
        .await
        .unwrap();

    let outcome = promotion::check_and_promote(db, learner.id, next_program).await.unwrap();
    assert_eq!(outcome, PromotionOutcome::Incomplete { completed: 0, total: 1 });
    let stored = user::Query::find_user_by_id(db, learner.id).await.unwrap().unwrap();
    assert_eq!(stored.level, Tier::Certified);

    finish(db, learner.id, &next_course).await;
    let outcome = promotion::check_and_promote(db, learner.id, next_program).await.unwrap();
    assert_eq!(
        outcome,
        PromotionOutcome::Certified {
            enrollment_changed: false,
            level_changed: false,
        }
    );
}

#[test(tokio::test)]
async fn test_empty_program_never_completes() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;

    let outcome = promotion::check_and_promote(db, learner.id, program_id).await.unwrap();
    assert_eq!(outcome, PromotionOutcome::Incomplete { completed: 0, total: 0 });
}

#[test(tokio::test)]
async fn test_requires_enrollment() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let other_program = create_program(db, Role::Developer).await;
    let learner = create_learner(db, other_program, Tier::Standard).await;

    let err = promotion::check_and_promote(db, learner.id, program_id).await.unwrap_err();
    assert!(matches!(err, PromotionError::EnrollmentNotFound { .. }));
}

#[test(tokio::test)]
async fn test_overview_lists_courses_in_order() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let first = create_course(db, program_id, &[2]).await;
    let second = create_course(db, program_id, &[4]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    progress::advance(db, learner.id, second.course_id, second.sequence()[0])
        .await
        .unwrap();

    let overview = promotion::course_progress_overview(db, learner.id, program_id).await.unwrap();
    let percentages: Vec<(Uuid, i32)> = overview.iter().map(|course| (course.course_id, course.percentage)).collect();
    assert_eq!(percentages, vec![(first.course_id, 0), (second.course_id, 25)]);
}
