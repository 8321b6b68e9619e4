mod common;

use crate::common::{connect, create_course, create_learner, create_program, create_user};
use lectern_core::enrollment::error::AccessError;
use lectern_core::progress;
use lectern_core::review::{self, error::ReviewError};
use lectern_entity::tier::Tier;
use lectern_entity::user::Role;
use test_log::test;

#[test(tokio::test)]
async fn test_only_finished_courses_can_be_reviewed() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[2]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let [c1, c2] = course.sequence()[..] else { unreachable!() };

    let err = review::ensure_can_review(db, learner.id, course.course_id).await.unwrap_err();
    assert!(matches!(err, ReviewError::CourseNotCompleted { percentage: 0 }));

    progress::advance(db, learner.id, course.course_id, c1).await.unwrap();
    let err = review::ensure_can_review(db, learner.id, course.course_id).await.unwrap_err();
    assert!(matches!(err, ReviewError::CourseNotCompleted { percentage: 50 }));

    progress::advance(db, learner.id, course.course_id, c2).await.unwrap();
    review::ensure_can_review(db, learner.id, course.course_id).await.unwrap();
}

#[test(tokio::test)]
async fn test_reviewer_must_be_in_audience() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let outsider = create_user(db, Role::Server).await;

    let err = review::ensure_can_review(db, outsider.id, course.course_id).await.unwrap_err();
    assert!(matches!(err, ReviewError::Access(AccessError::AudienceMismatch { .. })));
}
