mod common;

use crate::common::{connect, create_course, create_learner, create_program, create_quiz, create_user};
use lectern_core::grading::{self, error::GradingError};
use lectern_core::LearningConfig;
use lectern_entity::tier::Tier;
use lectern_entity::user::Role;
use serde_json::json;
use std::collections::HashMap;
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_grades_answers() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let content_id = course.sequence()[0];
    let (quiz_instance_id, questions) = create_quiz(db, content_id, &["a", "b", "c", "a"]).await;

    let mut answers = HashMap::new();
    answers.insert(questions[0].0, questions[0].1.clone());
    answers.insert(questions[1].0, "c".to_owned());
    answers.insert(questions[3].0, questions[3].1.clone());

    let result = grading::submit_quiz(db, learner.id, content_id, &answers).await.unwrap();
    assert_eq!(result.quiz_instance_id, quiz_instance_id);
    assert_eq!(result.score, 2);
    assert_eq!(result.total, 4);
    assert_eq!(result.correct_answers, 2);
    assert_eq!(result.incorrect_answers, 2);
}

#[test(tokio::test)]
async fn test_resubmission_is_rejected() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let content_id = course.sequence()[0];
    let (quiz_instance_id, _) = create_quiz(db, content_id, &["a"]).await;

    grading::submit_quiz(db, learner.id, content_id, &HashMap::new()).await.unwrap();
    let err = grading::submit_quiz(db, learner.id, content_id, &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GradingError::AlreadySubmitted { quiz_instance_id: id } if id == quiz_instance_id));
}

#[test(tokio::test)]
async fn test_content_without_quiz() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;

    let err = grading::submit_quiz(db, learner.id, course.sequence()[0], &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GradingError::QuizNotFound(_)));
}

#[test(tokio::test)]
async fn test_submission_requires_enrollment() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Basic).await;
    let content_id = course.sequence()[0];
    create_quiz(db, content_id, &["a"]).await;

    let err = grading::submit_quiz(db, learner.id, content_id, &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GradingError::Access(_)));
}

#[test(tokio::test)]
async fn test_start_quiz_hides_answers() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let content_id = course.sequence()[0];
    let (quiz_instance_id, questions) = create_quiz(db, content_id, &["a", "c"]).await;

    let sheet = grading::start_quiz(db, learner.id, content_id).await.unwrap();
    assert_eq!(sheet.quiz_instance_id, quiz_instance_id);
    assert_eq!(sheet.total_mark, 2);
    let mut ids: Vec<Uuid> = sheet.questions.iter().map(|question| question.id).collect();
    let mut expected: Vec<Uuid> = questions.iter().map(|(id, _)| *id).collect();
    ids.sort();
    expected.sort();
    assert_eq!(ids, expected);
    assert!(sheet.questions.iter().all(|question| question.options == json!(["a", "b", "c"])));

    let value = serde_json::to_value(&sheet).unwrap();
    for question in value["questions"].as_array().unwrap() {
        assert!(question.get("correct_answer").is_none(), "answer leaked: {question}");
    }

    // Starting a quiz does not use up the attempt.
    grading::submit_quiz(db, learner.id, content_id, &HashMap::new()).await.unwrap();
}

#[test(tokio::test)]
async fn test_start_quiz_requires_enrollment() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let basic = create_learner(db, program_id, Tier::Basic).await;
    let stranger = create_user(db, Role::Developer).await;
    let content_id = course.sequence()[0];
    create_quiz(db, content_id, &["a"]).await;

    for user_id in [basic.id, stranger.id] {
        let err = grading::start_quiz(db, user_id, content_id).await.unwrap_err();
        assert!(matches!(err, GradingError::Access(_)), "unexpected error: {err:?}");
    }
}

#[test(tokio::test)]
async fn test_start_quiz_without_questions() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[2]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let [c1, c2] = course.sequence()[..] else { unreachable!() };
    create_quiz(db, c2, &[]).await;

    for content_id in [c1, c2] {
        let err = grading::start_quiz(db, learner.id, content_id).await.unwrap_err();
        assert!(matches!(err, GradingError::QuizNotFound(id) if id == content_id), "unexpected error: {err:?}");
    }
}

async fn answer_all(
    db: &sea_orm::DatabaseConnection,
    user_id: Uuid,
    content_id: Uuid,
    questions: &[(Uuid, String)],
    correct: usize,
) {
    let answers: HashMap<Uuid, String> = questions
        .iter()
        .take(correct)
        .map(|(id, answer)| (*id, answer.clone()))
        .collect();
    grading::submit_quiz(db, user_id, content_id, &answers).await.unwrap();
}

#[test(tokio::test)]
async fn test_course_average() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[3]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let [c1, c2, c3] = course.sequence()[..] else { unreachable!() };
    let (_, first) = create_quiz(db, c1, &["a", "b", "c"]).await;
    let (_, second) = create_quiz(db, c2, &["a", "b"]).await;
    create_quiz(db, c3, &["a"]).await;

    assert!(grading::course_average(db, learner.id, course.course_id).await.unwrap().abs() < f64::EPSILON);

    answer_all(db, learner.id, c1, &first, 1).await;
    answer_all(db, learner.id, c2, &second, 2).await;

    // (33.333 + 100) / 2, the unanswered quiz does not count
    let average = grading::course_average(db, learner.id, course.course_id).await.unwrap();
    assert!((average - 66.67).abs() < 1e-9, "{average}");
}

#[test(tokio::test)]
async fn test_certificate_threshold() {
    let db = &connect().await;
    let program_id = create_program(db, Role::Developer).await;
    let course = create_course(db, program_id, &[1]).await;
    let learner = create_learner(db, program_id, Tier::Standard).await;
    let content_id = course.sequence()[0];
    let (_, questions) = create_quiz(db, content_id, &["a", "b", "c"]).await;
    answer_all(db, learner.id, content_id, &questions, 1).await;

    let config = LearningConfig::default();
    let err = grading::issue_certificate(db, learner.id, course.course_id, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, GradingError::BelowThreshold { threshold, .. } if (threshold - 60.0).abs() < f64::EPSILON));
    assert!(grading::certificate(db, learner.id, course.course_id).await.unwrap().is_none());

    let lenient = LearningConfig::builder().certificate_threshold(33.0).build();
    let issued = grading::issue_certificate(db, learner.id, course.course_id, &lenient)
        .await
        .unwrap();
    assert!((issued.average - 33.33).abs() < 1e-9);

    let again = grading::issue_certificate(db, learner.id, course.course_id, &lenient)
        .await
        .unwrap();
    assert_eq!(again.id, issued.id);
    assert_eq!(
        grading::certificate(db, learner.id, course.course_id).await.unwrap().map(|certificate| certificate.id),
        Some(issued.id)
    );
}
