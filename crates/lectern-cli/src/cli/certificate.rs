use super::opt::Certificate;
use super::print_json;
use anyhow::Error;
use lectern_core::{LearningConfig, grading};
use sea_orm::DatabaseConnection;
use serde_json::json;

pub(crate) async fn exec(db: &DatabaseConnection, config: &LearningConfig, o: Certificate) -> Result<(), Error> {
    let Certificate {
        user_id,
        course_id,
        issue,
    } = o;
    if issue {
        let certificate = grading::issue_certificate(db, user_id, course_id, config).await?;
        return print_json(&certificate);
    }
    let average = grading::course_average(db, user_id, course_id).await?;
    let certificate = grading::certificate(db, user_id, course_id).await?;
    print_json(&json!({
        "average": average,
        "threshold": config.certificate_threshold,
        "certificate": certificate,
    }))
}
