use super::opt::{CourseArgs, ProgramArgs, Watch};
use super::print_json;
use anyhow::Error;
use lectern_core::{progress, promotion};
use sea_orm::DatabaseConnection;

pub(crate) async fn progress(db: &DatabaseConnection, o: CourseArgs) -> Result<(), Error> {
    let snapshot = progress::read(db, o.user_id, o.course_id).await?;
    print_json(&snapshot)
}

pub(crate) async fn overview(db: &DatabaseConnection, o: ProgramArgs) -> Result<(), Error> {
    let overview = promotion::course_progress_overview(db, o.user_id, o.program_id).await?;
    print_json(&overview)
}

pub(crate) async fn watch(db: &DatabaseConnection, o: Watch) -> Result<(), Error> {
    let outcome = progress::advance(db, o.user_id, o.course_id, o.content_id).await?;
    print_json(&outcome)
}

pub(crate) async fn promote(db: &DatabaseConnection, o: ProgramArgs) -> Result<(), Error> {
    let outcome = promotion::check_and_promote(db, o.user_id, o.program_id).await?;
    print_json(&outcome)
}
