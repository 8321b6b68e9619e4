use super::opt::{Delete, DeleteTarget};
use super::print_json;
use anyhow::Error;
use lectern_core::LearningConfig;
use lectern_core::deletion::{self, Target};
use sea_orm::DatabaseConnection;
use serde_json::json;

impl From<DeleteTarget> for Target {
    fn from(target: DeleteTarget) -> Self {
        match target {
            DeleteTarget::Content { id } => Target::Content(id),
            DeleteTarget::Module { id } => Target::Module(id),
            DeleteTarget::Course { id } => Target::Course(id),
            DeleteTarget::Program { id } => Target::Program(id),
        }
    }
}

pub(crate) async fn exec(db: &DatabaseConnection, config: &LearningConfig, o: Delete) -> Result<(), Error> {
    let target = Target::from(o.target);
    let report = deletion::delete(db, target, config.deletion_timeout).await?;
    print_json(&json!({
        "target": target,
        "report": report,
    }))
}
