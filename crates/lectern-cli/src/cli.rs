pub(crate) mod opt;
mod certificate;
mod delete;
mod learner;

use anyhow::Error;
use lectern_core::LearningConfig;
use opt::Commands;
use sea_orm::DatabaseConnection;
use serde::Serialize;

pub(crate) async fn exec(db: &DatabaseConnection, config: &LearningConfig, command: Commands) -> Result<(), Error> {
    match command {
        Commands::Schema => {
            lectern_db::schema::setup_schema(db).await?;
            tracing::info!("schema is up to date");
            Ok(())
        }
        Commands::Progress(o) => learner::progress(db, o).await,
        Commands::Overview(o) => learner::overview(db, o).await,
        Commands::Watch(o) => learner::watch(db, o).await,
        Commands::Promote(o) => learner::promote(db, o).await,
        Commands::Certificate(o) => certificate::exec(db, config, o).await,
        Commands::Delete(o) => delete::exec(db, config, o).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
